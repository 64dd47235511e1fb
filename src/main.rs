use clap::Parser;
use pir_interpreter::{output, repl, visualizer, Lexer, Namespace};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Interpreter for pir, the pirate programming language.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start the interactive prompt.
    #[arg(short, long)]
    repl: bool,

    /// Write a Graphviz rendering of the program's syntax tree to this path
    /// instead of running it.
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// A `.pir` source file.
    file: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PIR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(path: &Path) -> String {
    info!(path = %path.display(), "loading program");

    fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Failed to read '{}': {}", path.display(), err);
        process::exit(1);
    })
}

fn parse_or_exit(source: &str) -> pir_interpreter::ast::Program {
    pir_interpreter::Parser::new(Lexer::new(source))
        .parse_program()
        .unwrap_or_else(|errors| {
            println!("Errors while parsing program:");
            for err in errors.iter() {
                println!("\t{}", err);
            }
            process::exit(1);
        })
}

fn write_dot(source: &str, path: &Path) -> io::Result<()> {
    let program = parse_or_exit(source);
    let mut out = BufWriter::new(File::create(path)?);

    visualizer::write_dot(&program, &mut out)?;
    out.flush()?;
    println!("AST written to {}", path.display());
    Ok(())
}

fn run_file(source: &str) {
    let program = parse_or_exit(source);
    debug!(statements = program.statements.len(), "parsed program");

    let result = pir_interpreter::evaluator::eval(&program, &Namespace::new());
    debug!(result = result.type_name(), "evaluated program");

    print!("{}", output::take());
    if !result.is_empty() {
        println!("{}", result);
    }
}

fn main() {
    let args = Args::parse();
    init_tracing();

    if args.repl {
        let stdin = io::stdin();
        if let Err(err) = repl::start(stdin.lock(), io::stdout()) {
            eprintln!("{}", err);
            process::exit(1);
        }
        return;
    }

    let path = match &args.file {
        Some(path) => path,
        None => {
            eprintln!("Provide a file to run or start the prompt with --repl");
            process::exit(1);
        }
    };
    let source = read_source(path);

    match &args.dot {
        Some(dot) => {
            if let Err(err) = write_dot(&source, dot) {
                eprintln!("Failed to write '{}': {}", dot.display(), err);
                process::exit(1);
            }
        }
        None => run_file(&source),
    }
}
