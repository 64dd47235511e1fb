use pir_interpreter::{run, Namespace};
use std::env;
use std::time::Instant;

static INPUT: &str = "
yar fibonacci be f(x):
    if x = 0: gives 0.
    lsif x = 1: gives 1.
    ls: gives fibonacci(x - 1) + fibonacci(x - 2)..
.
fibonacci(N).";

fn main() {
    let n: u32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(25);
    let source = INPUT.replace('N', &n.to_string());

    let start = Instant::now();
    let result = match run(&source, &Namespace::new()) {
        Ok(result) => result,
        Err(errors) => {
            for err in errors.iter() {
                eprintln!("\t{}", err);
            }
            std::process::exit(1);
        }
    };
    let duration = start.elapsed();

    println!(
        "engine=tree-walker, n={}, result={}, duration={}",
        n,
        result,
        duration.as_secs_f64(),
    );
}
