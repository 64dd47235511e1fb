use crate::namespace::Namespace;
use crate::output;
use std::io::{self, BufRead, Write};

static PROMPT: &str = "8^) ";

/// Reads one line at a time from `input` until `exit`, `bye` or end of input.
/// Bindings persist from one line to the next.
pub fn start<R: BufRead, W: Write>(mut input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "Starting the interactive pir interpreter ye dirty seadog...")?;
    let namespace = Namespace::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let line = line.trim_end();
        if line == "exit" || line == "bye" {
            writeln!(out, "Goodbye my friend")?;
            return Ok(());
        }

        match crate::run(line, &namespace) {
            Err(errors) => {
                writeln!(out, "Errors while parsing:")?;
                for err in errors.iter() {
                    writeln!(out, "\t{}", err)?;
                }
            }
            Ok(value) => {
                write!(out, "{}", output::take())?;
                if !value.is_empty() {
                    writeln!(out, "{}", value)?;
                }
            }
        }
    }
}
