pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod lexer;
pub mod namespace;
pub mod object;
pub mod output;
pub mod parser;
pub mod repl;
mod stack;
pub mod token;
pub mod visualizer;

pub use lexer::Lexer;
pub use namespace::Namespace;
pub use object::Value;
pub use parser::Parser;

/// Lexes, parses and evaluates `source` against `namespace`. Parse errors
/// stop the run before anything is evaluated.
pub fn run(source: &str, namespace: &Namespace) -> Result<Value, Vec<String>> {
    let program = Parser::new(Lexer::new(source)).parse_program()?;

    Ok(evaluator::eval(&program, namespace))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_run() {
        let namespace = Namespace::new();

        assert_eq!(run("yar x be 2.", &namespace), Ok(Value::EMPTY));
        assert_eq!(run("x * 21.", &namespace), Ok(Value::from(42)));
        assert_eq!(
            run("x +", &namespace),
            Err(vec!["no prefix parse function for EOF found. Line: 1 Char: 4".to_owned()])
        );
    }
}
