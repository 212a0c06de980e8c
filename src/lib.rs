//! Lexer, parser and tree-walking interpreter for a small scripting
//! language with closures, arrays and hashes.

pub mod frontend;
pub mod interpreter;

use frontend::{KeywordTable, Lexer, Parser, ParserError};
use interpreter::{Environment, Interpreter, Object};

use std::io::Write;

/// Parses `source` and, if it has no syntax errors, evaluates it in `env`.
pub fn run_source<W: Write>(
    source: &str,
    keywords: KeywordTable,
    interpreter: &mut Interpreter<W>,
    env: &Environment,
) -> Result<Object, Vec<ParserError>> {
    let program = Parser::new(Lexer::with_keywords(source, keywords)).parse()?;
    Ok(interpreter.eval_program(&program, env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_source() {
        let mut interpreter = Interpreter::with_output(Vec::new());
        let env = Environment::new();

        let result = run_source(
            "let x = 2; puts(x * 21)",
            KeywordTable::classic(),
            &mut interpreter,
            &env,
        );
        assert_eq!(result, Ok(Object::Null));
        assert_eq!(interpreter.output(), b"42\n");
        assert_eq!(env.get("x"), Some(Object::Integer(2)));

        let errors = run_source("let = 1", KeywordTable::classic(), &mut interpreter, &env)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
