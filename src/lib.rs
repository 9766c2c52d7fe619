// ABOUTME: Library root: wires lexing, parsing, macro expansion, and evaluation together

pub mod ast;
pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod macros;
pub mod modify;
pub mod object;
pub mod parser;
pub mod token;

use env::Environment;
use object::Object;
use std::rc::Rc;

/// Runs a Monkey program end-to-end: parse, expand macros, evaluate.
///
/// `env` is a first-class value the caller threads across calls (a REPL
/// passes the same `Rc<Environment>` to every line it reads), so this does
/// *not* register builtins itself — call `builtins::register_builtins` once
/// on a fresh `Environment` before the first `eval_source` call. Doing it
/// here on every call would re-stomp a user rebinding of a builtin name
/// (e.g. `let len = 5;`) back to the builtin on the next line.
///
/// Parse errors are joined into a single `ERROR` object rather than
/// propagated as a `Result`, matching the evaluator's own discipline of
/// reporting every failure as a runtime value.
pub fn eval_source(source: &str, env: Rc<Environment>) -> Object {
    let (mut program, parse_errors) = parser::parse(source);
    if !parse_errors.is_empty() {
        let joined = parse_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Object::Error(joined);
    }

    macros::define_macros(&mut program, &env);
    let program = match macros::expand_macros(program, &env) {
        Ok(program) => program,
        Err(err) => return Object::Error(err.to_string()),
    };

    eval::eval_program(&program, &env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluates_simple_arithmetic() {
        let env = Environment::new();
        match eval_source("1 + 2 * 3", env) {
            Object::Integer(n) => assert_eq!(n, 7),
            other => panic!("expected Integer(7), got {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors_are_reported_as_a_single_error_object() {
        let env = Environment::new();
        match eval_source("let x = ;", env) {
            Object::Error(_) => {}
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_macro_expansion_runs_before_evaluation() {
        let env = Environment::new();
        let source = r#"
            let unless = macro(condition, consequence, alternative) {
                quote(if (!(unquote(condition))) { unquote(consequence) } else { unquote(alternative) });
            };
            unless(false, "was false", "was true");
        "#;
        match eval_source(source, env) {
            Object::String(s) => assert_eq!(s, "was false"),
            other => panic!("expected String, got {other:?}"),
        }
    }
}
