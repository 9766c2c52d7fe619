// ABOUTME: Error types for parsing and macro expansion failures

use thiserror::Error;

/// Parse-time failures, collected into a list on the parser rather than
/// short-circuiting: one bad statement shouldn't hide the next.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no prefix parse function for {token} found")]
    NoPrefixParseFn { token: String },

    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: String, got: String },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },

    #[error("expected identifier, got {got}")]
    ExpectedIdentifier { got: String },
}

/// Host-level failures that should never occur given a well-formed AST.
/// Ordinary Monkey runtime failures are `Object::Error` *values*, not these —
/// see the evaluator's propagation discipline. This enum exists only for the
/// macro expander's fatal-error case (spec §4.5 / §9).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("argument error: wrong number of arguments (given {given}, expected {expected})")]
    MacroArity { given: usize, expected: usize },

    #[error("macro did not return quote. got={got}")]
    MacroDidNotReturnQuote { got: String },
}
