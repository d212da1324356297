//! # minicalc
//!
//! A small integer calculator. A line such as `3 + 5 * 2` is split into
//! tokens by the [`Lexer`] and folded into a single `i64` by the
//! [`Evaluator`], with `*` and `/` binding tighter than `+` and `-` and every
//! operator associating to the left.
//!
//! Parentheses, unary minus and fractional numbers are not part of the
//! language.

pub mod error;
pub mod evaluator;
pub mod lexer;

pub use crate::error::{CalcError, Position};
pub use crate::evaluator::{Evaluator, Options};
pub use crate::lexer::{Lexer, Operator, Token, TokenKind};

/// Evaluates one line with the default [`Options`]: anything after a
/// complete expression is ignored.
///
/// # Examples
/// ```
/// assert_eq!(minicalc::evaluate("2 + 3 * 4"), Ok(14));
/// assert!(minicalc::evaluate("5 / 0").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<i64, CalcError> {
    evaluate_with(input, &Options::default())
}

/// Evaluates one line. An empty line is rejected before any lexing happens.
pub fn evaluate_with(input: &str, options: &Options) -> Result<i64, CalcError> {
    if input.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    let mut evaluator = Evaluator::new(Lexer::new(input));
    evaluator.compute(options)
}

/// Splits one line into tokens, without the final end-of-input marker. Empty
/// input is rejected the same way [`evaluate_with`] rejects it.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    if input.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    Lexer::new(input).collect()
}
