//! Errors produced while scanning, parsing, and evaluating a computor program.
//!
//! Unlike `libslide`'s span-carrying `Diagnostic`, computor's language has no need to render
//! source snippets: every error surfaces to the user as a single line prefixed by its kind, so
//! the error type here is a flat, typed enum rather than a diagnostic registry.

use core::fmt;

/// Errors surfaced by `computor-core`.
///
/// Each variant corresponds to one row of the error kind table: the kind determines the message
/// prefix a consumer (namely the `computor` REPL) should print.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputorError {
    /// The lexer rejected a character, or the parser hit an unexpected token or a missing `)`.
    Syntax(String),
    /// An unknown variable was used, or a polynomial could not be solved (multiple variables,
    /// non-natural degrees, or degree greater than two).
    Resolve(String),
    /// A power computation recursed too deeply, or a bisection search did not converge.
    Math(MathError),
    /// Division by the numeric zero, or by the zero polynomial.
    DivisionByZero,
    /// An operator combination that has no defined semantics, e.g. dividing a polynomial by a
    /// polynomial with more than one term.
    UnsupportedOperation,
    /// The token stream was drained in the middle of parsing an expression.
    UnexpectedEnd,
}

/// Errors raised by the numeric kernel.
#[derive(Clone, Debug, PartialEq)]
pub enum MathError {
    /// Integer power exceeded [`crate::number::MAX_POWER_EXPONENT`].
    TooBigPower,
    /// Bisection failed to converge within its iteration cap.
    NoConvergence,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::TooBigPower => write!(f, "too big power"),
            MathError::NoConvergence => write!(f, "could not find any solution by bisection"),
        }
    }
}

impl fmt::Display for ComputorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputorError::Syntax(detail) => {
                write!(f, "You have an error in your syntax: {}", detail)
            }
            ComputorError::Resolve(detail) => write!(f, "Could not compute: {}", detail),
            ComputorError::Math(err) => write!(f, "Could not compute: {}", err),
            ComputorError::DivisionByZero => write!(f, "Could not compute: division by zero"),
            ComputorError::UnsupportedOperation => {
                write!(f, "Could not compute: unsupported operation")
            }
            ComputorError::UnexpectedEnd => write!(
                f,
                "Could not parse: unexpected end of expression. Did you forget something?"
            ),
        }
    }
}

impl std::error::Error for ComputorError {}

impl From<MathError> for ComputorError {
    fn from(err: MathError) -> Self {
        ComputorError::Math(err)
    }
}

/// Convenience alias used throughout computor-core.
pub type Result<T> = std::result::Result<T, ComputorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_message_carries_detail() {
        let err = ComputorError::Syntax("unknown token @".into());
        assert_eq!(
            err.to_string(),
            "You have an error in your syntax: unknown token @"
        );
    }

    #[test]
    fn division_by_zero_message() {
        assert_eq!(
            ComputorError::DivisionByZero.to_string(),
            "Could not compute: division by zero"
        );
    }

    #[test]
    fn math_error_wraps_kind() {
        let err: ComputorError = MathError::TooBigPower.into();
        assert_eq!(err.to_string(), "Could not compute: too big power");
    }
}
