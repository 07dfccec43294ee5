use thiserror::Error;

/// Parsing errors.
///
/// Defines the errors that can occur while lexing and parsing source code:
/// illegal characters, unexpected tokens, and a premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the error types raised by the scope stack and the evaluator, such
/// as type mismatches, undeclared names, or arity errors.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::{DeclarationError, RuntimeError};

/// One reported problem, collected instead of aborting.
///
/// Every front-end and evaluation failure ends up as a `Diagnostic`; the
/// interpreter keeps going after recording it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluating the node at `line` failed.
    #[error("Error on line {line}: {error}")]
    Runtime {
        /// What failed.
        error: RuntimeError,
        /// The line of the failing node.
        line:  usize,
    },
}

impl Diagnostic {
    /// The source line the diagnostic points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(error) => error.line(),
            Self::Runtime { line, .. } => *line,
        }
    }

    /// The runtime error, if this is one.
    #[must_use]
    pub const fn runtime(&self) -> Option<&RuntimeError> {
        match self {
            Self::Runtime { error, .. } => Some(error),
            Self::Parse(_) => None,
        }
    }
}
