use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// None of these stop the front end: the lexer skips the offending lexeme
/// and the parser resumes at the next statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("Error on line {line}: Illegal character '{character}'.")]
    IllegalCharacter {
        /// The rejected character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An integer literal that does not fit in 64 bits.
    #[error("Error on line {line}: Integer literal {literal} is out of range.")]
    IntegerOutOfRange {
        /// The digits of the literal.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The line of the last token read.
        line: usize,
    },
}

impl ParseError {
    /// The source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::IllegalCharacter { line, .. }
            | Self::IntegerOutOfRange { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line } => *line,
        }
    }
}
