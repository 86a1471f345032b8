//! General error types for the parser

use std::fmt::{Display, Formatter};

use thiserror::Error as ThisError;

use crate::coords::Coords;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Input handling ahead of the core pipeline (files, byte decoding, empty input)
    Input,
    /// The scanner (tokenizer) stage
    Scanner,
    /// The value building (parsing) stage
    Builder,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Input => write!(f, "input"),
            Stage::Scanner => write!(f, "scanner"),
            Stage::Builder => write!(f, "builder"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Details {
    /// The named file couldn't be opened or read
    #[error("Unable to read file {0}")]
    InvalidFile(String),
    /// Empty or whitespace-only input
    #[error("Input is empty or contains only whitespace")]
    ZeroLengthInput,
    /// Bytes that are not valid UTF-8, starting at the given byte offset
    #[error("Invalid UTF-8 input at byte offset {0}")]
    NonUtf8InputDetected(usize),
    /// A non-ASCII byte at the given offset, when decoding as ASCII
    #[error("Non-ASCII input at byte offset {0}")]
    NonAsciiInputDetected(usize),

    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated comment")]
    UnterminatedComment,
    #[error("Unexpected token {0}")]
    UnexpectedCharacter(char),

    #[error("Unexpected token {0}")]
    UnexpectedToken(String),
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("Unexpected token {0}, expected a property key")]
    ExpectedPropertyKey(String),
    #[error("Expected ':' after property key, found {0}")]
    ExpectedColon(String),
    #[error("Invalid number {0}")]
    InvalidNumber(String),
    #[error("Unterminated object")]
    UnterminatedObject,
    #[error("Unterminated array")]
    UnterminatedArray,
    #[error("Invalid escape sequence {0}")]
    InvalidEscapeSequence(String),
    #[error("Invalid unicode escape sequence {0}")]
    InvalidUnicodeEscapeSequence(String),
    /// Arrays and objects nested deeper than the configured limit
    #[error("Maximum nesting depth of {0} exceeded")]
    NestingTooDeep(usize),
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(
                f,
                "{}: {} at [line: {}, column: {}]",
                self.stage, self.details, coords.line, coords.column
            ),
            None => write!(f, "{}: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! input_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Input,
            details: $details,
            coords: None,
        })
    };
}

#[macro_export]
macro_rules! scanner_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Scanner,
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! builder_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Builder,
            details: $details,
            coords: Some($coords),
        })
    };
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Builder,
            details: $details,
            coords: None,
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::coords::Coords;
    use crate::errors::{Details, Error, ParserResult, Stage};

    #[test]
    fn should_render_offending_token_and_position() {
        let result: ParserResult<()> = scanner_error!(
            Details::UnexpectedCharacter('@'),
            Coords {
                absolute: 8,
                line: 1,
                column: 9
            }
        );
        let err = result.unwrap_err();
        assert_eq!(err.stage, Stage::Scanner);
        assert_eq!(
            err.to_string(),
            "scanner: Unexpected token @ at [line: 1, column: 9]"
        );
    }

    #[test]
    fn should_render_errors_without_coords() {
        let err = Error {
            stage: Stage::Input,
            details: Details::ZeroLengthInput,
            coords: None,
        };
        assert_eq!(
            err.to_string(),
            "input: Input is empty or contains only whitespace"
        );
    }
}
