//! Contains the `DecodeError` type shared by the tokenizer and the parser.
use std::fmt;
use thiserror::Error;

/// Where in the pipeline an error was detected.
///
/// The tokenizer knows byte offsets into the input; the parser only
/// sees the token sequence, so its errors point at a token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A 0-indexed byte offset into the input text.
    Offset(usize),
    /// A 0-indexed position in the token sequence.
    Token(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Offset(offset) => write!(f, "byte {}", offset),
            Position::Token(index) => write!(f, "token {}", index),
        }
    }
}

/// A 1-indexed line/column pair, computed from a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// The 1-indexed line number.
    pub line: usize,
    /// The 1-indexed column number, counted in characters.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The error classification of a `DecodeError`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    EmptyTokens,
    UnexpectedEof,
    UnexpectedToken,
    InvalidCharacter,
    InvalidNumber,
    InvalidRootObject,
    MultipleRootElements,
    DepthLimitExceeded,
    InputTooLarge,
}

/// The error type for every decoding operation.
///
/// Each decode stops at the first error; callers never see partial
/// results. Offending fragments are owned strings so the error outlives
/// the input it was produced from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The input text had zero length.
    #[error("empty input")]
    EmptyInput,

    /// The token sequence handed to the parser was empty.
    #[error("empty token sequence")]
    EmptyTokens,

    /// The input or token stream ended inside an incomplete construct.
    #[error("unexpected end of JSON input at {position}")]
    UnexpectedEof { position: Position },

    /// A token (or byte) the current grammar position does not accept.
    #[error("unexpected token '{token}' at {position}")]
    UnexpectedToken { position: Position, token: String },

    /// A disallowed raw character inside a string, or a bad escape.
    #[error("invalid character '{fragment}' at {position}")]
    InvalidCharacter { position: Position, fragment: String },

    /// A malformed or out-of-range numeric literal.
    #[error("invalid number at {position}: {detail}")]
    InvalidNumber { position: Position, detail: String },

    /// The first token was not `{` or `[`.
    #[error("invalid root object: '{token}' at {position}, expected an object or array")]
    InvalidRootObject { position: Position, token: String },

    /// Tokens remained after the root value was complete.
    #[error("multiple root elements: trailing '{token}' at {position}")]
    MultipleRootElements { position: Position, token: String },

    /// Objects and arrays were nested deeper than the configured limit.
    #[error("maximum nesting depth of {limit} exceeded at {position}")]
    DepthLimitExceeded { position: Position, limit: usize },

    /// The input was rejected before tokenization because of its size.
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

impl DecodeError {
    /// Returns the payload-free classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::EmptyInput => ErrorKind::EmptyInput,
            DecodeError::EmptyTokens => ErrorKind::EmptyTokens,
            DecodeError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            DecodeError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            DecodeError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            DecodeError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            DecodeError::InvalidRootObject { .. } => ErrorKind::InvalidRootObject,
            DecodeError::MultipleRootElements { .. } => ErrorKind::MultipleRootElements,
            DecodeError::DepthLimitExceeded { .. } => ErrorKind::DepthLimitExceeded,
            DecodeError::InputTooLarge { .. } => ErrorKind::InputTooLarge,
        }
    }

    /// Returns where the error was detected, if it has a position.
    pub fn position(&self) -> Option<Position> {
        match self {
            DecodeError::EmptyInput
            | DecodeError::EmptyTokens
            | DecodeError::InputTooLarge { .. } => None,
            DecodeError::UnexpectedEof { position }
            | DecodeError::UnexpectedToken { position, .. }
            | DecodeError::InvalidCharacter { position, .. }
            | DecodeError::InvalidNumber { position, .. }
            | DecodeError::InvalidRootObject { position, .. }
            | DecodeError::MultipleRootElements { position, .. }
            | DecodeError::DepthLimitExceeded { position, .. } => Some(*position),
        }
    }

    /// Converts a byte-offset position into a line/column pair within `input`.
    ///
    /// Returns `None` for errors without a byte offset (parser errors are
    /// positioned by token index) or when the offset is out of range.
    pub fn locate(&self, input: &str) -> Option<Location> {
        match self.position()? {
            Position::Offset(offset) => locate_offset(input, offset),
            Position::Token(_) => None,
        }
    }
}

/// Computes the 1-indexed line and column of a byte offset.
pub(crate) fn locate_offset(input: &str, offset: usize) -> Option<Location> {
    let before = input.get(..offset)?;
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    Some(Location { line, column })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DecodeError::UnexpectedToken {
            position: Position::Token(3),
            token: "]".to_string(),
        };
        assert_eq!(error.to_string(), "unexpected token ']' at token 3");

        let error = DecodeError::InvalidNumber {
            position: Position::Offset(2),
            detail: "expected a digit after '.'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid number at byte 2: expected a digit after '.'"
        );
        assert_eq!(DecodeError::EmptyInput.to_string(), "empty input");
    }

    #[test]
    fn test_error_kind_and_position() {
        let error = DecodeError::UnexpectedEof {
            position: Position::Offset(0),
        };
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(error.position(), Some(Position::Offset(0)));

        assert_eq!(DecodeError::EmptyTokens.kind(), ErrorKind::EmptyTokens);
        assert_eq!(DecodeError::EmptyTokens.position(), None);
    }

    #[test]
    fn test_locate() {
        let input = "{\n  \"k\": é?\n}";
        let error = DecodeError::UnexpectedToken {
            position: Position::Offset(input.find('?').unwrap()),
            token: "?".to_string(),
        };
        assert_eq!(
            error.locate(input),
            Some(Location { line: 2, column: 9 })
        );

        let error = DecodeError::MultipleRootElements {
            position: Position::Token(2),
            token: "x".to_string(),
        };
        assert_eq!(error.locate(input), None);
        assert_eq!(locate_offset("abc", 10), None);
    }
}
