//! # cc-json
//!
//! `cc-json` is a strict, fail-fast JSON decoder built from scratch in
//! pure Rust. It turns JSON text into a dynamically typed [`Value`] tree
//! in two stages:
//!
//! 1. A byte-based [`Tokenizer`] scans the input once, left to right,
//!    producing typed [`Token`]s (strings already unescaped, numbers kept
//!    as their raw lexeme).
//! 2. A recursive-descent [`Parser`] consumes the tokens with one token
//!    of lookahead and builds the tree.
//!
//! The first error at either stage aborts the decode; there is no
//! recovery and no partial result.
//!
//! ## Quick Start
//!
//! ```
//! use cc_json::{decode, Value};
//!
//! let value = decode(r#"{"foo": "bar", "baz": 3.14}"#).unwrap();
//! assert_eq!(value.get("foo").and_then(Value::as_str), Some("bar"));
//! assert_eq!(value.get("baz").and_then(Value::as_f64), Some(3.14));
//! ```
//!
//! The root of a document must be an object or an array:
//!
//! ```
//! use cc_json::{decode, ErrorKind};
//!
//! let err = decode("42").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidRootObject);
//! ```

/// Contains the `DecodeError` type and its position helpers.
pub mod error;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the `Token` and `TokenKind` types.
pub mod token;
/// Contains the byte-based `Tokenizer`.
pub mod tokenizer;
/// Contains the `Value` enum.
pub mod value;

pub use error::{DecodeError, ErrorKind, Location, Position};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
pub use value::{Map, Value};

use tracing::{debug, trace};

// --- Constants ---
/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum size of an input document (10MB).
pub const MAX_JSON_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Limits applied by [`decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// The deepest allowed nesting of objects and arrays.
    pub max_depth: usize,
    /// The largest accepted input, in bytes.
    pub max_input_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: MAX_JSON_SIZE_BYTES,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}

// --- Public-facing entry points ---

/// Decodes a JSON document into a [`Value`] using the default limits.
///
/// On success the root is always a `Value::Object` or `Value::Array`.
///
/// # Errors
/// Returns the first [`DecodeError`] raised by the tokenizer or parser.
///
/// # Examples
/// ```
/// use cc_json::{decode, Value};
///
/// assert_eq!(decode("[]").unwrap(), Value::Array(vec![]));
/// assert!(decode("").is_err());
/// ```
pub fn decode(input: &str) -> Result<Value, DecodeError> {
    decode_with(input, &DecodeOptions::default())
}

/// Decodes a JSON document into a [`Value`] under the given limits.
///
/// # Errors
/// Returns `DecodeError::InputTooLarge` before any scanning if `input`
/// exceeds `options.max_input_bytes`, otherwise the first error raised
/// by the tokenizer or parser.
pub fn decode_with(input: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
    if input.len() > options.max_input_bytes {
        return Err(DecodeError::InputTooLarge {
            size: input.len(),
            limit: options.max_input_bytes,
        });
    }

    debug!(bytes = input.len(), "decoding JSON input");
    let tokens = tokenize(input)?;
    trace!(tokens = tokens.len(), "tokenized input");

    Parser::with_max_depth(tokens, options.max_depth).parse()
}

// --- End-to-end Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;

    /// Maps a decoded `Value` onto `serde_json`'s model for comparison.
    fn to_serde(value: &Value) -> SerdeValue {
        match value {
            Value::Null => SerdeValue::Null,
            Value::Bool(b) => SerdeValue::Bool(*b),
            Value::Integer(n) => SerdeValue::from(*n),
            Value::Float(f) => SerdeValue::from(*f),
            Value::String(s) => SerdeValue::String(s.clone()),
            Value::Array(a) => SerdeValue::Array(a.iter().map(to_serde).collect()),
            Value::Object(o) => SerdeValue::Object(
                o.iter()
                    .map(|(k, v)| (k.clone(), to_serde(v)))
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode("").unwrap_err(), DecodeError::EmptyInput);
    }

    #[test]
    fn test_decode_empty_containers() {
        assert_eq!(decode("{}").unwrap(), Value::Object(Map::new()));
        assert_eq!(decode("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(decode(" [ { } ] ").unwrap(), Value::Array(vec![Value::Object(Map::new())]));
    }

    #[test]
    fn test_decode_simple_object() {
        let value = decode(r#"{"foo":"bar","baz":3.14}"#).unwrap();
        let mut expected = Map::new();
        expected.insert("foo".to_string(), Value::String("bar".to_string()));
        expected.insert("baz".to_string(), Value::Float(3.14));
        assert_eq!(value, Value::Object(expected));
    }

    #[test]
    fn test_decode_error_classification() {
        let cases = [
            (r#""foo"#, ErrorKind::UnexpectedEof),
            ("tru", ErrorKind::UnexpectedEof),
            ("fals", ErrorKind::UnexpectedEof),
            ("[tru]", ErrorKind::UnexpectedToken),
            ("0.", ErrorKind::InvalidNumber),
            (r#"{} "x""#, ErrorKind::MultipleRootElements),
            (r#"["a",]"#, ErrorKind::UnexpectedToken),
            ("\"a\tb\"", ErrorKind::InvalidCharacter),
            (r#"["\q"]"#, ErrorKind::InvalidCharacter),
            ("true", ErrorKind::InvalidRootObject),
            ("   ", ErrorKind::EmptyTokens),
            ("[01]", ErrorKind::InvalidNumber),
            ("// comment\n[]", ErrorKind::UnexpectedToken),
        ];
        for (input, kind) in cases {
            let err = decode(input).unwrap_err();
            assert_eq!(err.kind(), kind, "input: {:?}, error: {}", input, err);
        }
    }

    #[test]
    fn test_decode_unterminated_string_position() {
        let err = decode(r#"["ok", "foo"#).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                position: Position::Offset(7)
            }
        );
        assert_eq!(
            decode(r#""foo"#).unwrap_err().position(),
            Some(Position::Offset(0))
        );
    }

    #[test]
    fn test_decode_error_location() {
        let input = "{\n  \"key\": [1, 2, ?]\n}";
        let err = decode(input).unwrap_err();
        assert_eq!(err.locate(input), Some(Location { line: 2, column: 17 }));
    }

    #[test]
    fn test_decode_matches_reference_decoder() {
        let documents = [
            r#"{"name": "Babbage", "age": 30, "admin": true, "tags": []}"#,
            r#"[1, -2, 3.5, -0.25, 1e3, 2E-2, 2.5e+2]"#,
            r#"{"nested": {"key": [null, 1, 1.23e4, {"deep": [[], [[]]]}]}}"#,
            r#"["\"quoted\"", "back\\slash", "sl\/ash", "\b\f\n\r\t", "é中"]"#,
            r#"{"emoji": "😀", "raw": "héllo ✓"}"#,
            "[\n\t{ \"a\" : 1 } ,\r\n\t{ \"b\" : [ true , false , null ] }\n]",
            r#"{"k": 1, "k": 2}"#,
        ];
        for input in documents {
            let ours = decode(input).unwrap_or_else(|e| panic!("{}: {}", input, e));
            let reference: SerdeValue = serde_json::from_str(input).unwrap();
            assert_eq!(to_serde(&ours), reference, "input: {}", input);
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        for input in [r#"{"a": [1, 2.5, "x"]}"#, "[1, 2,]", "0.", ""] {
            let first = decode(input);
            let second = decode(input);
            assert_eq!(first, second);
            if let (Err(a), Err(b)) = (&first, &second) {
                assert_eq!(a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn test_decode_with_limits() {
        let options = DecodeOptions::default().with_max_input_bytes(4);
        assert_eq!(
            decode_with("[1, 2]", &options).unwrap_err(),
            DecodeError::InputTooLarge { size: 6, limit: 4 }
        );
        assert!(decode_with("[1]", &options).is_ok());

        let evil_input = "[".repeat(DEFAULT_MAX_DEPTH + 1) + &"]".repeat(DEFAULT_MAX_DEPTH + 1);
        assert_eq!(
            decode(&evil_input).unwrap_err().kind(),
            ErrorKind::DepthLimitExceeded
        );
        let ok_input = "[".repeat(DEFAULT_MAX_DEPTH) + &"]".repeat(DEFAULT_MAX_DEPTH);
        assert!(decode(&ok_input).is_ok());

        let shallow = DecodeOptions::default().with_max_depth(1);
        assert!(decode_with("[1]", &shallow).is_ok());
        assert_eq!(
            decode_with("[[1]]", &shallow).unwrap_err().kind(),
            ErrorKind::DepthLimitExceeded
        );
    }

    #[test]
    fn test_value_parse_alias() {
        assert_eq!(Value::parse("[true]").unwrap(), decode("[true]").unwrap());
    }
}
