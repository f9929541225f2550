//! Contains the `Value` enum, the decoded representation of a JSON document.
use crate::DecodeError;
use std::collections::BTreeMap;

/// The map type backing `Value::Object`.
///
/// Keys are unique; when a document repeats a key, the last occurrence wins.
pub type Map = BTreeMap<String, Value>;

/// A native Rust representation of any decoded JSON value.
///
/// Arrays and objects own their children, so a `Value` tree can never
/// contain a cycle.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    /// A number written without fraction or exponent, as a signed 64-bit integer.
    Integer(i64),
    /// A number written with a fraction and/or exponent.
    Float(f64),
    /// A JSON string, already unescaped.
    String(String),
    /// A JSON array.
    Array(Vec<Value>),
    /// A JSON object.
    Object(Map),
}

impl Value {
    /// Decodes a JSON document into a `Value`.
    ///
    /// Equivalent to [`crate::decode`].
    ///
    /// # Errors
    /// Returns the first `DecodeError` encountered.
    pub fn parse(input: &str) -> Result<Value, DecodeError> {
        crate::decode(input)
    }

    /// A short name for the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as an `f64`. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut map = Map::new();
        map.insert("n".to_string(), Value::Integer(3));
        map.insert("s".to_string(), Value::String("x".to_string()));
        let obj = Value::Object(map);

        assert_eq!(obj.get("n").and_then(Value::as_i64), Some(3));
        assert_eq!(obj.get("n").and_then(Value::as_f64), Some(3.0));
        assert_eq!(obj.get("s").and_then(Value::as_str), Some("x"));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(obj.type_name(), "object");

        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::Array(vec![]).as_array().map(Vec::len), Some(0));
        assert_eq!(Value::Array(vec![]).get("k"), None);
    }
}
