use crate::collection::Document;
use std::fmt::{Debug, Display, Formatter};

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Represents a [Document] value. It can be a simple value like [Value::Number],
/// [Value::String] or a complex value like [Value::Document] or [Value::Array].
///
/// # Purpose
/// Provides a unified representation for all value types that can be stored in
/// Tablite documents. The variant set deliberately mirrors the JSON data model
/// so that any document survives a round trip through the interchange format.
///
/// # Variants
/// - Null: Absence of a value
/// - Bool(bool): Boolean true/false
/// - Number(f64): All numbers, stored as 64-bit floats
/// - String(String): Text value
/// - Document(Document): Nested document/object
/// - Array(Vec<Value>): Ordered collection of values
///
/// # Characteristics
/// - **Flexible**: Supports any JSON-compatible shape at any nesting depth
/// - **Comparable**: Structural equality, with `NaN == NaN` so that equality
///   stays reflexive for matching purposes
/// - **Serializable**: Serializes untagged, so the JSON form carries no enum noise
/// - **Default**: Defaults to Null
///
/// # Usage
/// Create values using the From trait or the `doc_value!` macro:
/// ```text
/// let v1: Value = 42.into();           // From i32
/// let v2 = Value::from("hello");       // From &str
/// let v3 = doc_value!({ code: 200 });  // Nested document value
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a numeric value.
    Number(f64),
    /// Represents a string value.
    String(String),
    /// Represents a nested document.
    Document(Document),
    /// Represents an array of values.
    Array(Vec<Value>),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(text) => write!(f, "{}", text),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => *a == *b,
            (Value::Number(a), Value::Number(b)) => num_eq_float(*a, *b),
            (Value::String(a), Value::String(b)) => *a == *b,
            (Value::Document(a), Value::Document(b)) => *a == *b,
            (Value::Array(a), Value::Array(b)) => *a == *b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Returns the boolean value if this is a [Value::Bool].
    pub fn as_bool(&self) -> Option<&bool> {
        match self {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the numeric value if this is a [Value::Number].
    pub fn as_number(&self) -> Option<&f64> {
        match self {
            Value::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string value if this is a [Value::String].
    pub fn as_string(&self) -> Option<&String> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested document if this is a [Value::Document].
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested document mutably if this is a [Value::Document].
    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Document(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the array if this is a [Value::Array].
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the array mutably if this is a [Value::Array].
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns the name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Document(_) => "document",
            Value::Array(_) => "array",
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    #[inline]
    fn from(value: i8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u8> for Value {
    #[inline]
    fn from(value: u8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i16> for Value {
    #[inline]
    fn from(value: i16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u16> for Value {
    #[inline]
    fn from(value: u16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(value: u64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Document> for Value {
    #[inline]
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_default_is_null() {
        let value = Value::default();
        assert!(value.is_null());
    }

    #[test]
    fn test_numeric_conversions_share_representation() {
        assert_eq!(Value::from(42i32), Value::from(42.0f64));
        assert_eq!(Value::from(42u64), Value::from(42i8));
        assert_ne!(Value::from(42i32), Value::from(43i32));
    }

    #[test]
    fn test_nan_equals_nan() {
        let a = Value::from(f64::NAN);
        let b = Value::from(f64::NAN);
        assert_eq!(a, b);
        assert_ne!(a, Value::from(1.0));
    }

    #[test]
    fn test_cross_variant_equality_is_false() {
        assert_ne!(Value::from("1"), Value::from(1i32));
        assert_ne!(Value::from(true), Value::from(1i32));
        assert_ne!(Value::Null, Value::from(false));
    }

    #[test]
    fn test_document_equality_is_structural() {
        let a = Value::from(doc! { status: { code: 200 } });
        let b = Value::from(doc! { status: { code: 200 } });
        let c = Value::from(doc! { status: { code: 500 } });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_accessors() {
        let value = Value::from("hello");
        assert_eq!(value.as_string().map(String::as_str), Some("hello"));
        assert!(value.as_number().is_none());

        let value = Value::from(2.5);
        assert_eq!(value.as_number(), Some(&2.5));

        let value = Value::from(vec![Value::from(1), Value::from(2)]);
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(Document::new()).type_name(), "document");
        assert_eq!(Value::from(Vec::new()).type_name(), "array");
    }

    #[test]
    fn test_serializes_untagged() {
        let value = Value::from(doc! { key: "A", count: 2 });
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"key":"A","count":2.0}"#);
    }

    #[test]
    fn test_deserializes_json_shapes() {
        let value: Value = serde_json::from_str(r#"{"a": 1, "b": [true, null, "x"]}"#).unwrap();
        let document = value.as_document().unwrap();
        assert_eq!(document.get("a"), Some(&Value::from(1)));

        let array = document.get("b").and_then(Value::as_array).unwrap();
        assert_eq!(array[0], Value::from(true));
        assert_eq!(array[1], Value::Null);
        assert_eq!(array[2], Value::from("x"));
    }

    #[test]
    fn test_display_renders_json() {
        let value = Value::from(doc! { key: "A" });
        let rendered = format!("{}", value);
        assert!(rendered.contains("\"key\": \"A\""));
    }
}
