//! Field value model
//!
//! A field handed to the anonymizer is either a single [`Scalar`] or an
//! ordered sequence of scalars. The shape is decided once, when the value is
//! read from the record, so strategies only ever see one scalar at a time.

use super::errors::TransformationError;
use serde_json::Value;
use std::fmt;

/// A single anonymizable value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// Textual value
    Text(String),
    /// Integer value
    Integer(i64),
}

impl Scalar {
    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Text(_) => "string",
            Scalar::Integer(_) => "integer",
        }
    }

    /// Returns the text if this is a textual scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Integer(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

/// Value of a record field as seen by the anonymizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value
    Scalar(Scalar),
    /// An ordered list of values
    Sequence(Vec<Scalar>),
}

impl FieldValue {
    /// Apply `f` to the scalar, or to every element of the sequence
    ///
    /// Sequences keep their length and order. The first failing element
    /// aborts the whole map so a field is never left half-transformed.
    pub fn try_map<F>(&self, mut f: F) -> Result<FieldValue, TransformationError>
    where
        F: FnMut(&Scalar) -> Result<Scalar, TransformationError>,
    {
        match self {
            FieldValue::Scalar(s) => f(s).map(FieldValue::Scalar),
            FieldValue::Sequence(items) => items
                .iter()
                .map(f)
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Sequence),
        }
    }

    /// Number of scalars held by this value
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Scalar(_) => 1,
            FieldValue::Sequence(items) => items.len(),
        }
    }

    /// True for an empty sequence
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Text(s) => Value::String(s),
            Scalar::Integer(i) => Value::from(i),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Scalar(s) => s.into(),
            FieldValue::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl TryFrom<&Value> for Scalar {
    type Error = TransformationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Integer)
                .ok_or_else(|| TransformationError::UnsupportedShape(number_kind(n).to_string())),
            other => Err(TransformationError::UnsupportedShape(
                json_kind(other).to_string(),
            )),
        }
    }
}

impl TryFrom<&Value> for FieldValue {
    type Error = TransformationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(Scalar::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Sequence),
            other => Scalar::try_from(other).map(FieldValue::Scalar),
        }
    }
}

fn number_kind(n: &serde_json::Number) -> &'static str {
    if n.is_u64() {
        "unsigned integer out of range"
    } else {
        "float"
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "nested array",
        Value::Object(_) => "object",
    }
}
