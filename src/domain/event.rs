//! Event records
//!
//! [`Record`] is the narrow interface the anonymizer needs from a host
//! pipeline's record type. [`Event`] implements it over a JSON object, with
//! support for bracketed nested field references such as `[user][email]`.

use super::errors::{AnonymizeError, TransformationError};
use super::result::Result;
use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named-field access required by the anonymizer
pub trait Record {
    /// True when the field exists on the record
    fn has_field(&self, name: &str) -> bool;

    /// Read a field
    ///
    /// Returns `Ok(None)` for an absent field and an error when the stored
    /// value cannot be expressed as a [`FieldValue`].
    fn get_field(&self, name: &str) -> std::result::Result<Option<FieldValue>, TransformationError>;

    /// Overwrite a field
    fn set_field(&mut self, name: &str, value: FieldValue);
}

/// A structured event backed by a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an event from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(AnonymizeError::Serialization(format!(
                "event must be a JSON object, got {}",
                if other.is_array() { "an array" } else { "a scalar" }
            ))),
        }
    }

    /// Parse one JSON line into an event
    pub fn from_json_str(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        Self::from_value(value)
    }

    /// Serialize the event as a single JSON line
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Consume the event and return the underlying JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Look up a field by name or bracketed reference
    pub fn get(&self, name: &str) -> Option<&Value> {
        let path = field_path(name);
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.fields.get(*first)?, |current, segment| {
                current.as_object()?.get(*segment)
            })
    }

    /// Insert or replace a field by name or bracketed reference
    ///
    /// Missing intermediate objects are created.
    pub fn insert(&mut self, name: &str, value: Value) {
        let path = field_path(name);
        let Some((last, parents)) = path.split_last() else {
            return;
        };

        let mut current = &mut self.fields;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// Top-level field names, in storage order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The `type` field, when it is a string
    pub fn event_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// String entries of the `tags` array
    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get("tags") {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for Event {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl Record for Event {
    fn has_field(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn get_field(&self, name: &str) -> std::result::Result<Option<FieldValue>, TransformationError> {
        self.get(name).map(FieldValue::try_from).transpose()
    }

    fn set_field(&mut self, name: &str, value: FieldValue) {
        self.insert(name, value.into());
    }
}

/// Split a field reference into its path segments
///
/// `[a][b]` addresses member `b` of object `a`; any other name is a single
/// literal top-level key (dots included).
fn field_path(name: &str) -> Vec<&str> {
    if let Some(inner) = name
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let segments: Vec<&str> = inner.split("][").collect();
        if segments.iter().all(|s| !s.is_empty() && !s.contains(['[', ']'])) {
            return segments;
        }
    }
    vec![name]
}
