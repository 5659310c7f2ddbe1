use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Identifier assigned to a document at ingestion.
///
/// Ids are handed out sequentially starting at 1 and are never reused within
/// one engine instance.
pub type DocId = u64;

/// A leaf value extracted from a document for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int64(i64),
    /// Any other number, kept as parsed so it indexes as its JSON text.
    Number(Number),
    Text(String),
}

impl DataValue {
    /// The text fed to the analyzer for this value, if any.
    ///
    /// Numbers and booleans are indexed through their canonical JSON text,
    /// so `1.0` stays `1.0` and `1e20` becomes `1e+20`, exactly as the stored
    /// document serializes. Nulls and empty strings are not indexable.
    pub fn indexable_text(&self) -> Option<Cow<'_, str>> {
        match self {
            DataValue::Null => None,
            DataValue::Text(s) if s.is_empty() => None,
            DataValue::Text(s) => Some(Cow::Borrowed(s)),
            DataValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            DataValue::Int64(i) => Some(Cow::Owned(i.to_string())),
            DataValue::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }
}

impl From<&Value> for DataValue {
    /// Converts a scalar JSON value. Arrays and objects map to `Null`; they are
    /// expanded by [`flatten`] before reaching this point.
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => DataValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DataValue::Int64(i),
                None => DataValue::Number(n.clone()),
            },
            Value::String(s) => DataValue::Text(s.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => DataValue::Null,
        }
    }
}

/// A stored document.
///
/// `fields` is the mapping exactly as it was ingested; its key order is the
/// ingestion order and is preserved in search hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: DocId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Get a reference to a top-level field's value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Flatten a field mapping into `(field path, leaf value)` pairs.
///
/// Nested objects contribute `parent.child` paths. Each element of an array
/// is emitted under the array's own path, so a path may repeat.
pub fn flatten(fields: &Map<String, Value>) -> Vec<(String, DataValue)> {
    let mut out = Vec::new();
    for (name, value) in fields {
        flatten_into(name, value, &mut out);
    }
    out
}

fn flatten_into(path: &str, value: &Value, out: &mut Vec<(String, DataValue)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(&format!("{path}.{key}"), child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_into(path, item, out);
            }
        }
        scalar => out.push((path.to_string(), DataValue::from(scalar))),
    }
}
