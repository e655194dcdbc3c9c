//! Dataset intake
//!
//! Turns uploaded text into a dataset. A JSON array or object is used as-is
//! and a falsy JSON scalar (`null`, `false`, `0`, `""`) is empty. Anything
//! else falls back to one `{"id", "content"}` record per non-blank line.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Dataset errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The dataset has zero records
    #[error("No data found")]
    Empty,
}

/// An arbitrary JSON dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset(Value);

impl Dataset {
    /// Wraps a JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Number of records
    ///
    /// Arrays count elements, objects count keys, `null` counts zero and any
    /// other scalar counts as a single record.
    pub fn record_count(&self) -> usize {
        match &self.0 {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Fails with [`DatasetError::Empty`] when there is nothing to encrypt
    pub fn ensure_not_empty(&self) -> Result<(), DatasetError> {
        if self.is_empty() {
            Err(DatasetError::Empty)
        } else {
            Ok(())
        }
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the underlying JSON value
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Dataset {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Parses uploaded file content into a dataset
///
/// Never fails. Callers check emptiness separately.
pub fn parse_dataset(content: &str) -> Dataset {
    match serde_json::from_str::<Value>(content) {
        Ok(value @ (Value::Array(_) | Value::Object(_))) => Dataset(value),
        Ok(value) if is_falsy(&value) => Dataset(Value::Null),
        _ => Dataset(parse_lines(content)),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Line-delimited fallback
///
/// Line ids are positions in the trimmed text, so blank lines leave gaps.
fn parse_lines(content: &str) -> Value {
    let records = content
        .trim()
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            (!line.is_empty()).then(|| json!({ "id": idx, "content": line }))
        })
        .collect();

    Value::Array(records)
}
