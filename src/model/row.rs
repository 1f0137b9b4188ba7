//! Row and cell value types
//!
//! A row is an id plus an ordered list of `(column id, value)` pairs. Fields
//! are not tied to the current schema: rows may carry fields for columns
//! that were never registered (CSV extras) or that a column was added for
//! after the row was created (absent field reads as empty).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Text(String),
    Number(f64),
    Email(String),
}

impl Value {
    /// Shorthand for a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Shorthand for an email value
    pub fn email(s: impl Into<String>) -> Self {
        Value::Email(s.into())
    }

    /// Numeric view of the value, parsing text if necessary
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) | Value::Email(s) => s.trim().parse().ok(),
        }
    }

    /// Whether this value renders as an empty cell
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Number(_) => false,
            Value::Text(s) | Value::Email(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Email(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

/// One record in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: String,
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Create a row with no fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column_id, value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get a field value by column id
    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == column_id)
            .map(|(_, value)| value)
    }

    /// Display string for a field; absent fields are empty
    pub fn display(&self, column_id: &str) -> String {
        self.get(column_id).map(Value::to_string).unwrap_or_default()
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, column_id: impl Into<String>, value: impl Into<Value>) {
        let column_id = column_id.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == column_id) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column_id, value)),
        }
    }

    /// Merge a partial set of fields: only the supplied fields change
    pub fn merge(&mut self, partial: impl IntoIterator<Item = (String, Value)>) {
        for (column_id, value) in partial {
            self.set(column_id, value);
        }
    }

    /// Iterate over fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
