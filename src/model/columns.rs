//! Column schema, order and visibility
//!
//! The order of `ColumnRegistry::columns` is authoritative for display,
//! export and reordering.

use serde::{Deserialize, Serialize};

use super::row::Value;
use crate::error::{Result, TableError};

/// Value type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Email,
}

impl ColumnType {
    /// Parse a type name as used on the command line (`text`, `number`, `email`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" => Some(ColumnType::Text),
            "number" => Some(ColumnType::Number),
            "email" => Some(ColumnType::Email),
            _ => None,
        }
    }

    /// Convert raw cell text into a value of this type.
    ///
    /// Number columns accept any finite decimal; blank input counts as 0.
    pub fn coerce(self, column_id: &str, raw: &str) -> Result<Value> {
        match self {
            ColumnType::Text => Ok(Value::text(raw)),
            ColumnType::Email => Ok(Value::email(raw)),
            ColumnType::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(Value::Number(0.0));
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Value::Number(n)),
                    _ => Err(TableError::Validation {
                        column: column_id.to_string(),
                        input: raw.to_string(),
                    }),
                }
            }
        }
    }
}

/// Schema entry for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub visible: bool,
    pub sortable: bool,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl Column {
    /// A visible, sortable column
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: true,
            sortable: true,
            kind,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Derive a column id from a display label: lowercase, whitespace runs
/// collapsed to a single underscore.
pub fn derive_column_id(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate ids
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut registry = Self::new();
        registry.set_all(columns)?;
        Ok(registry)
    }

    /// Ordered columns
    pub fn list(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns in display order
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Flip visibility. Returns false (no-op) for an unknown id.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) => {
                column.visible = !column.visible;
                true
            }
            None => false,
        }
    }

    /// Append a column whose id is derived from `label`
    pub fn add_column(&mut self, label: &str, kind: ColumnType) -> Result<&Column> {
        let label = label.trim();
        let id = derive_column_id(label);
        if id.is_empty() {
            return Err(TableError::EmptyColumnLabel);
        }
        if self.get(&id).is_some() {
            return Err(TableError::DuplicateColumn { id });
        }
        self.columns.push(Column::new(id, label, kind));
        Ok(&self.columns[self.columns.len() - 1])
    }

    /// Move `from_id` to the current position of `to_id`, shifting the
    /// columns in between. Returns false (no-op) if either id is unknown.
    pub fn reorder(&mut self, from_id: &str, to_id: &str) -> bool {
        let (Some(from), Some(to)) = (self.position(from_id), self.position(to_id)) else {
            return false;
        };
        if from != to {
            let column = self.columns.remove(from);
            self.columns.insert(to, column);
        }
        true
    }

    /// Replace the whole schema; ids must be unique
    pub fn set_all(&mut self, columns: Vec<Column>) -> Result<()> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(TableError::DuplicateColumn {
                    id: column.id.clone(),
                });
            }
        }
        self.columns = columns;
        Ok(())
    }
}
