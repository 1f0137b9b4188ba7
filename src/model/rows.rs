//! Canonical row collection
//!
//! Rows keep insertion order; ids are unique. `update` and `delete` on an
//! unknown id are no-ops.

use std::collections::HashSet;

use super::row::{Row, Value};
use crate::error::{Result, TableError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from rows, dropping later duplicates of an id
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut store = Self::new();
        store.set_all(rows);
        store
    }

    /// Replace the whole collection
    pub fn set_all(&mut self, rows: Vec<Row>) {
        let mut seen = HashSet::with_capacity(rows.len());
        let before = rows.len();
        self.rows = rows
            .into_iter()
            .filter(|row| seen.insert(row.id().to_string()))
            .collect();
        if self.rows.len() != before {
            tracing::warn!(
                dropped = before - self.rows.len(),
                "set_all dropped rows with duplicate ids"
            );
        }
    }

    /// Append a row; its id must not already exist
    pub fn add(&mut self, row: Row) -> Result<()> {
        if self.contains(row.id()) {
            return Err(TableError::DuplicateRow {
                id: row.id().to_string(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Merge fields into an existing row. Returns false if the id is unknown.
    pub fn update(&mut self, id: &str, partial: impl IntoIterator<Item = (String, Value)>) -> bool {
        match self.rows.iter_mut().find(|row| row.id() == id) {
            Some(row) => {
                row.merge(partial);
                true
            }
            None => {
                tracing::debug!(id, "update on unknown row ignored");
                false
            }
        }
    }

    /// Remove a row. Returns the removed row, if any.
    pub fn delete(&mut self, id: &str) -> Option<Row> {
        let index = self.rows.iter().position(|row| row.id() == id)?;
        Some(self.rows.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
