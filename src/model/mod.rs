//! Table model - the complete state of the table engine
//!
//! This module contains all the state types following the Elm Architecture
//! pattern. `TableModel` is the only mutable instance; it is changed
//! exclusively through `update`.

pub mod columns;
pub mod edit_session;
pub mod notification;
pub mod query;
pub mod row;
pub mod rows;

pub use columns::{derive_column_id, Column, ColumnRegistry, ColumnType};
pub use edit_session::EditSession;
pub use notification::{Notification, Severity, NOTIFICATION_DURATION};
pub use query::{Query, SortDirection, SortSpec, PAGE_SIZE};
pub use row::{Row, Value};
pub use rows::RowStore;

use std::path::PathBuf;

use crate::view::{self, View};

/// The complete table model
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    /// Canonical rows
    pub rows: RowStore,
    /// Column schema, order and visibility
    pub columns: ColumnRegistry,
    /// Search / sort / page
    pub query: Query,
    /// Rows under inline edit
    pub edits: EditSession,
    /// Last user-visible notification
    pub notification: Option<Notification>,
    /// File currently being read and parsed for import
    pub pending_import: Option<PathBuf>,
}

impl TableModel {
    /// Create a model from rows and columns
    pub fn new(rows: RowStore, columns: ColumnRegistry) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Default columns with the five sample people
    pub fn with_sample_data() -> Self {
        Self::new(RowStore::from_rows(sample_rows()), default_columns())
    }

    /// Default columns with no rows
    pub fn with_default_columns() -> Self {
        Self::new(RowStore::new(), default_columns())
    }

    /// Derive the currently visible page
    pub fn view(&self) -> View<'_> {
        view::derive(self.rows.rows(), &self.columns, &self.query)
    }

    /// Number of rows matching the current search
    pub fn filtered_count(&self) -> usize {
        view::filter_rows(self.rows.rows(), &self.query.search_text).len()
    }

    /// Re-clamp the page index against the filtered row count
    pub fn clamp_page(&mut self) {
        let total = self.filtered_count();
        self.query.clamp_page(total);
    }

    /// Drop a sort whose column is no longer registered
    pub fn reconcile_sort(&mut self) {
        let stale = self
            .query
            .sort
            .as_ref()
            .is_some_and(|sort| self.columns.get(&sort.column_id).is_none());
        if stale {
            tracing::debug!("sort column no longer exists, clearing sort");
            self.query.sort = None;
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(text = %notification.text, "notification"),
            Severity::Error => tracing::warn!(text = %notification.text, "notification"),
        }
        self.notification = Some(notification);
    }

    /// Invariant checks (debug builds)
    pub fn assert_invariants(&self) {
        self.edits.assert_invariants();
        if let Some(sort) = &self.query.sort {
            debug_assert!(
                self.columns.get(&sort.column_id).is_some(),
                "sort column '{}' must be registered",
                sort.column_id
            );
        }
    }
}

/// The six built-in columns
pub fn default_columns() -> ColumnRegistry {
    let columns = vec![
        Column::new("name", "Name", ColumnType::Text),
        Column::new("email", "Email", ColumnType::Email),
        Column::new("age", "Age", ColumnType::Number),
        Column::new("role", "Role", ColumnType::Text),
        Column::new("department", "Department", ColumnType::Text).hidden(),
        Column::new("location", "Location", ColumnType::Text).hidden(),
    ];
    ColumnRegistry::from_columns(columns).unwrap_or_default()
}

/// Sample people used to seed a fresh table
pub fn sample_rows() -> Vec<Row> {
    let people = [
        ("1", "John Doe", "john.doe@example.com", 28, "Developer", "Engineering", "New York"),
        ("2", "Jane Smith", "jane.smith@example.com", 32, "Designer", "Design", "San Francisco"),
        ("3", "Mike Johnson", "mike.johnson@example.com", 35, "Manager", "Management", "Chicago"),
        ("4", "Sarah Wilson", "sarah.wilson@example.com", 29, "Developer", "Engineering", "Austin"),
        ("5", "David Brown", "david.brown@example.com", 41, "Director", "Management", "Boston"),
    ];

    people
        .into_iter()
        .map(|(id, name, email, age, role, department, location)| {
            Row::new(id)
                .with("name", name)
                .with("email", Value::email(email))
                .with("age", age as i64)
                .with("role", role)
                .with("department", department)
                .with("location", location)
        })
        .collect()
}
