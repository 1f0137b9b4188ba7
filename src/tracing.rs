//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! table state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=state=debug,message=debug` - scoped filtering
//! - `RUST_LOG=tabula::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tabula/logs/tabula.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{SortDirection, TableModel};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to `~/.config/tabula/logs/tabula.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG, stderr keeps stdout clean for output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tabula.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of table state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub row_count: usize,
    pub column_order: Vec<String>,
    pub visible_count: usize,
    pub search: String,
    pub sort: Option<(String, SortDirection)>,
    pub page_index: usize,
    pub edit_mode: bool,
    pub editing: Vec<String>,
}

impl StateSnapshot {
    pub fn from_model(model: &TableModel) -> Self {
        Self {
            row_count: model.rows.len(),
            column_order: model.columns.list().iter().map(|c| c.id.clone()).collect(),
            visible_count: model.columns.visible().count(),
            search: model.query.search_text.clone(),
            sort: model
                .query
                .sort
                .as_ref()
                .map(|s| (s.column_id.clone(), s.direction)),
            page_index: model.query.page_index,
            edit_mode: model.edits.is_enabled(),
            editing: model
                .edits
                .editing_rows()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if self.column_order != other.column_order {
            changes.push(format!(
                "columns: [{}] → [{}]",
                self.column_order.join(","),
                other.column_order.join(",")
            ));
        }
        if self.visible_count != other.visible_count {
            changes.push(format!(
                "visible: {} → {}",
                self.visible_count, other.visible_count
            ));
        }
        if self.search != other.search {
            changes.push(format!("search: {:?} → {:?}", self.search, other.search));
        }
        if self.sort != other.sort {
            changes.push(format!("sort: {:?} → {:?}", self.sort, other.sort));
        }
        if self.page_index != other.page_index {
            changes.push(format!("page: {} → {}", self.page_index, other.page_index));
        }
        if self.edit_mode != other.edit_mode {
            changes.push(format!("edit mode: {}", other.edit_mode));
        }
        if self.editing != other.editing {
            changes.push(format!("editing: {:?}", other.editing));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
