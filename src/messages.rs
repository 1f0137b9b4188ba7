//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::error::TableError;
use crate::model::{Column, ColumnType, Row};

/// Search, sort, pagination and row-level messages
#[derive(Debug, Clone)]
pub enum TableMsg {
    /// Set the search text (resets to the first page)
    Search(String),
    /// Sort on a column; repeating flips asc/desc
    Sort(String),
    /// Go to a 0-based page
    SetPage(usize),
    /// Go to the next page, if any
    NextPage,
    /// Go to the previous page, if any
    PrevPage,
    /// Append a row (an empty id gets a generated one)
    AddRow(Row),
    /// Delete a row by id
    DeleteRow(String),
}

/// Inline editing messages
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Turn edit mode on or off
    SetEditMode(bool),
    /// Flip edit mode
    ToggleEditMode,
    /// Open a row for editing
    Begin(String),
    /// Store uncommitted cell text for a row under edit
    SetBuffer {
        row_id: String,
        column_id: String,
        text: String,
    },
    /// Commit the row's buffer plus these fields (column id, raw text)
    Commit {
        row_id: String,
        fields: Vec<(String, String)>,
    },
    /// Close the row without saving
    Cancel(String),
}

/// Column schema messages
#[derive(Debug, Clone)]
pub enum ColumnMsg {
    ToggleVisibility(String),
    Add { label: String, kind: ColumnType },
    /// Move `from` to the current position of `to`
    Reorder { from: String, to: String },
    /// Replace the whole schema
    SetAll(Vec<Column>),
}

/// CSV import/export messages
#[derive(Debug, Clone)]
pub enum CsvMsg {
    /// Import CSV text synchronously
    Import(String),
    /// Read and parse a CSV file in the background
    ImportFile(PathBuf),
    /// Background parse finished
    ImportParsed {
        path: PathBuf,
        result: Result<Vec<Row>, TableError>,
    },
    /// Write an export file into a directory
    ExportToDir(PathBuf),
    /// Background export write finished
    ExportCompleted {
        rows: usize,
        result: Result<PathBuf, TableError>,
    },
}

/// Notification housekeeping
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Drop the notification if it has expired
    Tick,
    /// Dismiss the notification
    ClearNotification,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Table(TableMsg),
    Edit(EditMsg),
    Column(ColumnMsg),
    Csv(CsvMsg),
    Ui(UiMsg),
}
