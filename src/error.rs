//! Error taxonomy for the table engine
//!
//! None of these are fatal. Import/export and column errors are surfaced to
//! the user as notifications; `Validation` never leaves the edit commit path.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by table-state transitions and the CSV bridge
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Numeric edit input that does not parse; recovered by reverting the field
    #[error("invalid value {input:?} for number column '{column}'")]
    Validation { column: String, input: String },

    /// A column with the derived id already exists
    #[error("a column with id '{id}' already exists")]
    DuplicateColumn { id: String },

    /// Column label is blank after trimming
    #[error("column label must not be empty")]
    EmptyColumnLabel,

    /// A row with this id already exists
    #[error("a row with id '{id}' already exists")]
    DuplicateRow { id: String },

    /// Selected input is not a CSV file
    #[error("please select a valid CSV file (got '{name}')")]
    ImportFormat { name: String },

    /// Only one file import may be in flight at a time
    #[error("an import is already in progress")]
    ImportInProgress,

    /// Malformed CSV
    #[error("{}", format_parse_error(.message, .line))]
    Parse {
        message: String,
        line: Option<u64>,
    },

    /// Well-formed CSV without a single data record
    #[error("no valid data found in CSV file")]
    EmptyImport,

    /// CSV serialization failure
    #[error("error exporting data: {message}")]
    Export { message: String },

    /// File read/write failure
    #[error("{}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Snapshot serialization failure
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}

fn format_parse_error(message: &str, line: &Option<u64>) -> String {
    match line {
        Some(line) => format!("CSV parse error at line {}: {}", line, message),
        None => format!("CSV parse error: {}", message),
    }
}

impl TableError {
    /// Build an `Io` error from a path and an `std::io::Error`
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        TableError::Parse {
            message: err.to_string(),
            line,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Snapshot {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_line() {
        let err = TableError::Parse {
            message: "found record with 3 fields".to_string(),
            line: Some(4),
        };
        assert_eq!(
            err.to_string(),
            "CSV parse error at line 4: found record with 3 fields"
        );
    }

    #[test]
    fn test_parse_error_display_without_line() {
        let err = TableError::Parse {
            message: "bad".to_string(),
            line: None,
        };
        assert_eq!(err.to_string(), "CSV parse error: bad");
    }

    #[test]
    fn test_duplicate_column_display() {
        let err = TableError::DuplicateColumn {
            id: "start_date".to_string(),
        };
        assert!(err.to_string().contains("start_date"));
    }
}
