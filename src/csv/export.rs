//! Rows → CSV

use chrono::NaiveDate;

use crate::error::{Result, TableError};
use crate::model::{ColumnRegistry, Row};

/// Write all rows as CSV, one field per visible column headed by its label.
/// Absent fields export as empty strings.
pub fn export_csv(rows: &[Row], columns: &ColumnRegistry) -> Result<String> {
    let visible: Vec<_> = columns.visible().collect();
    if visible.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(visible.iter().map(|c| c.label.as_str()))
        .map_err(export_error)?;
    for row in rows {
        writer
            .write_record(visible.iter().map(|c| row.display(&c.id)))
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}

fn export_error(err: impl std::fmt::Display) -> TableError {
    TableError::Export {
        message: err.to_string(),
    }
}

/// `data-export-<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("data-export-{}.csv", date.format("%Y-%m-%d"))
}

/// Export file name stamped with today's UTC date
pub fn export_file_name_today() -> String {
    export_file_name(chrono::Utc::now().date_naive())
}
