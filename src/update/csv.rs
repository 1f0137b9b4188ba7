//! CSV import/export handlers
//!
//! A file import goes through two messages: `ImportFile` validates the
//! path and returns `Cmd::ReadCsvFile`; the runtime reads and parses on a
//! worker thread and answers with `ImportParsed`. Rows are only replaced
//! when a successful `ImportParsed` is applied, so a failed or in-flight
//! import never leaves a partial dataset. A result whose request was
//! cleared (for example by a restore) is dropped.

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::csv::{ensure_csv_path, export_csv, export_file_name_today, parse_rows};
use crate::error::{Result, TableError};
use crate::messages::CsvMsg;
use crate::model::{Notification, Row, TableModel};

/// Handle CSV messages
pub fn update_csv(model: &mut TableModel, msg: CsvMsg) -> Result<Option<Cmd>> {
    match msg {
        CsvMsg::Import(content) => {
            let rows = parse_rows(&content, &model.columns)?;
            Ok(Some(apply_import(model, rows)))
        }
        CsvMsg::ImportFile(path) => start_file_import(model, path),
        CsvMsg::ImportParsed { path, result } => {
            if model.pending_import.as_ref() != Some(&path) {
                tracing::warn!(path = %path.display(), "dropping import result without a matching request");
                return Ok(None);
            }
            model.pending_import = None;
            let rows = result?;
            Ok(Some(apply_import(model, rows)))
        }
        CsvMsg::ExportToDir(dir) => {
            let content = export_csv(model.rows.rows(), &model.columns)?;
            let path = dir.join(export_file_name_today());
            Ok(Some(Cmd::WriteExport {
                path,
                content,
                rows: model.rows.len(),
            }))
        }
        CsvMsg::ExportCompleted { rows, result } => {
            let path = result?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            model.notify(Notification::success(format!(
                "Exported {} rows to {}",
                rows, name
            )));
            Ok(Some(Cmd::Redraw))
        }
    }
}

fn start_file_import(model: &mut TableModel, path: PathBuf) -> Result<Option<Cmd>> {
    if model.pending_import.is_some() {
        return Err(TableError::ImportInProgress);
    }
    ensure_csv_path(&path)?;

    tracing::info!(path = %path.display(), "starting CSV import");
    model.pending_import = Some(path.clone());
    Ok(Some(Cmd::ReadCsvFile {
        path,
        columns: model.columns.clone(),
    }))
}

/// Replace the dataset with imported rows
fn apply_import(model: &mut TableModel, rows: Vec<Row>) -> Cmd {
    let count = rows.len();
    model.rows.set_all(rows);
    let store = &model.rows;
    model.edits.retain_rows(|id| store.contains(id));
    model.query.page_index = 0;

    tracing::info!(rows = count, "imported CSV");
    model.notify(Notification::success(format!(
        "Successfully imported {} rows",
        count
    )));
    Cmd::Redraw
}
