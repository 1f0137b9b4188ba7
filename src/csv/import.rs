//! CSV → rows
//!
//! RFC 4180 parsing via the csv crate. Every record must have as many
//! fields as the header row.

use std::path::Path;

use crate::error::{Result, TableError};
use crate::model::{ColumnRegistry, ColumnType, Row, Value};

/// Fields every imported row carries, with their value types
pub const LOGICAL_FIELDS: [(&str, ColumnType); 6] = [
    ("name", ColumnType::Text),
    ("email", ColumnType::Email),
    ("age", ColumnType::Number),
    ("role", ColumnType::Text),
    ("department", ColumnType::Text),
    ("location", ColumnType::Text),
];

/// Where a header's values land on the row
#[derive(Debug, Clone, PartialEq)]
struct HeaderTarget {
    column_id: String,
    kind: ColumnType,
}

fn resolve_header(header: &str, columns: &ColumnRegistry) -> HeaderTarget {
    let lowered = header.trim().to_lowercase();

    if let Some((id, kind)) = LOGICAL_FIELDS.iter().find(|(id, _)| *id == lowered) {
        return HeaderTarget {
            column_id: id.to_string(),
            kind: *kind,
        };
    }

    let registered = columns.list().iter().find(|c| {
        c.id.to_lowercase() == lowered || c.label.trim().to_lowercase() == lowered
    });
    match registered {
        Some(column) => HeaderTarget {
            column_id: column.id.clone(),
            kind: column.kind,
        },
        None => HeaderTarget {
            column_id: header.to_string(),
            kind: ColumnType::Text,
        },
    }
}

/// Reject inputs that are not CSV files before reading them
pub fn ensure_csv_path(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(TableError::ImportFormat {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        })
    }
}

/// Parse CSV text into freshly identified rows.
///
/// `age` takes the leading integer of its cell, or 0. Other number fields
/// that fail to parse become 0, and blank ones stay absent. Fails with
/// `Parse` on the first malformed record and with `EmptyImport` when there
/// are no records.
pub fn parse_rows(content: &str, columns: &ColumnRegistry) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let targets: Vec<HeaderTarget> = reader
        .headers()?
        .iter()
        .map(|h| resolve_header(h, columns))
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = blank_row();
        for (target, raw) in targets.iter().zip(record.iter()) {
            if let Some(value) = coerce_import(target, raw) {
                row.set(target.column_id.clone(), value);
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TableError::EmptyImport);
    }

    tracing::debug!(rows = rows.len(), columns = targets.len(), "parsed CSV");
    Ok(rows)
}

fn blank_row() -> Row {
    let mut row = Row::new(uuid::Uuid::new_v4().to_string());
    for (id, kind) in LOGICAL_FIELDS {
        let value = match kind {
            ColumnType::Number => Value::Number(0.0),
            ColumnType::Email => Value::email(""),
            ColumnType::Text => Value::text(""),
        };
        row.set(id, value);
    }
    row
}

fn coerce_import(target: &HeaderTarget, raw: &str) -> Option<Value> {
    match target.kind {
        ColumnType::Number if target.column_id == "age" => {
            Some(Value::Number(leading_integer(raw).unwrap_or(0) as f64))
        }
        ColumnType::Number if raw.trim().is_empty() => None,
        kind => Some(kind.coerce(&target.column_id, raw).unwrap_or_else(|err| {
            tracing::debug!(%err, "import value defaulted to 0");
            Value::Number(0.0)
        })),
    }
}

/// Optionally signed digits at the start of `raw`, after leading whitespace
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}
