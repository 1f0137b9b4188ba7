//! Table persistence
//!
//! A snapshot holds the durable part of the model: rows and the column
//! schema. Search, sort, page and edit state are transient and are reset
//! on restore.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::model::{Column, ColumnRegistry, EditSession, Query, Row, RowStore, TableModel};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Snapshot {
    /// Read a snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(TableError::Snapshot {
                message: format!(
                    "unsupported snapshot version {} (expected {})",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            });
        }
        tracing::info!(
            path = %path.display(),
            rows = snapshot.rows.len(),
            columns = snapshot.columns.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TableError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| TableError::io(path, e))?;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "saved snapshot");
        Ok(())
    }
}

impl TableModel {
    /// Capture rows and columns
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            columns: self.columns.list().to_vec(),
            rows: self.rows.rows().to_vec(),
        }
    }

    /// Replace rows and columns, resetting query and edit state
    ///
    /// The model is untouched if the snapshot's columns are invalid.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        let columns = ColumnRegistry::from_columns(snapshot.columns)?;
        self.columns = columns;
        self.rows = RowStore::from_rows(snapshot.rows);
        self.query = Query::default();
        self.edits = EditSession::new();
        self.pending_import = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnType, Value};

    #[test]
    fn test_restore_resets_transient_state() {
        let mut source = TableModel::with_sample_data();
        source.columns.add_column("Phone", ColumnType::Text).unwrap();
        source.rows.update("1", vec![("phone".to_string(), Value::text("555"))]);
        let snapshot = source.snapshot();

        let mut target = TableModel::with_default_columns();
        target.query.set_search("zzz");
        target.query.toggle_sort("name");
        target.edits.set_enabled(true);
        target.restore(snapshot).unwrap();

        assert_eq!(target.rows.len(), 5);
        assert_eq!(target.columns.len(), 7);
        assert_eq!(target.rows.get("1").unwrap().display("phone"), "555");
        assert_eq!(target.query, Query::default());
        assert!(!target.edits.is_enabled());
    }

    #[test]
    fn test_restore_rejects_duplicate_columns() {
        let mut model = TableModel::with_sample_data();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            columns: vec![
                Column::new("a", "A", ColumnType::Text),
                Column::new("a", "Again", ColumnType::Text),
            ],
            rows: vec![],
        };
        assert!(matches!(
            model.restore(snapshot),
            Err(TableError::DuplicateColumn { .. })
        ));
        assert_eq!(model.rows.len(), 5);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("snapshot.json");
        let snapshot = TableModel::with_sample_data().snapshot();

        snapshot.save(&path).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_load_garbage_is_snapshot_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Snapshot::load(&path),
            Err(TableError::Snapshot { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
