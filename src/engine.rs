//! Table engine runtime
//!
//! `TableEngine` owns the only mutable `TableModel`. Every operation is a
//! `Msg` run through `update`; any `Cmd` that comes back is executed here,
//! with file IO on worker threads whose results return as messages over
//! an mpsc channel and are applied by `process_async_messages`.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::csv::{export_csv, parse_rows};
use crate::error::{Result, TableError};
use crate::messages::{ColumnMsg, CsvMsg, EditMsg, Msg, TableMsg, UiMsg};
use crate::model::{Column, ColumnType, Notification, Row, TableModel};
use crate::snapshot::Snapshot;
use crate::update::{try_update, update};
use crate::view::View;

pub struct TableEngine {
    model: TableModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Worker threads whose result message has not been applied yet
    in_flight: usize,
    /// Outcome of the most recently applied file import (row count)
    last_import: Option<Result<usize>>,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new(TableModel::with_sample_data())
    }
}

impl TableEngine {
    pub fn new(model: TableModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            in_flight: 0,
            last_import: None,
        }
    }

    /// Engine with the default columns and no rows
    pub fn empty() -> Self {
        Self::new(TableModel::with_default_columns())
    }

    pub fn model(&self) -> &TableModel {
        &self.model
    }

    /// Derived page for the current query
    pub fn view(&self) -> View<'_> {
        self.model.view()
    }

    pub fn list_columns(&self) -> &[Column] {
        self.model.columns.list()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.model.notification.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.model.snapshot()
    }

    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        self.model.restore(snapshot)
    }

    /// Run a message through `update`, notifying on error
    ///
    /// Returns true if the visible state may have changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                redraw
            }
            None => false,
        }
    }

    /// Like `dispatch`, but also hands the error back to the caller
    fn dispatch_checked(&mut self, msg: Msg) -> Result<()> {
        match try_update(&mut self.model, msg) {
            Ok(Some(cmd)) => {
                self.process_cmd(cmd);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                self.model.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Process a command (execute side effects)
    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::ReadCsvFile { path, columns } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path)
                        .map_err(|e| TableError::io(&path, e))
                        .and_then(|content| parse_rows(&content, &columns));
                    let _ = tx.send(Msg::Csv(CsvMsg::ImportParsed { path, result }));
                });
            }
            Cmd::WriteExport {
                path,
                content,
                rows,
            } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = std::fs::write(&path, content)
                        .map(|()| path.clone())
                        .map_err(|e| TableError::io(&path, e));
                    let _ = tx.send(Msg::Csv(CsvMsg::ExportCompleted { rows, result }));
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Apply results from worker threads without blocking
    ///
    /// Returns true if a redraw is needed.
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.apply_async(msg);
        }
        needs_redraw
    }

    /// Block until every worker result has been applied or `timeout` passes
    ///
    /// Returns false on timeout.
    pub fn wait_for_pending(&mut self, timeout: Duration) -> bool {
        // No deadline when `timeout` overflows the clock
        let deadline = Instant::now().checked_add(timeout);
        while self.in_flight > 0 {
            let received = match deadline {
                Some(deadline) => self
                    .msg_rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .msg_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(msg) => {
                    self.apply_async(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(in_flight = self.in_flight, "timed out waiting for workers");
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    /// Number of worker results still outstanding
    pub fn pending_work(&self) -> usize {
        self.in_flight
    }

    fn apply_async(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::Csv(CsvMsg::ImportParsed { .. }) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let result = self.dispatch_checked(msg);
                self.last_import = Some(result.map(|()| self.model.rows.len()));
                true
            }
            Msg::Csv(CsvMsg::ExportCompleted { .. }) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.dispatch(msg)
            }
            msg => self.dispatch(msg),
        }
    }

    /// Drop an expired notification
    pub fn tick(&mut self) -> bool {
        self.dispatch(Msg::Ui(UiMsg::Tick))
    }

    pub fn clear_notification(&mut self) {
        self.dispatch(Msg::Ui(UiMsg::ClearNotification));
    }

    // =====================================================================
    // Command surface
    // =====================================================================

    pub fn search(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::Table(TableMsg::Search(text.into())));
    }

    /// Ascending on a new column, flipping on repeat
    pub fn sort(&mut self, column_id: &str) {
        self.dispatch(Msg::Table(TableMsg::Sort(column_id.to_string())));
    }

    /// Go to a 0-based page, clamped to the last page
    pub fn set_page(&mut self, index: usize) {
        self.dispatch(Msg::Table(TableMsg::SetPage(index)));
    }

    pub fn next_page(&mut self) {
        self.dispatch(Msg::Table(TableMsg::NextPage));
    }

    pub fn prev_page(&mut self) {
        self.dispatch(Msg::Table(TableMsg::PrevPage));
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.dispatch(Msg::Edit(EditMsg::SetEditMode(enabled)));
    }

    pub fn toggle_edit_mode(&mut self) {
        self.dispatch(Msg::Edit(EditMsg::ToggleEditMode));
    }

    pub fn begin_edit(&mut self, row_id: &str) {
        self.dispatch(Msg::Edit(EditMsg::Begin(row_id.to_string())));
    }

    pub fn set_edit_buffer(&mut self, row_id: &str, column_id: &str, text: impl Into<String>) {
        self.dispatch(Msg::Edit(EditMsg::SetBuffer {
            row_id: row_id.to_string(),
            column_id: column_id.to_string(),
            text: text.into(),
        }));
    }

    /// Commit the row's buffer plus `fields` (column id, raw text)
    pub fn commit_edit<K, V>(&mut self, row_id: &str, fields: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.dispatch(Msg::Edit(EditMsg::Commit {
            row_id: row_id.to_string(),
            fields,
        }));
    }

    pub fn cancel_edit(&mut self, row_id: &str) {
        self.dispatch(Msg::Edit(EditMsg::Cancel(row_id.to_string())));
    }

    /// Append a row; an empty id is replaced with a generated one
    pub fn add_row(&mut self, row: Row) -> Result<()> {
        self.dispatch_checked(Msg::Table(TableMsg::AddRow(row)))
    }

    pub fn delete_row(&mut self, row_id: &str) {
        self.dispatch(Msg::Table(TableMsg::DeleteRow(row_id.to_string())));
    }

    pub fn toggle_column_visibility(&mut self, column_id: &str) {
        self.dispatch(Msg::Column(ColumnMsg::ToggleVisibility(
            column_id.to_string(),
        )));
    }

    pub fn add_column(&mut self, label: &str, kind: ColumnType) -> Result<()> {
        self.dispatch_checked(Msg::Column(ColumnMsg::Add {
            label: label.to_string(),
            kind,
        }))
    }

    pub fn reorder_columns(&mut self, from_id: &str, to_id: &str) {
        self.dispatch(Msg::Column(ColumnMsg::Reorder {
            from: from_id.to_string(),
            to: to_id.to_string(),
        }));
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        self.dispatch_checked(Msg::Column(ColumnMsg::SetAll(columns)))
    }

    /// Replace every row with the parsed CSV text, returning the row count
    pub fn import_csv(&mut self, text: impl Into<String>) -> Result<usize> {
        self.dispatch_checked(Msg::Csv(CsvMsg::Import(text.into())))?;
        Ok(self.model.rows.len())
    }

    /// Start reading and parsing a CSV file on a worker thread
    ///
    /// Rows are replaced once the result is applied by
    /// `process_async_messages` or `wait_for_pending`.
    pub fn import_csv_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.dispatch_checked(Msg::Csv(CsvMsg::ImportFile(path.into())))
    }

    /// Import a CSV file and block until its rows are applied
    pub fn import_csv_file_blocking(
        &mut self,
        path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<usize> {
        let path = path.into();
        self.last_import = None;
        self.import_csv_file(path.clone())?;
        if !self.wait_for_pending(timeout) {
            return Err(TableError::Io {
                path,
                message: "timed out waiting for import".to_string(),
            });
        }
        self.last_import.take().unwrap_or(Err(TableError::Io {
            path,
            message: "import finished without a result".to_string(),
        }))
    }

    /// Visible columns of every row as CSV text
    pub fn export_csv(&self) -> Result<String> {
        export_csv(self.model.rows.rows(), &self.model.columns)
    }

    /// Write `data-export-<date>.csv` into `dir` on a worker thread
    pub fn export_to_dir(&mut self, dir: &Path) -> Result<()> {
        self.dispatch_checked(Msg::Csv(CsvMsg::ExportToDir(dir.to_path_buf())))
    }
}
