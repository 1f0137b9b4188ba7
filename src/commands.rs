//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The engine runtime executes them and feeds results back as messages.

use std::path::PathBuf;

use crate::model::ColumnRegistry;

/// Side effects returned by `update`
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The visible page may have changed
    Redraw,
    /// Read and parse a CSV file on a worker thread.
    /// Sends `CsvMsg::ImportParsed` when done.
    ReadCsvFile {
        path: PathBuf,
        /// Schema used to resolve headers, captured at request time
        columns: ColumnRegistry,
    },
    /// Write an export file on a worker thread.
    /// Sends `CsvMsg::ExportCompleted` when done.
    WriteExport {
        path: PathBuf,
        content: String,
        rows: usize,
    },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::ReadCsvFile { .. } | Cmd::WriteExport { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
