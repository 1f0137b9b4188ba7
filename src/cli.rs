//! Command-line argument parsing for the table engine
//!
//! Supports:
//! - Importing a CSV file before anything else runs
//! - Column schema changes (add, toggle, move)
//! - Search, repeated sort and 1-based page selection
//! - Exporting and saving a snapshot afterwards

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::TableEngine;
use crate::error::Result;
use crate::model::{ColumnType, TableModel};

/// How long a file import may take before giving up
const IMPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// A small table engine with search, sort, paging and CSV import/export
#[derive(Parser, Debug)]
#[command(name = "tabula", version, about = "Searchable, sortable, paginated tables")]
pub struct CliArgs {
    /// Replace the table with rows from a CSV file
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Filter rows containing TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort on a column id; repeat the same column to sort descending
    #[arg(long, value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Show page N (1-based)
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    /// Flip visibility of a column
    #[arg(long = "toggle-column", value_name = "ID")]
    pub toggle_column: Vec<String>,

    /// Add a column, optionally typed: "Start Date" or "Salary:number"
    #[arg(long = "add-column", value_name = "LABEL[:TYPE]")]
    pub add_column: Vec<String>,

    /// Move a column to another column's position: "role:name"
    #[arg(long = "move-column", value_name = "FROM:TO")]
    pub move_column: Vec<String>,

    /// Write data-export-<date>.csv
    #[arg(long)]
    pub export: bool,

    /// Directory for --export (defaults to config, then cwd)
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Start with an empty table instead of the sample people
    #[arg(long = "no-seed")]
    pub no_seed: bool,

    /// Snapshot file to load from and save to
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Save the resulting table to the snapshot file
    #[arg(long)]
    pub save: bool,
}

/// One step applied to the engine, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ImportFile(PathBuf),
    AddColumn { label: String, kind: ColumnType },
    ToggleColumn(String),
    MoveColumn { from: String, to: String },
    Search(String),
    Sort(String),
    /// 0-based
    Page(usize),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub actions: Vec<Action>,
    pub seed_sample_data: bool,
    pub export: bool,
    pub export_dir: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub save: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into an ordered action list
    pub fn into_config(self) -> std::result::Result<RunConfig, String> {
        let mut actions = Vec::new();

        if let Some(path) = self.import {
            actions.push(Action::ImportFile(path));
        }
        for spec in &self.add_column {
            let (label, kind) = parse_column_spec(spec)?;
            actions.push(Action::AddColumn { label, kind });
        }
        actions.extend(self.toggle_column.into_iter().map(Action::ToggleColumn));
        for spec in &self.move_column {
            let (from, to) = parse_move_spec(spec)?;
            actions.push(Action::MoveColumn { from, to });
        }
        if let Some(text) = self.search {
            actions.push(Action::Search(text));
        }
        actions.extend(self.sort.into_iter().map(Action::Sort));

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        if let Some(page) = self.page {
            if page == 0 {
                return Err("Pages are numbered from 1".to_string());
            }
            actions.push(Action::Page(page - 1));
        }

        Ok(RunConfig {
            actions,
            seed_sample_data: !self.no_seed,
            export: self.export,
            export_dir: self.export_dir,
            snapshot: self.snapshot,
            save: self.save,
        })
    }
}

/// Split `LABEL[:TYPE]`; the type defaults to text
pub fn parse_column_spec(spec: &str) -> std::result::Result<(String, ColumnType), String> {
    match spec.rsplit_once(':') {
        Some((label, kind)) => {
            let kind = ColumnType::from_name(kind)
                .ok_or_else(|| format!("Unknown column type '{}' in '{}'", kind, spec))?;
            Ok((label.to_string(), kind))
        }
        None => Ok((spec.to_string(), ColumnType::Text)),
    }
}

/// Split `FROM:TO`
pub fn parse_move_spec(spec: &str) -> std::result::Result<(String, String), String> {
    match spec.split_once(':') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("Expected FROM:TO, got '{}'", spec)),
    }
}

/// Apply actions to the engine in order, stopping at the first error
pub fn apply_actions(engine: &mut TableEngine, actions: &[Action]) -> Result<()> {
    for action in actions {
        tracing::debug!(?action, "applying");
        match action {
            Action::ImportFile(path) => {
                let rows = engine.import_csv_file_blocking(path.clone(), IMPORT_TIMEOUT)?;
                tracing::info!(rows, path = %path.display(), "imported");
            }
            Action::AddColumn { label, kind } => engine.add_column(label, *kind)?,
            Action::ToggleColumn(id) => engine.toggle_column_visibility(id),
            Action::MoveColumn { from, to } => engine.reorder_columns(from, to),
            Action::Search(text) => engine.search(text.clone()),
            Action::Sort(column_id) => engine.sort(column_id),
            Action::Page(index) => engine.set_page(*index),
        }
    }
    Ok(())
}

/// Render the current page as an aligned text table with a page footer
pub fn render_table(model: &TableModel) -> String {
    let view = model.view();
    let columns: Vec<_> = model.columns.visible().collect();

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(view.page_rows.len() + 1);
    grid.push(columns.iter().map(|c| c.label.clone()).collect());
    for row in &view.page_rows {
        grid.push(columns.iter().map(|c| row.display(&c.id)).collect());
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            grid.iter()
                .map(|cells| cells[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (line, cells) in grid.iter().enumerate() {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(padded.join(" | ").trim_end());
        out.push('\n');
        if line == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }
    if view.is_empty() {
        out.push_str("(no rows)\n");
    }
    out.push_str(&format!(
        "Page {} of {} ({} rows)\n",
        view.page_index + 1,
        view.total_pages,
        view.total_filtered
    ));
    out
}
