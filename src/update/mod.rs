//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod columns;
mod csv;
mod edit;
mod table;
mod ui;

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::Msg;
use crate::model::{Notification, TableModel};

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use columns::update_columns;
pub use csv::update_csv;
pub use edit::update_edit;
pub use table::update_table;
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// Errors become an error notification on the model; nothing here is fatal.
pub fn update(model: &mut TableModel, msg: Msg) -> Option<Cmd> {
    match try_update(model, msg) {
        Ok(cmd) => cmd,
        Err(err) => {
            model.notify(Notification::error(err.to_string()));
            Some(Cmd::Redraw)
        }
    }
}

/// Like `update`, but hands the error back instead of notifying.
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn try_update(model: &mut TableModel, msg: Msg) -> Result<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut TableModel, msg: Msg) -> Result<Option<Cmd>> {
    match msg {
        Msg::Table(m) => table::update_table(model, m),
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::Column(m) => columns::update_columns(model, m),
        Msg::Csv(m) => csv::update_csv(model, m),
        Msg::Ui(m) => Ok(ui::update_ui(model, m)),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after state and logs diffs for debugging.
/// Skips logging for the periodic notification tick.
#[cfg(debug_assertions)]
fn update_traced(model: &mut TableModel, msg: Msg) -> Result<Option<Cmd>> {
    use crate::messages::UiMsg;

    let is_noisy = matches!(&msg, Msg::Ui(UiMsg::Tick));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = StateSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    if let Some(diff) = before.diff(&StateSnapshot::from_model(model)) {
        debug!(target: "state", %diff, "state changed");
    }
    if let Err(ref err) = result {
        debug!(target: "message", msg = %msg_name, %err, "rejected");
    }

    model.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Row payloads are summarised to keep log lines short.
/// Example outputs:
/// - `Table::Search("ann")`
/// - `Edit::Begin("3")`
/// - `Csv::ImportParsed("people.csv", 12 rows)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{CsvMsg, TableMsg};

    match msg {
        Msg::Table(TableMsg::AddRow(row)) => format!("Table::AddRow({:?})", row.id()),
        Msg::Table(m) => format!("Table::{:?}", m),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Column(m) => format!("Column::{:?}", m),
        Msg::Csv(CsvMsg::Import(text)) => format!("Csv::Import({} bytes)", text.len()),
        Msg::Csv(CsvMsg::ImportParsed { path, result }) => match result {
            Ok(rows) => format!("Csv::ImportParsed({:?}, {} rows)", path, rows.len()),
            Err(err) => format!("Csv::ImportParsed({:?}, {})", path, err),
        },
        Msg::Csv(m) => format!("Csv::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
    }
}
