//! Inline edit handlers
//!
//! Commit coerces each field by its column type. A number field that does
//! not parse keeps the row's previously committed value; the failure is
//! logged and never surfaced.

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::EditMsg;
use crate::model::{ColumnType, TableModel, Value};

/// Handle edit messages
pub fn update_edit(model: &mut TableModel, msg: EditMsg) -> Result<Option<Cmd>> {
    let cmd = match msg {
        EditMsg::SetEditMode(enabled) => set_edit_mode(model, enabled),
        EditMsg::ToggleEditMode => {
            let enabled = !model.edits.is_enabled();
            set_edit_mode(model, enabled)
        }
        EditMsg::Begin(row_id) => begin(model, &row_id),
        EditMsg::SetBuffer {
            row_id,
            column_id,
            text,
        } => {
            if !model.edits.set_buffer(&row_id, &column_id, text) {
                tracing::debug!(%row_id, "buffer update for row not under edit ignored");
            }
            None
        }
        EditMsg::Commit { row_id, fields } => commit(model, &row_id, fields),
        EditMsg::Cancel(row_id) => {
            model.edits.finish(&row_id);
            Some(Cmd::Redraw)
        }
    };
    Ok(cmd)
}

fn set_edit_mode(model: &mut TableModel, enabled: bool) -> Option<Cmd> {
    if model.edits.is_enabled() == enabled {
        return None;
    }
    model.edits.set_enabled(enabled);
    Some(Cmd::Redraw)
}

fn begin(model: &mut TableModel, row_id: &str) -> Option<Cmd> {
    if !model.edits.is_enabled() {
        tracing::debug!(row_id, "begin edit ignored, edit mode is off");
        return None;
    }
    if !model.rows.contains(row_id) {
        tracing::debug!(row_id, "begin edit on unknown row ignored");
        return None;
    }
    model.edits.begin(row_id);
    Some(Cmd::Redraw)
}

fn commit(model: &mut TableModel, row_id: &str, fields: Vec<(String, String)>) -> Option<Cmd> {
    if !model.edits.is_editing(row_id) {
        tracing::debug!(row_id, "commit on row not under edit ignored");
        return None;
    }

    // Explicit fields win over the buffered ones
    let mut pending = model.edits.finish(row_id);
    pending.extend(fields);

    let mut partial: Vec<(String, Value)> = Vec::with_capacity(pending.len());
    for (column_id, raw) in pending {
        let kind = model
            .columns
            .get(&column_id)
            .map(|c| c.kind)
            .unwrap_or(ColumnType::Text);
        match kind.coerce(&column_id, &raw) {
            Ok(value) => partial.push((column_id, value)),
            Err(err) => tracing::debug!(row_id, %err, "reverting field"),
        }
    }

    model.rows.update(row_id, partial);
    Some(Cmd::Redraw)
}
