//! Column schema handlers

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::ColumnMsg;
use crate::model::TableModel;

/// Handle column messages
pub fn update_columns(model: &mut TableModel, msg: ColumnMsg) -> Result<Option<Cmd>> {
    match msg {
        ColumnMsg::ToggleVisibility(id) => {
            if model.columns.toggle_visibility(&id) {
                Ok(Some(Cmd::Redraw))
            } else {
                tracing::debug!(%id, "toggle on unknown column ignored");
                Ok(None)
            }
        }
        ColumnMsg::Add { label, kind } => {
            let column = model.columns.add_column(&label, kind)?;
            tracing::info!(id = %column.id, label = %column.label, ?kind, "column added");
            Ok(Some(Cmd::Redraw))
        }
        ColumnMsg::Reorder { from, to } => {
            if model.columns.reorder(&from, &to) {
                Ok(Some(Cmd::Redraw))
            } else {
                tracing::debug!(%from, %to, "reorder with unknown column ignored");
                Ok(None)
            }
        }
        ColumnMsg::SetAll(columns) => {
            model.columns.set_all(columns)?;
            model.reconcile_sort();
            Ok(Some(Cmd::Redraw))
        }
    }
}
