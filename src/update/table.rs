//! Search, sort, pagination and row handlers

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::TableMsg;
use crate::model::{Row, TableModel};

/// Handle table messages
pub fn update_table(model: &mut TableModel, msg: TableMsg) -> Result<Option<Cmd>> {
    match msg {
        TableMsg::Search(text) => {
            model.query.set_search(text);
            Ok(Some(Cmd::Redraw))
        }
        TableMsg::Sort(column_id) => Ok(sort(model, &column_id)),
        TableMsg::SetPage(index) => Ok(set_page(model, index)),
        TableMsg::NextPage => {
            let next = model.query.page_index.saturating_add(1);
            Ok(set_page(model, next))
        }
        TableMsg::PrevPage => {
            let prev = model.query.page_index.saturating_sub(1);
            Ok(set_page(model, prev))
        }
        TableMsg::AddRow(row) => add_row(model, row),
        TableMsg::DeleteRow(id) => Ok(delete_row(model, &id)),
    }
}

/// Sort on a registered, sortable column
fn sort(model: &mut TableModel, column_id: &str) -> Option<Cmd> {
    match model.columns.get(column_id) {
        Some(column) if column.sortable => {
            model.query.toggle_sort(column_id);
            Some(Cmd::Redraw)
        }
        Some(_) => {
            tracing::debug!(column_id, "column is not sortable");
            None
        }
        None => {
            tracing::debug!(column_id, "sort on unknown column ignored");
            None
        }
    }
}

fn set_page(model: &mut TableModel, index: usize) -> Option<Cmd> {
    let before = model.query.page_index;
    model.query.page_index = index;
    model.clamp_page();
    (model.query.page_index != before).then_some(Cmd::Redraw)
}

fn add_row(model: &mut TableModel, mut row: Row) -> Result<Option<Cmd>> {
    if row.id().is_empty() {
        row.set_id(uuid::Uuid::new_v4().to_string());
    }
    let id = row.id().to_string();
    model.rows.add(row)?;
    tracing::debug!(%id, "row added");
    Ok(Some(Cmd::Redraw))
}

fn delete_row(model: &mut TableModel, id: &str) -> Option<Cmd> {
    model.rows.delete(id)?;
    model.edits.forget(id);
    model.clamp_page();
    tracing::debug!(id, "row deleted");
    Some(Cmd::Redraw)
}
