//! Notification housekeeping

use crate::commands::Cmd;
use crate::messages::UiMsg;
use crate::model::TableModel;

/// Handle UI messages
pub fn update_ui(model: &mut TableModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::Tick => {
            if model.notification.as_ref().is_some_and(|n| n.is_expired()) {
                model.notification = None;
                return Some(Cmd::Redraw);
            }
            None
        }
        UiMsg::ClearNotification => model.notification.take().map(|_| Cmd::Redraw),
    }
}
