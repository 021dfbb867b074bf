//! Document update handlers

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::{AppModel, SessionId};

use super::highlight::on_edit;

/// Handle document messages for one session
pub fn update_document(model: &mut AppModel, id: SessionId, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::Replace {
            offset,
            removed_len,
            text,
        } => {
            let session = model.sessions.get_mut(&id)?;
            match session.document.replace(offset, removed_len, &text) {
                Ok(edit) => on_edit(model, id, edit),
                Err(e) => {
                    tracing::warn!("Session {}: ignoring edit: {}", id.0, e);
                    None
                }
            }
        }
    }
}
