//! UI message handlers (modality, editor visibility, project lifecycle)

use crate::commands::Cmd;
use crate::messages::UiMsg;
use crate::model::AppModel;

use super::highlight::notify_immediate;

/// Handle UI messages
///
/// Modality changes only touch the model; the runtime replays deferred
/// continuations once the modality drops far enough.
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::EnterModal => {
            model.modality = model.modality.deeper();
            tracing::debug!("Entered modal state {}", model.modality.0);
            None
        }

        UiMsg::ExitModal => {
            model.modality = model.modality.shallower();
            tracing::debug!("Left modal state, now {}", model.modality.0);
            None
        }

        UiMsg::SetShowing { session, showing } => {
            let editor = model.session(session)?.editor.clone();
            editor.set_showing(showing);
            // A pass aborted while hidden is not retried on its own
            if showing {
                notify_immediate(model, session)
            } else {
                None
            }
        }

        UiMsg::SetViewer { session, viewer } => {
            let editor = model.session(session)?.editor.clone();
            editor.set_viewer(viewer);
            if viewer {
                None
            } else {
                notify_immediate(model, session)
            }
        }

        UiMsg::DisposeProject(session) => {
            model.session(session)?.project.dispose();
            tracing::debug!("Project of session {} disposed", session.0);
            None
        }
    }
}
