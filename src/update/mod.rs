//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod document;
mod highlight;
mod ui;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use document::update_document;
pub use highlight::{
    notify, notify_immediate, on_dispose, on_edit, on_open, recompute_pass, update_highlight,
};
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
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
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(session, m) => document::update_document(model, session, m),
        Msg::Highlight(m) => highlight::update_highlight(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
    }
}

/// Traced update wrapper (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let Some(ref cmd) = result {
        debug!(target: "message", ?cmd, "produced");
    }
    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Highlight::Open(SessionId(1))`
/// - `Ui::EnterModal`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Document(id, m) => format!("Document[{}]::{:?}", id.0, m),
        Msg::Highlight(m) => format!("Highlight::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
    }
}
