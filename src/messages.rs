//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::SessionId;

/// Document messages (buffer changes reported by the host editor)
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    /// Replace `removed_len` bytes at `offset` with `text`, then rehighlight
    Replace {
        offset: usize,
        removed_len: usize,
        text: String,
    },
}

/// Rainbow highlighting messages
#[derive(Debug, Clone)]
pub enum HighlightMsg {
    /// A session was opened; paint the whole buffer right away
    Open(SessionId),
    /// Immediate full rescan, e.g. after the palette changed
    Rehighlight(SessionId),
    /// The editor was closed; drop everything it owns
    Dispose(SessionId),
    /// A debounce timer ran out
    DebounceElapsed { session: SessionId, generation: u64 },
    /// The worker saw the editor alive; run the pass on the UI thread
    LivenessConfirmed { session: SessionId, generation: u64 },
}

/// UI state messages (modal dialogs, editor visibility)
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// A modal dialog opened
    EnterModal,
    /// The topmost modal dialog closed
    ExitModal,
    /// The editor component was shown or hidden
    SetShowing { session: SessionId, showing: bool },
    /// The editor switched between editable and read-only viewer
    SetViewer { session: SessionId, viewer: bool },
    /// The project owning a session was closed
    DisposeProject(SessionId),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Document messages for one session
    Document(SessionId, DocumentMsg),
    /// Highlight scheduling and continuations
    Highlight(HighlightMsg),
    /// UI messages (modality, visibility)
    Ui(UiMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create an insert message
    pub fn insert(session: SessionId, offset: usize, text: impl Into<String>) -> Self {
        Msg::Document(
            session,
            DocumentMsg::Replace {
                offset,
                removed_len: 0,
                text: text.into(),
            },
        )
    }

    /// Create a delete message
    pub fn delete(session: SessionId, offset: usize, len: usize) -> Self {
        Msg::Document(
            session,
            DocumentMsg::Replace {
                offset,
                removed_len: len,
                text: String::new(),
            },
        )
    }

    pub fn open(session: SessionId) -> Self {
        Msg::Highlight(HighlightMsg::Open(session))
    }

    pub fn dispose(session: SessionId) -> Self {
        Msg::Highlight(HighlightMsg::Dispose(session))
    }
}
