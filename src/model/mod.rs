//! Application model - the complete state of the highlighting engine
//!
//! This module contains all the state types following the Elm Architecture pattern.
//! Only `update` mutates it, and only on the UI thread.

pub mod document;
pub mod session;

pub use document::{default_syntax, Document};
pub use session::{EditorSession, InFlight, PendingRequest, RecomputeRequest, SessionId};

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::HighlightConfig;
use crate::liveness::{EditorHandle, ProjectHandle};
use crate::theme::{load_theme, Theme};

/// How modal the UI currently is
///
/// Higher values are more modal. A message tagged with modality `m` may run
/// while the current modality is at most `m`; otherwise it waits until the
/// modal state is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Modality(pub u32);

impl Modality {
    pub const NON_MODAL: Modality = Modality(0);

    /// Whether a message tagged with `self` may run under `current`
    pub fn can_run_under(self, current: Modality) -> bool {
        current <= self
    }

    /// One level deeper, for a newly opened modal dialog
    pub fn deeper(self) -> Modality {
        Modality(self.0.saturating_add(1))
    }

    /// One level shallower, for a closed modal dialog
    pub fn shallower(self) -> Modality {
        Modality(self.0.saturating_sub(1))
    }
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Open editor sessions
    pub sessions: HashMap<SessionId, EditorSession>,
    /// Highlighting configuration
    pub config: HighlightConfig,
    /// Bracket palette
    pub theme: Theme,
    /// Current UI modality
    pub modality: Modality,
    next_session_id: u64,
}

impl AppModel {
    /// Create a model, loading the theme named by `config`
    pub fn new(config: HighlightConfig) -> Self {
        let theme = load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Failed to load theme '{}': {}, using default", config.theme, e);
            Theme::default()
        });
        Self::with_theme(config, theme)
    }

    pub fn with_theme(config: HighlightConfig, theme: Theme) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
            theme,
            modality: Modality::NON_MODAL,
            next_session_id: 0,
        }
    }

    /// Allocate a session id without registering a session
    pub fn next_session_id(&mut self) -> SessionId {
        self.next_session_id += 1;
        SessionId(self.next_session_id)
    }

    /// Register a session for `document` and return its id
    ///
    /// The session starts idle; send `HighlightMsg::Open` to paint it.
    pub fn add_session(
        &mut self,
        document: Document,
        project: Arc<ProjectHandle>,
        editor: Arc<EditorHandle>,
    ) -> SessionId {
        let id = self.next_session_id();
        let session = EditorSession::new(id, document, project, editor);
        self.sessions.insert(id, session);
        id
    }

    /// Register a fully built session, keeping its id
    pub fn insert_session(&mut self, session: EditorSession) -> SessionId {
        let id = session.id;
        self.next_session_id = self.next_session_id.max(id.0);
        self.sessions.insert(id, session);
        id
    }

    pub fn session(&self, id: SessionId) -> Option<&EditorSession> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut EditorSession> {
        self.sessions.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brackets::BracketSet;

    #[test]
    fn test_modality_ordering() {
        let modal = Modality::NON_MODAL.deeper();
        assert!(Modality::NON_MODAL.can_run_under(Modality::NON_MODAL));
        assert!(!Modality::NON_MODAL.can_run_under(modal));
        assert!(modal.can_run_under(modal));
        assert!(modal.can_run_under(Modality::NON_MODAL));
        assert_eq!(Modality::NON_MODAL.shallower(), Modality::NON_MODAL);
    }

    #[test]
    fn test_add_session_assigns_distinct_ids() {
        let mut model = AppModel::with_theme(HighlightConfig::default(), Theme::default());
        let project = ProjectHandle::new();
        let a = model.add_session(
            Document::with_text("(a)", BracketSet::Parens),
            project.clone(),
            EditorHandle::new(),
        );
        let b = model.add_session(
            Document::with_text("(b)", BracketSet::Parens),
            project,
            EditorHandle::new(),
        );
        assert_ne!(a, b);
        assert_eq!(model.sessions.len(), 2);
    }
}
