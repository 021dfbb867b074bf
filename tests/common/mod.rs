//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rainbow_parens::brackets::{BracketSet, ScanSyntax};
use rainbow_parens::config::HighlightConfig;
use rainbow_parens::liveness::{EditorHandle, ProjectHandle};
use rainbow_parens::markup::SharedMarkup;
use rainbow_parens::model::{AppModel, Document, EditorSession, SessionId};
use rainbow_parens::runtime::Runtime;
use rainbow_parens::theme::{ColorScheme, Theme};

/// Generous upper bound for background work in tests
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Config with a short debounce so tests stay fast
pub fn fast_config() -> HighlightConfig {
    HighlightConfig {
        debounce_ms: 20,
        ..HighlightConfig::default()
    }
}

/// The three-color built-in palette
pub fn classic_theme() -> Theme {
    Theme::from_builtin("classic").unwrap()
}

/// Handles to one session registered in a runtime
pub struct TestSession {
    pub id: SessionId,
    pub markup: SharedMarkup,
    pub project: Arc<ProjectHandle>,
    pub editor: Arc<EditorHandle>,
}

/// Register a session for `document` and return its handles
pub fn add_session(model: &mut AppModel, document: Document) -> TestSession {
    let markup = SharedMarkup::new();
    let project = ProjectHandle::new();
    let editor = EditorHandle::new();
    let id = model.next_session_id();
    model.insert_session(
        EditorSession::new(id, document, project.clone(), editor.clone())
            .with_markup(Box::new(markup.clone())),
    );
    TestSession {
        id,
        markup,
        project,
        editor,
    }
}

/// Runtime with the classic palette and one tree-sitter backed session
pub fn runtime_with(text: &str) -> (Runtime, TestSession) {
    let mut model = AppModel::with_theme(fast_config(), classic_theme());
    let session = add_session(&mut model, Document::with_text(text, BracketSet::Parens));
    (Runtime::new(model), session)
}

/// Runtime whose session uses the plain character scanner
pub fn scanner_runtime_with(text: &str) -> (Runtime, TestSession) {
    let mut model = AppModel::with_theme(fast_config(), classic_theme());
    let document = Document::with_syntax(text, Box::new(ScanSyntax::new(BracketSet::Parens)));
    let session = add_session(&mut model, document);
    (Runtime::new(model), session)
}

/// `(offset, palette index)` for every marker, in document order
pub fn palette_indices(markup: &SharedMarkup, theme: &Theme) -> Vec<(usize, usize)> {
    markup
        .lock()
        .markers()
        .iter()
        .map(|marker| {
            let index = (0..theme.palette.len())
                .find(|&i| theme.palette.attribute_for(i) == marker.attributes)
                .unwrap_or(usize::MAX);
            (marker.start, index)
        })
        .collect()
}

/// Palette indices only
pub fn levels(markup: &SharedMarkup, theme: &Theme) -> Vec<usize> {
    palette_indices(markup, theme)
        .into_iter()
        .map(|(_, index)| index)
        .collect()
}
