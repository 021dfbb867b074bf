//! Liveness checks for highlight targets
//!
//! Project and editor state is kept in atomics so the same check can run on
//! a worker thread and again on the UI thread without locks. Nothing here
//! touches the buffer or the syntax tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle flags of a project (shared by all of its editors)
#[derive(Debug, Default)]
pub struct ProjectHandle {
    disposed: AtomicBool,
}

impl ProjectHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Lifecycle and visibility flags of one editor view
#[derive(Debug)]
pub struct EditorHandle {
    disposed: AtomicBool,
    showing: AtomicBool,
    viewer: AtomicBool,
}

impl Default for EditorHandle {
    fn default() -> Self {
        Self {
            disposed: AtomicBool::new(false),
            showing: AtomicBool::new(true),
            viewer: AtomicBool::new(false),
        }
    }
}

impl EditorHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn set_showing(&self, showing: bool) {
        self.showing.store(showing, Ordering::Release);
    }

    pub fn is_showing(&self) -> bool {
        self.showing.load(Ordering::Acquire)
    }

    /// Read-only viewers never receive overlay markers
    pub fn set_viewer(&self, viewer: bool) {
        self.viewer.store(viewer, Ordering::Release);
    }

    pub fn is_viewer(&self) -> bool {
        self.viewer.load(Ordering::Acquire)
    }
}

/// Thread-safe view of everything [`is_live`] needs
#[derive(Debug, Clone)]
pub struct LivenessProbe {
    project: Arc<ProjectHandle>,
    editor: Arc<EditorHandle>,
}

impl LivenessProbe {
    pub fn new(project: Arc<ProjectHandle>, editor: Arc<EditorHandle>) -> Self {
        Self { project, editor }
    }
}

/// Whether the editor is still a valid, visible, mutable highlight target
pub fn is_live(probe: &LivenessProbe) -> bool {
    !probe.project.is_disposed()
        && !probe.editor.is_disposed()
        && probe.editor.is_showing()
        && !probe.editor.is_viewer()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe() -> (Arc<ProjectHandle>, Arc<EditorHandle>, LivenessProbe) {
        let project = ProjectHandle::new();
        let editor = EditorHandle::new();
        let probe = LivenessProbe::new(project.clone(), editor.clone());
        (project, editor, probe)
    }

    #[test]
    fn test_fresh_editor_is_live() {
        let (_, _, probe) = probe();
        assert!(is_live(&probe));
    }

    #[test]
    fn test_each_flag_kills_liveness() {
        let (project, _, p) = probe();
        project.dispose();
        assert!(!is_live(&p));

        let (_, editor, p) = probe();
        editor.dispose();
        assert!(!is_live(&p));

        let (_, editor, p) = probe();
        editor.set_showing(false);
        assert!(!is_live(&p));

        let (_, editor, p) = probe();
        editor.set_viewer(true);
        assert!(!is_live(&p));
    }

    #[test]
    fn test_probe_is_checked_across_threads() {
        let (_, editor, probe) = probe();
        let live = std::thread::spawn(move || is_live(&probe)).join().unwrap();
        assert!(live);
        editor.set_showing(false);
    }
}
