//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::time::Duration;

use crate::brackets::DirtyRange;
use crate::liveness::LivenessProbe;
use crate::model::{Modality, SessionId};

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Start a debounce timer
    /// After `delay`, sends Msg::Highlight(DebounceElapsed)
    ScheduleRecompute {
        session: SessionId,
        generation: u64,
        delay: Duration,
    },
    /// Check liveness on a worker thread
    /// If the editor is live, sends Msg::Highlight(LivenessConfirmed) tagged
    /// with `modality`
    CheckLiveness {
        session: SessionId,
        generation: u64,
        probe: LivenessProbe,
        modality: Modality,
    },
    /// Markers in `range` changed and the host should repaint it
    Redraw { session: SessionId, range: DirtyRange },
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Scheduling commands repaint later through their continuation
            Cmd::ScheduleRecompute { .. } => false,
            Cmd::CheckLiveness { .. } => false,
            Cmd::Redraw { .. } => true,
        }
    }

    /// Check if this is a no-op command
    pub fn is_none(&self) -> bool {
        match self {
            Cmd::None => true,
            Cmd::Batch(cmds) => cmds.iter().all(|c| c.is_none()),
            _ => false,
        }
    }
}
