//! Per-editor highlighting session state

use std::sync::Arc;
use std::time::Instant;

use crate::brackets::EditDescriptor;
use crate::liveness::{EditorHandle, LivenessProbe, ProjectHandle};
use crate::markup::{MarkerStore, MarkupModel, SessionMarkers};

use super::document::Document;
use super::Modality;

/// Unique identifier for an editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// What a recompute pass has to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeRequest {
    /// Rescan the whole buffer
    FullRescan,
    /// Rescan the region affected by an edit
    Edit(EditDescriptor),
}

impl RecomputeRequest {
    /// Fold a later request into this one without losing coverage
    ///
    /// A full rescan absorbs anything; two edits merge into one descriptor.
    pub fn merge(self, later: RecomputeRequest) -> RecomputeRequest {
        match (self, later) {
            (RecomputeRequest::Edit(a), RecomputeRequest::Edit(b)) => {
                RecomputeRequest::Edit(a.merge(b))
            }
            _ => RecomputeRequest::FullRescan,
        }
    }

    /// Fold a buffer edit into this request
    pub fn with_edit(self, edit: EditDescriptor) -> RecomputeRequest {
        self.merge(RecomputeRequest::Edit(edit))
    }

    pub fn edit(&self) -> Option<&EditDescriptor> {
        match self {
            RecomputeRequest::Edit(edit) => Some(edit),
            RecomputeRequest::FullRescan => None,
        }
    }
}

/// A request waiting for its debounce delay to pass
#[derive(Debug, Clone, Copy)]
pub struct PendingRequest {
    pub generation: u64,
    pub scheduled_at: Instant,
    pub request: RecomputeRequest,
}

/// A request whose liveness check is running
#[derive(Debug, Clone, Copy)]
pub struct InFlight {
    pub generation: u64,
    pub request: RecomputeRequest,
}

/// One open editable view with rainbow highlighting attached
pub struct EditorSession {
    pub id: SessionId,
    pub document: Document,
    pub project: Arc<ProjectHandle>,
    pub editor: Arc<EditorHandle>,
    /// Modality the editor lives in; continuations wait until it is current
    pub modality: Modality,
    /// Overlay layer the markers are painted into
    pub markup: Box<dyn MarkerStore + Send>,
    /// Markers this session painted
    pub markers: SessionMarkers,
    pub pending: Option<PendingRequest>,
    pub in_flight: Option<InFlight>,
    generation: u64,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("id", &self.id)
            .field("document", &self.document)
            .field("modality", &self.modality)
            .field("markers", &self.markers.len())
            .field("pending", &self.pending)
            .field("in_flight", &self.in_flight)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    pub fn new(
        id: SessionId,
        document: Document,
        project: Arc<ProjectHandle>,
        editor: Arc<EditorHandle>,
    ) -> Self {
        Self {
            id,
            document,
            project,
            editor,
            modality: Modality::NON_MODAL,
            markup: Box::new(MarkupModel::new()),
            markers: SessionMarkers::new(),
            pending: None,
            in_flight: None,
            generation: 0,
        }
    }

    /// Replace the default in-memory overlay store
    pub fn with_markup(mut self, markup: Box<dyn MarkerStore + Send>) -> Self {
        self.markup = markup;
        self
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    /// Bump and return the generation; older timers and continuations go stale
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn probe(&self) -> LivenessProbe {
        LivenessProbe::new(self.project.clone(), self.editor.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rescan_absorbs_edits() {
        let edit = RecomputeRequest::Edit(EditDescriptor::insert(3, 1));
        assert_eq!(
            edit.merge(RecomputeRequest::FullRescan),
            RecomputeRequest::FullRescan
        );
        assert_eq!(
            RecomputeRequest::FullRescan.with_edit(EditDescriptor::insert(0, 1)),
            RecomputeRequest::FullRescan
        );
    }

    #[test]
    fn test_edits_merge_into_one() {
        let merged = RecomputeRequest::Edit(EditDescriptor::insert(10, 1))
            .with_edit(EditDescriptor::insert(2, 1));
        assert_eq!(merged.edit(), Some(&EditDescriptor::new(2, 10, 8)));
    }
}
