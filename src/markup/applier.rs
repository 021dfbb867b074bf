//! Painting matched brackets into the marker store

use crate::brackets::{BracketPair, DirtyRange};
use crate::theme::ColorScheme;

use super::store::{MarkerHandle, MarkerStore};

/// Markers a session has painted and may later replace
#[derive(Debug, Clone, Default)]
pub struct SessionMarkers {
    handles: Vec<MarkerHandle>,
}

impl SessionMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handles(&self) -> &[MarkerHandle] {
        &self.handles
    }

    /// Remove every owned marker overlapping `range` from the store
    ///
    /// Handles whose markers the store already dropped are forgotten too.
    pub fn remove_in_range(&mut self, store: &mut dyn MarkerStore, range: DirtyRange) -> usize {
        let mut removed = 0;
        self.handles.retain(|&handle| match store.marker_range(handle) {
            Some(r) if range.overlaps(r.start, r.end) => {
                if store.remove_marker(handle) {
                    removed += 1;
                }
                false
            }
            Some(_) => true,
            None => false,
        });
        removed
    }

    /// Remove every owned marker from the store
    pub fn clear(&mut self, store: &mut dyn MarkerStore) -> usize {
        let mut removed = 0;
        for handle in self.handles.drain(..) {
            if store.remove_marker(handle) {
                removed += 1;
            }
        }
        removed
    }
}

/// Outcome of one apply step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub removed: usize,
    pub added: usize,
}

/// Replace the session's markers in `range` with markers for `pairs`
///
/// Each pair becomes a one-character marker `[offset, offset + 1)`, non-greedy
/// on both edges, colored by `scheme.attribute_for(level)`. Markers from an
/// earlier pass over the same range are removed first, so applying the same
/// pairs twice leaves the store unchanged.
pub fn apply_highlights(
    markers: &mut SessionMarkers,
    store: &mut dyn MarkerStore,
    scheme: &dyn ColorScheme,
    range: DirtyRange,
    pairs: &[BracketPair],
) -> ApplyStats {
    let removed = markers.remove_in_range(store, range);

    for pair in pairs {
        let attributes = scheme.attribute_for(pair.level);
        let handle = store.add_marker(pair.offset, pair.offset + 1, attributes, false, false);
        markers.handles.push(handle);
    }

    ApplyStats {
        removed,
        added: pairs.len(),
    }
}
