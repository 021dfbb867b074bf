//! Marker store: the overlay layer bracket highlights are painted into

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::brackets::EditDescriptor;
use crate::theme::TextAttributes;

/// Opaque handle to a marker owned by a [`MarkerStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

/// The UI overlay store
///
/// Markers are half-open byte ranges that follow the text as it is edited.
/// A greedy edge grows when text is typed exactly at that edge; a non-greedy
/// edge does not.
pub trait MarkerStore {
    fn add_marker(
        &mut self,
        start: usize,
        end: usize,
        attributes: TextAttributes,
        greedy_left: bool,
        greedy_right: bool,
    ) -> MarkerHandle;

    /// Remove a marker; returns false if it was already gone
    fn remove_marker(&mut self, handle: MarkerHandle) -> bool;

    /// Current range of a live marker
    fn marker_range(&self, handle: MarkerHandle) -> Option<Range<usize>>;

    /// Move markers to account for a buffer edit
    fn apply_edit(&mut self, edit: &EditDescriptor);
}

/// One marker in a [`MarkupModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMarker {
    pub start: usize,
    pub end: usize,
    pub attributes: TextAttributes,
    pub greedy_left: bool,
    pub greedy_right: bool,
}

impl RangeMarker {
    /// Position after `edit`, or `None` when the edit destroyed the marker
    fn shifted(mut self, edit: &EditDescriptor) -> Option<Self> {
        let (o, removed_end) = (edit.offset, edit.old_end());

        if edit.removed_len > 0 {
            if removed_end <= self.start {
                self.start = self.start - edit.removed_len + edit.inserted_len;
                self.end = self.end - edit.removed_len + edit.inserted_len;
                return Some(self);
            }
            if self.end <= o {
                return Some(self);
            }
            if o <= self.start && self.end <= removed_end {
                return None;
            }
            // Partial overlap: keep the surviving part, excluding new text
            let start = if self.start < o {
                self.start
            } else {
                o + edit.inserted_len
            };
            let end = if self.end > removed_end {
                self.end - edit.removed_len + edit.inserted_len
            } else {
                o
            };
            if start >= end {
                return None;
            }
            self.start = start;
            self.end = end;
            return Some(self);
        }

        let len = edit.inserted_len;
        if o < self.start || (o == self.start && !self.greedy_left) {
            self.start += len;
            self.end += len;
        } else if o < self.end || (o == self.end && self.greedy_right) {
            self.end += len;
        }
        Some(self)
    }
}

/// In-memory marker store
///
/// Counts every mutation so callers can assert that a pass did nothing.
#[derive(Debug, Clone, Default)]
pub struct MarkupModel {
    markers: BTreeMap<MarkerHandle, RangeMarker>,
    next_id: u64,
    mutations: u64,
}

impl MarkupModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of add/remove operations performed so far
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&RangeMarker> {
        self.markers.get(&handle)
    }

    /// All live markers ordered by start offset
    pub fn markers(&self) -> Vec<RangeMarker> {
        let mut markers: Vec<RangeMarker> = self.markers.values().copied().collect();
        markers.sort_by_key(|m| (m.start, m.end));
        markers
    }

    /// Attribute of the marker covering `offset`, if any
    pub fn attribute_at(&self, offset: usize) -> Option<TextAttributes> {
        self.markers
            .values()
            .find(|m| m.start <= offset && offset < m.end)
            .map(|m| m.attributes)
    }
}

impl MarkerStore for MarkupModel {
    fn add_marker(
        &mut self,
        start: usize,
        end: usize,
        attributes: TextAttributes,
        greedy_left: bool,
        greedy_right: bool,
    ) -> MarkerHandle {
        self.next_id += 1;
        let handle = MarkerHandle(self.next_id);
        self.markers.insert(
            handle,
            RangeMarker {
                start,
                end,
                attributes,
                greedy_left,
                greedy_right,
            },
        );
        self.mutations += 1;
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> bool {
        let removed = self.markers.remove(&handle).is_some();
        if removed {
            self.mutations += 1;
        }
        removed
    }

    fn marker_range(&self, handle: MarkerHandle) -> Option<Range<usize>> {
        self.markers.get(&handle).map(|m| m.start..m.end)
    }

    fn apply_edit(&mut self, edit: &EditDescriptor) {
        let mut destroyed = 0usize;
        self.markers.retain(|_, marker| match marker.shifted(edit) {
            Some(moved) => {
                *marker = moved;
                true
            }
            None => {
                destroyed += 1;
                false
            }
        });
        if destroyed > 0 {
            tracing::trace!(
                "Edit at {} destroyed {} marker(s)",
                edit.offset,
                destroyed
            );
        }
    }
}

/// A [`MarkupModel`] that can be read from outside the session owning it
///
/// The session writes through one clone while a renderer reads another.
#[derive(Debug, Clone, Default)]
pub struct SharedMarkup(Arc<Mutex<MarkupModel>>);

impl SharedMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the underlying model; a poisoned lock is recovered
    pub fn lock(&self) -> MutexGuard<'_, MarkupModel> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MarkerStore for SharedMarkup {
    fn add_marker(
        &mut self,
        start: usize,
        end: usize,
        attributes: TextAttributes,
        greedy_left: bool,
        greedy_right: bool,
    ) -> MarkerHandle {
        self.lock()
            .add_marker(start, end, attributes, greedy_left, greedy_right)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> bool {
        self.lock().remove_marker(handle)
    }

    fn marker_range(&self, handle: MarkerHandle) -> Option<Range<usize>> {
        self.lock().marker_range(handle)
    }

    fn apply_edit(&mut self, edit: &EditDescriptor) {
        self.lock().apply_edit(edit)
    }
}
