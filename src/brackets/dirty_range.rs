//! Dirty range resolution
//!
//! Narrows a recompute pass to the top-level form(s) an edit touched, so a
//! keystroke inside one form never rescans the whole file.

use std::ops::Range;

use super::edit::EditDescriptor;
use super::token::{enclosing_form, SyntaxTree};

/// Half-open byte interval `[start, end)` that must be rescanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    pub start: usize,
    pub end: usize,
}

impl DirtyRange {
    /// Create a range, swapping the bounds if they are reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// The whole buffer
    pub fn whole(buffer_len: usize) -> Self {
        Self::new(0, buffer_len)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `[start, end)` intersects this range
    ///
    /// An empty dirty range still claims markers starting at its position.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if self.is_empty() {
            return start <= self.start && self.start < end.max(start + 1);
        }
        start < self.end && self.start < end
    }

    /// Clamp both bounds to `buffer_len`
    pub fn clamp(self, buffer_len: usize) -> Self {
        Self::new(self.start.min(buffer_len), self.end.min(buffer_len))
    }
}

/// Compute the region to rescan for `edit`
///
/// With no edit the whole buffer is dirty. Otherwise the range covers the
/// top-level form(s) enclosing the edit, widened to include the inserted
/// text and the gap up to the next form. An edit that lands between forms
/// also claims the gap back to the previous form. Brackets an edit orphaned
/// sit in those gaps, so their markers get recomputed.
pub fn resolve_dirty_range<T: SyntaxTree + ?Sized>(
    buffer_len: usize,
    tree: &T,
    edit: Option<&EditDescriptor>,
) -> DirtyRange {
    let Some(edit) = edit else {
        return DirtyRange::whole(buffer_len);
    };

    let edit_start = edit.offset.min(buffer_len);
    let edit_end = edit.new_end().min(buffer_len);
    let forms = tree.top_level_forms();

    let first = enclosing_form(forms.iter().cloned(), edit_start);
    let last = if edit_end > edit_start {
        enclosing_form(forms.iter().cloned(), edit_end)
    } else {
        None
    };

    let mut start = edit_start;
    let mut end = edit_end;
    for form in first.iter().chain(last.iter()) {
        start = start.min(form.start);
        end = end.max(form.end);
    }

    if !forms.iter().any(|f| f.start <= edit_start && edit_start < f.end) {
        tracing::trace!("Edit at {} lies between forms, widening to the gap", edit.offset);
        start = forms
            .iter()
            .rev()
            .map(|f| f.end)
            .find(|&form_end| form_end <= start)
            .unwrap_or(0);
    }
    end = forms
        .iter()
        .map(|f| f.start)
        .find(|&form_start| form_start >= end)
        .unwrap_or(buffer_len);

    DirtyRange::new(start, end).clamp(buffer_len)
}
