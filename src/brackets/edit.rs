//! Edit descriptors reported by the document

/// A single buffer change, in byte offsets
///
/// The original text `[offset, offset + removed_len)` was replaced by the new
/// text `[offset, offset + inserted_len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDescriptor {
    pub offset: usize,
    pub inserted_len: usize,
    pub removed_len: usize,
}

impl EditDescriptor {
    pub const fn new(offset: usize, inserted_len: usize, removed_len: usize) -> Self {
        Self {
            offset,
            inserted_len,
            removed_len,
        }
    }

    pub const fn insert(offset: usize, len: usize) -> Self {
        Self::new(offset, len, 0)
    }

    pub const fn delete(offset: usize, len: usize) -> Self {
        Self::new(offset, 0, len)
    }

    /// End of the inserted text in post-edit coordinates
    pub const fn new_end(&self) -> usize {
        self.offset + self.inserted_len
    }

    /// End of the removed text in pre-edit coordinates
    pub const fn old_end(&self) -> usize {
        self.offset + self.removed_len
    }

    /// Net change in buffer length
    pub fn delta(&self) -> isize {
        self.inserted_len as isize - self.removed_len as isize
    }

    /// Map an offset from before this edit to after it
    ///
    /// Offsets inside the removed text collapse onto the edit offset.
    pub fn map_offset(&self, offset: usize) -> usize {
        if offset <= self.offset {
            offset
        } else if offset >= self.old_end() {
            offset - self.removed_len + self.inserted_len
        } else {
            self.offset
        }
    }

    /// Fold a later edit into this one
    ///
    /// The result is a single descriptor whose inserted text covers both
    /// edits' affected regions after `later` has been applied.
    pub fn merge(self, later: EditDescriptor) -> EditDescriptor {
        let start = later.map_offset(self.offset).min(later.offset);
        let end = later.map_offset(self.new_end()).max(later.new_end());

        let delta = self.delta() + later.delta();
        let old_end = ((end as isize) - delta).max(start as isize) as usize;

        EditDescriptor::new(start, end - start, old_end - start)
    }
}
