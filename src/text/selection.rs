//! Selection in buffer units.

use std::ops::Range;

/// A selection as `(location, length)` in chars. Length 0 is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub location: usize,
    pub length: usize,
}

impl Selection {
    /// Create a new selection.
    #[must_use]
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// A caret at `location`.
    #[must_use]
    pub fn caret(location: usize) -> Self {
        Self {
            location,
            length: 0,
        }
    }

    /// Selection covering a range.
    #[must_use]
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            location: range.start,
            length: range.end.saturating_sub(range.start),
        }
    }

    /// One past the last selected unit.
    #[must_use]
    pub fn end(&self) -> usize {
        self.location + self.length
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.location..self.end()
    }

    /// Check if this is a caret.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.length == 0
    }

    /// Clamp both ends into `[0, len]`.
    #[must_use]
    pub fn clamped(&self, len: usize) -> Self {
        let start = self.location.min(len);
        let end = self.end().min(len);
        Self::from_range(start..end)
    }
}
