//! Char-indexed rope storage for [`RichBuffer`](crate::text::RichBuffer).
//!
//! All indices are char indices. Out-of-range arguments are clamped rather
//! than rejected, because selections coming from the host widget may lag one
//! edit behind the buffer.

use crate::text::segment::OBJECT_REPLACEMENT;
use ropey::{Rope, RopeSlice};
use std::ops::Range;

/// Wrapper around `ropey::Rope` with clamping edits.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    #[must_use]
    pub fn char(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }

    /// Borrow a sub-range; out-of-range requests yield an empty slice.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> RopeSlice<'_> {
        self.rope
            .get_slice(range)
            .unwrap_or_else(|| self.rope.slice(..0))
    }

    /// Copy a sub-range (clamped) into a new rope.
    #[must_use]
    pub fn sub_rope(&self, range: Range<usize>) -> Self {
        let range = self.clamp(range);
        Self {
            rope: Rope::from(self.rope.slice(range)),
        }
    }

    /// Append the text of a sub-range (clamped) to `out`.
    pub fn write_range(&self, out: &mut String, range: Range<usize>) {
        let range = self.clamp(range);
        for chunk in self.rope.slice(range).chunks() {
            out.push_str(chunk);
        }
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if !range.is_empty() {
            self.rope.remove(range);
        }
    }

    /// Replace a sub-range (clamped) with the contents of `other`.
    pub fn splice(&mut self, range: Range<usize>, other: &Self) {
        let range = self.clamp(range);
        self.remove(range.clone());
        let mut at = range.start;
        for chunk in other.rope.chunks() {
            self.rope.insert(at, chunk);
            at += chunk.chars().count();
        }
    }

    pub fn append(&mut self, text: &str) {
        let len = self.len_chars();
        self.rope.insert(len, text);
    }

    /// Append the one-char stand-in for an attachment.
    pub fn append_placeholder(&mut self) {
        let len = self.len_chars();
        self.rope.insert_char(len, OBJECT_REPLACEMENT);
    }

    /// Whether the char at `char_idx` is an attachment stand-in.
    #[must_use]
    pub fn is_placeholder_at(&self, char_idx: usize) -> bool {
        self.char(char_idx) == Some(OBJECT_REPLACEMENT)
    }

    #[must_use]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let start = range.start.min(len);
        start..range.end.min(len).max(start)
    }
}

impl PartialEq for RopeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl Eq for RopeWrapper {}

impl From<&str> for RopeWrapper {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
