//! Grapheme cluster boundaries.

use unicode_segmentation::UnicodeSegmentation;

/// Byte offset where the last grapheme cluster starts (0 for empty input).
#[must_use]
pub fn last_grapheme_start(s: &str) -> usize {
    s.grapheme_indices(true)
        .next_back()
        .map_or(0, |(offset, _)| offset)
}

/// Number of chars in the last grapheme cluster.
#[must_use]
pub fn last_grapheme_char_len(s: &str) -> usize {
    s[last_grapheme_start(s)..].chars().count()
}
