//! Selection-based edits on a [`RichBuffer`].
//!
//! These mirror what a text widget does on its own for keystrokes; the
//! controller uses them for edits that originate outside the widget (the
//! panel's delete button, the "new line" menu item).

use crate::text::buffer::RichBuffer;
use crate::text::selection::Selection;
use crate::unicode::last_grapheme_char_len;

/// Delete the selection, or the unit before a caret.
///
/// An attachment before the caret goes as a whole; otherwise the last
/// grapheme cluster of the literal run is removed. Returns the new caret, or
/// `None` if there was nothing to delete.
pub fn delete_backward(buffer: &mut RichBuffer, selection: Selection) -> Option<Selection> {
    let selection = selection.clamped(buffer.len());
    if !selection.is_collapsed() {
        buffer.remove(selection.range());
        return Some(Selection::caret(selection.location));
    }

    let caret = selection.location;
    if caret == 0 {
        return None;
    }
    if buffer.attachment_at(caret - 1).is_some() {
        buffer.remove(caret - 1..caret);
        return Some(Selection::caret(caret - 1));
    }

    let run_start = buffer
        .attachments()
        .map(|(offset, _)| offset + 1)
        .take_while(|&after| after <= caret)
        .last()
        .unwrap_or(0);
    let run = buffer.literal_text(run_start..caret);
    let start = caret - last_grapheme_char_len(&run).max(1);
    buffer.remove(start..caret);
    Some(Selection::caret(start))
}

/// Replace the selection with literal text; returns the caret after it.
pub fn replace_selection(buffer: &mut RichBuffer, selection: Selection, text: &str) -> Selection {
    let range = selection.clamped(buffer.len()).range();
    buffer.splice(range.clone(), &RichBuffer::from_text(text));
    Selection::caret(range.start + text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::EmojiEntry;
    use crate::text::segment::{EmojiAttachment, GlyphMetrics};

    fn with_emoji(before: &str, key: &str, after: &str) -> RichBuffer {
        let entry = EmojiEntry::new(key, "/nonexistent/e.png").unwrap();
        let mut buffer = RichBuffer::from_text(before);
        buffer.push_emoji(EmojiAttachment::new(entry, GlyphMetrics::default()));
        buffer.push_text(after);
        buffer
    }

    #[test]
    fn test_delete_backward_attachment() {
        let mut buffer = with_emoji("ab", "x", "");
        let caret = delete_backward(&mut buffer, Selection::caret(3)).unwrap();
        assert_eq!(caret, Selection::caret(2));
        assert_eq!(buffer.plain_text(), "ab");
    }

    #[test]
    fn test_delete_backward_grapheme_after_attachment() {
        let mut buffer = with_emoji("", "x", "e\u{0301}");
        let caret = delete_backward(&mut buffer, Selection::caret(3)).unwrap();
        assert_eq!(caret, Selection::caret(1));
        assert_eq!(buffer.plain_text(), "[x]");
    }

    #[test]
    fn test_delete_backward_selection() {
        let mut buffer = with_emoji("ab", "x", "cd");
        let caret = delete_backward(&mut buffer, Selection::new(1, 3)).unwrap();
        assert_eq!(caret, Selection::caret(1));
        assert_eq!(buffer.plain_text(), "ad");
    }

    #[test]
    fn test_delete_backward_at_start() {
        let mut buffer = RichBuffer::from_text("abc");
        assert_eq!(delete_backward(&mut buffer, Selection::caret(0)), None);
        assert_eq!(buffer.plain_text(), "abc");
    }

    #[test]
    fn test_replace_selection() {
        let mut buffer = RichBuffer::from_text("hello world");
        let caret = replace_selection(&mut buffer, Selection::new(5, 1), "\n");
        assert_eq!(buffer.text(), "hello\nworld");
        assert_eq!(caret, Selection::caret(6));
    }
}
