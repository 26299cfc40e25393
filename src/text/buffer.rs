//! Rich text buffer with inline emoji attachments.
//!
//! [`RichBuffer`] keeps its characters in a rope. Every emoji attachment is
//! stored as one [`OBJECT_REPLACEMENT`](crate::text::OBJECT_REPLACEMENT)
//! char, and a side table sorted by offset maps those chars to their
//! [`EmojiAttachment`]. A U+FFFC typed by the
//! user with no table entry is ordinary text.
//!
//! The plain-text form replaces every attachment with `[key]` and is always
//! derivable from the buffer; the attachment structure itself is never
//! serialized.

use crate::text::rope::RopeWrapper;
use crate::text::segment::{EmojiAttachment, TextSegment};
use std::fmt;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
struct AttachmentRun {
    offset: usize,
    attachment: EmojiAttachment,
}

/// Rich text: literal text interleaved with emoji attachments.
///
/// Offsets and lengths are in chars; an attachment is exactly one unit.
/// Cloning is cheap for the text part since ropes share their chunks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichBuffer {
    rope: RopeWrapper,
    attachments: Vec<AttachmentRun>,
}

impl RichBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding literal text only.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            attachments: Vec::new(),
        }
    }

    /// Create a buffer from segments.
    #[must_use]
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = TextSegment>,
    {
        let mut buffer = Self::new();
        for segment in segments {
            match segment {
                TextSegment::Text(text) => buffer.push_text(&text),
                TextSegment::Emoji(attachment) => buffer.push_emoji(attachment),
            }
        }
        buffer
    }

    /// Length in units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Raw buffer text, attachments shown as U+FFFC.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Plain-text form with every attachment written as `[key]`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.rope.len_bytes());
        let mut cursor = 0;
        for run in &self.attachments {
            self.rope.write_range(&mut out, cursor..run.offset);
            out.push_str(&run.attachment.entry().description());
            cursor = run.offset + 1;
        }
        self.rope.write_range(&mut out, cursor..self.len());
        out
    }

    /// Plain-text form of a sub-range (clamped).
    #[must_use]
    pub fn plain_text_for_range(&self, range: Range<usize>) -> String {
        self.slice(range).plain_text()
    }

    /// Split into literal and emoji runs. Adjacent text is merged.
    #[must_use]
    pub fn segments(&self) -> Vec<TextSegment> {
        let mut segments = Vec::with_capacity(self.attachments.len() * 2 + 1);
        let mut cursor = 0;
        for run in &self.attachments {
            if run.offset > cursor {
                segments.push(TextSegment::Text(
                    self.rope.slice(cursor..run.offset).to_string(),
                ));
            }
            segments.push(TextSegment::Emoji(run.attachment.clone()));
            cursor = run.offset + 1;
        }
        if cursor < self.len() {
            segments.push(TextSegment::Text(
                self.rope.slice(cursor..self.len()).to_string(),
            ));
        }
        segments
    }

    /// Attachment at an offset, if that unit is one.
    #[must_use]
    pub fn attachment_at(&self, offset: usize) -> Option<&EmojiAttachment> {
        self.attachments
            .binary_search_by_key(&offset, |run| run.offset)
            .ok()
            .map(|i| &self.attachments[i].attachment)
    }

    /// All attachments with their offsets, in order.
    pub fn attachments(&self) -> impl Iterator<Item = (usize, &EmojiAttachment)> {
        self.attachments
            .iter()
            .map(|run| (run.offset, &run.attachment))
    }

    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Literal text of a range, attachments dropped.
    #[must_use]
    pub fn literal_text(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        let mut out = String::new();
        let mut cursor = range.start;
        for (offset, _) in self.attachments_in(range.clone()) {
            self.rope.write_range(&mut out, cursor..offset);
            cursor = offset + 1;
        }
        self.rope.write_range(&mut out, cursor..range.end);
        out
    }

    /// Append literal text.
    pub fn push_text(&mut self, text: &str) {
        self.rope.append(text);
    }

    /// Append one attachment.
    pub fn push_emoji(&mut self, attachment: EmojiAttachment) {
        let offset = self.len();
        self.rope.append_placeholder();
        self.attachments.push(AttachmentRun { offset, attachment });
    }

    /// Copy out a sub-range (clamped).
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        let range = self.clamp_range(range);
        let attachments = self
            .attachments_in(range.clone())
            .map(|(offset, attachment)| AttachmentRun {
                offset: offset - range.start,
                attachment: attachment.clone(),
            })
            .collect();
        Self {
            rope: self.rope.sub_rope(range),
            attachments,
        }
    }

    /// Replace a range (clamped) with the contents of another buffer.
    pub fn splice(&mut self, range: Range<usize>, replacement: &Self) {
        let range = self.clamp_range(range);
        let inserted = replacement.len();

        self.rope.splice(range.clone(), &replacement.rope);

        let first = self.attachments.partition_point(|r| r.offset < range.start);
        let last = self.attachments.partition_point(|r| r.offset < range.end);
        let tail: Vec<AttachmentRun> = self.attachments.drain(first..).skip(last - first).collect();

        self.attachments
            .extend(replacement.attachments.iter().map(|run| AttachmentRun {
                offset: run.offset + range.start,
                attachment: run.attachment.clone(),
            }));
        self.attachments.extend(tail.into_iter().map(|mut run| {
            run.offset = run.offset - range.end + range.start + inserted;
            run
        }));
        debug_assert!(self.attachments_consistent());
    }

    /// Insert literal text at an offset (clamped).
    pub fn insert_text(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.len());
        self.splice(offset..offset, &Self::from_text(text));
    }

    /// Remove a range (clamped).
    pub fn remove(&mut self, range: Range<usize>) {
        self.splice(range, &Self::new());
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Clamp a range into `[0, len]`, fixing inverted bounds.
    #[must_use]
    pub fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        start..end
    }

    fn attachments_in(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (usize, &EmojiAttachment)> + '_ {
        let first = self.attachments.partition_point(|r| r.offset < range.start);
        self.attachments[first..]
            .iter()
            .take_while(move |r| r.offset < range.end)
            .map(|run| (run.offset, &run.attachment))
    }

    fn attachments_consistent(&self) -> bool {
        self.attachments
            .windows(2)
            .all(|pair| pair[0].offset < pair[1].offset)
            && self
                .attachments
                .iter()
                .all(|run| self.rope.is_placeholder_at(run.offset))
    }
}

impl fmt::Display for RichBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

impl From<&str> for RichBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
