//! Conversion between plain text with `[key]` markers and rich buffers.
//!
//! # Scanning
//!
//! Candidates are found left to right: a `[`, one or more chars that are
//! neither `]` nor a line break, then the first `]`. The bracket interior is
//! looked up as a key. Resolved candidates become attachments; unresolved
//! ones stay as literal text. Either way scanning resumes right after the
//! candidate, so candidates never overlap. For `[[a]` the leftmost `[` wins
//! and the interior is `[a`, which can never be a key.
//!
//! # Match classification
//!
//! [`MatchReport::FullMatch`] means the resolved spans are contiguous from the
//! first char to the last; anything less with at least one resolved span is
//! [`MatchReport::PartialMatch`].
//!
//! # Examples
//!
//! ```
//! use emojikit::{EmojiBundle, EmojiCodec, EmojiEntry, GlyphMetrics, MatchReport};
//! use std::sync::Arc;
//!
//! let bundle = EmojiBundle::from_entries(1, vec![
//!     EmojiEntry::new("smile", "smile.png").unwrap(),
//! ]).unwrap();
//! let codec = EmojiCodec::new(Arc::new(bundle), GlyphMetrics::default());
//!
//! let (buffer, report) = codec.decode_from_plain("hi [smile] [nope]");
//! assert_eq!(report, MatchReport::PartialMatch);
//! assert_eq!(buffer.attachment_count(), 1);
//! assert_eq!(codec.encode_to_plain(&buffer), "hi [smile] [nope]");
//! ```

use crate::emoji::{EmojiBundle, EmojiEntry, KEY_CLOSE, KEY_OPEN};
use crate::text::buffer::RichBuffer;
use crate::text::segment::{EmojiAttachment, GlyphMetrics, TextSegment};
use crate::text::selection::Selection;
use std::ops::Range;
use std::sync::Arc;

/// How much of a text was converted to emoji.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchReport {
    /// Empty input, or nothing resolved.
    #[default]
    NoMatches,
    /// Some emoji, with literal text left around them.
    PartialMatch,
    /// Emoji only, back to back.
    FullMatch,
}

impl MatchReport {
    /// Classify from the total length and resolved spans (ascending, disjoint).
    #[must_use]
    pub fn from_spans(len: usize, spans: &[Range<usize>]) -> Self {
        if len == 0 || spans.is_empty() {
            return Self::NoMatches;
        }
        let mut cursor = 0;
        for span in spans {
            if span.start != cursor {
                return Self::PartialMatch;
            }
            cursor = span.end;
        }
        if cursor == len {
            Self::FullMatch
        } else {
            Self::PartialMatch
        }
    }

    /// At least one emoji was found.
    #[must_use]
    pub fn has_emoji(self) -> bool {
        self != Self::NoMatches
    }
}

/// A `[...]` candidate found by [`BracketScanner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketCandidate<'a> {
    /// Char range including both brackets.
    pub range: Range<usize>,
    /// Interior text.
    pub key: &'a str,
}

/// Iterator over bracket candidates of a string.
#[derive(Clone, Debug)]
pub struct BracketScanner<'a> {
    text: &'a str,
    byte: usize,
    char_pos: usize,
}

impl<'a> BracketScanner<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            char_pos: 0,
        }
    }

    fn advance(&mut self, bytes: usize) {
        let skipped = &self.text[self.byte..self.byte + bytes];
        self.char_pos += skipped.chars().count();
        self.byte += bytes;
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl<'a> Iterator for BracketScanner<'a> {
    type Item = BracketCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = self.text[self.byte..].find(KEY_OPEN)?;
            self.advance(open);

            let interior_start = self.byte + KEY_OPEN.len_utf8();
            let rest = &self.text[interior_start..];
            let stop = rest.find(|c: char| c == KEY_CLOSE || is_line_break(c))?;

            if stop == 0 || !rest[stop..].starts_with(KEY_CLOSE) {
                // Empty interior or broken by a line break: no match at this `[`.
                self.advance(KEY_OPEN.len_utf8());
                continue;
            }

            let key = &rest[..stop];
            let start = self.char_pos;
            self.advance(KEY_OPEN.len_utf8() + stop + KEY_CLOSE.len_utf8());
            return Some(BracketCandidate {
                range: start..self.char_pos,
                key,
            });
        }
    }
}

/// A bracket candidate that resolved to a bundle entry.
#[derive(Clone, Debug)]
pub struct KeyMatch<'b> {
    /// Char range including both brackets.
    pub range: Range<usize>,
    pub entry: &'b EmojiEntry,
}

/// Result of [`EmojiCodec::refresh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// An input-method composition is in progress; nothing was touched.
    Skipped,
    /// No resolvable key; buffer and selection are untouched.
    Unchanged,
    /// Keys were converted.
    Converted {
        /// Number of new attachments.
        converted: usize,
        /// Net units removed from the buffer.
        removed: usize,
    },
}

/// Plain text ⇄ rich buffer conversion against one bundle.
#[derive(Clone, Debug)]
pub struct EmojiCodec {
    bundle: Arc<EmojiBundle>,
    metrics: GlyphMetrics,
}

impl EmojiCodec {
    /// Create a codec sizing emoji with `metrics`.
    #[must_use]
    pub fn new(bundle: Arc<EmojiBundle>, metrics: GlyphMetrics) -> Self {
        Self { bundle, metrics }
    }

    #[must_use]
    pub fn bundle(&self) -> &Arc<EmojiBundle> {
        &self.bundle
    }

    /// Swap the bundle used for key resolution.
    pub fn set_bundle(&mut self, bundle: Arc<EmojiBundle>) {
        self.bundle = bundle;
    }

    #[must_use]
    pub fn metrics(&self) -> GlyphMetrics {
        self.metrics
    }

    /// Change the size hint for emoji built from now on.
    pub fn set_metrics(&mut self, metrics: GlyphMetrics) {
        self.metrics = metrics;
    }

    /// Build the inline attachment for an entry.
    #[must_use]
    pub fn attachment(&self, entry: &EmojiEntry) -> EmojiAttachment {
        EmojiAttachment::new(entry.clone(), self.metrics)
    }

    /// Resolved `[key]` spans of a string, left to right. Keys go through
    /// [`EmojiBundle::lookup`], so misses and missing assets are logged.
    pub fn matches<'s>(&'s self, text: &'s str) -> impl Iterator<Item = KeyMatch<'s>> + 's {
        BracketScanner::new(text).filter_map(move |candidate| {
            self.bundle.lookup(candidate.key).ok().map(|entry| KeyMatch {
                range: candidate.range,
                entry,
            })
        })
    }

    /// Replace every attachment with `[key]`.
    #[must_use]
    pub fn encode_to_plain(&self, buffer: &RichBuffer) -> String {
        buffer.plain_text()
    }

    /// Convert every resolvable `[key]` of `text` into an attachment.
    #[must_use]
    pub fn decode_from_plain(&self, text: &str) -> (RichBuffer, MatchReport) {
        let mut buffer = RichBuffer::new();
        let mut spans = Vec::new();
        let mut byte = 0;
        let mut char_pos = 0;

        for KeyMatch { range, entry } in self.matches(text) {
            // Everything between the previous match and this one is literal.
            let literal_chars = range.start - char_pos;
            let literal_bytes = byte_len_of_chars(&text[byte..], literal_chars);
            buffer.push_text(&text[byte..byte + literal_bytes]);
            buffer.push_emoji(self.attachment(entry));

            byte += literal_bytes + entry.key().len() + KEY_OPEN.len_utf8() + KEY_CLOSE.len_utf8();
            char_pos = range.end;
            spans.push(range);
        }
        buffer.push_text(&text[byte..]);

        let len = char_pos + text[byte..].chars().count();
        (buffer, MatchReport::from_spans(len, &spans))
    }

    /// Classify a string without building a buffer.
    #[must_use]
    pub fn classify(&self, text: &str) -> MatchReport {
        let spans: Vec<Range<usize>> = self.matches(text).map(|m| m.range).collect();
        if spans.is_empty() {
            return MatchReport::NoMatches;
        }
        MatchReport::from_spans(text.chars().count(), &spans)
    }

    /// Classify a rich buffer by its attachments.
    #[must_use]
    pub fn buffer_report(&self, buffer: &RichBuffer) -> MatchReport {
        let spans: Vec<Range<usize>> = buffer
            .attachments()
            .map(|(offset, _)| offset..offset + 1)
            .collect();
        MatchReport::from_spans(buffer.len(), &spans)
    }

    /// Convert resolvable keys typed into `buffer`, keeping the caret on the
    /// same logical character.
    ///
    /// Only literal runs are scanned, so existing attachments are kept as they
    /// are. Does nothing while `composing`.
    pub fn refresh(
        &self,
        buffer: &mut RichBuffer,
        selection: &mut Selection,
        composing: bool,
    ) -> RefreshOutcome {
        if composing {
            tracing::trace!("composition in progress, skipping emoji refresh");
            return RefreshOutcome::Skipped;
        }

        let mut conversions: Vec<(Range<usize>, EmojiAttachment)> = Vec::new();
        let mut offset = 0;
        for segment in buffer.segments() {
            match segment {
                TextSegment::Text(text) => {
                    conversions.extend(self.matches(&text).map(|m| {
                        (
                            m.range.start + offset..m.range.end + offset,
                            self.attachment(m.entry),
                        )
                    }));
                    offset += text.chars().count();
                }
                TextSegment::Emoji(_) => offset += 1,
            }
        }

        if conversions.is_empty() {
            return RefreshOutcome::Unchanged;
        }

        let old = selection.clamped(buffer.len());
        let start = map_offset(old.location, &conversions);
        let end = map_offset(old.end(), &conversions);

        let mut removed = 0;
        for (range, attachment) in conversions.iter().rev() {
            let mut run = RichBuffer::new();
            run.push_emoji(attachment.clone());
            removed += range.len() - 1;
            buffer.splice(range.clone(), &run);
        }

        *selection = Selection::from_range(start..end).clamped(buffer.len());
        RefreshOutcome::Converted {
            converted: conversions.len(),
            removed,
        }
    }

    /// Replace `range` with one emoji; returns the caret right after it.
    pub fn insert_emoji(
        &self,
        buffer: &mut RichBuffer,
        range: Range<usize>,
        entry: &EmojiEntry,
    ) -> Selection {
        let range = buffer.clamp_range(range);
        let mut run = RichBuffer::new();
        run.push_emoji(self.attachment(entry));
        buffer.splice(range.clone(), &run);
        Selection::caret(range.start + 1)
    }

    /// Plain text of the selected units, or `None` when nothing is selected.
    #[must_use]
    pub fn copy(&self, buffer: &RichBuffer, selection: Selection) -> Option<String> {
        let range = selection.clamped(buffer.len()).range();
        if range.is_empty() {
            return None;
        }
        Some(buffer.plain_text_for_range(range))
    }

    /// Remove the selected units, returning their plain text and the new caret.
    pub fn cut(
        &self,
        buffer: &mut RichBuffer,
        selection: Selection,
    ) -> Option<(String, Selection)> {
        let text = self.copy(buffer, selection)?;
        let range = selection.clamped(buffer.len()).range();
        buffer.remove(range.clone());
        Some((text, Selection::caret(range.start)))
    }

    /// Decode external plain text and put it in place of the selection.
    /// Returns the caret after the pasted content, or `None` for empty text.
    pub fn paste(
        &self,
        buffer: &mut RichBuffer,
        selection: Selection,
        text: &str,
    ) -> Option<Selection> {
        if text.is_empty() {
            return None;
        }
        let (pasted, _) = self.decode_from_plain(text);
        let range = selection.clamped(buffer.len()).range();
        buffer.splice(range.clone(), &pasted);
        Some(Selection::caret(range.start + pasted.len()))
    }
}

fn byte_len_of_chars(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(byte, _)| byte)
}

// Position after converting every span; a position inside a span lands
// right after its attachment.
fn map_offset(pos: usize, conversions: &[(Range<usize>, EmojiAttachment)]) -> usize {
    let mut shift = 0;
    for (range, _) in conversions {
        if pos >= range.end {
            shift += range.len() - 1;
        } else if pos > range.start {
            return range.start - shift + 1;
        } else {
            break;
        }
    }
    pos - shift
}
