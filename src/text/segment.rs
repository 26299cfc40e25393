//! Segments of a rich buffer and inline emoji attachments.

use crate::emoji::EmojiEntry;
use std::path::Path;

/// Char stored in the rope where an attachment sits.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Horizontal padding on each side of an inline emoji.
const HORIZONTAL_PADDING: f64 = 1.0;

/// Font metrics needed to size an inline emoji.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    /// Line height of the surrounding font.
    pub line_height: f64,
    /// Descender (negative below the baseline).
    pub descender: f64,
}

impl GlyphMetrics {
    #[must_use]
    pub fn new(line_height: f64, descender: f64) -> Self {
        Self {
            line_height,
            descender,
        }
    }
}

impl Default for GlyphMetrics {
    /// 14pt system font.
    fn default() -> Self {
        Self {
            line_height: 16.7,
            descender: -3.4,
        }
    }
}

/// Layout box of an inline emoji relative to the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachmentBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AttachmentBounds {
    /// Square glyph of line height, padded horizontally, sitting on the descender.
    #[must_use]
    pub fn for_metrics(metrics: GlyphMetrics) -> Self {
        Self {
            x: 0.0,
            y: metrics.descender,
            width: metrics.line_height + HORIZONTAL_PADDING * 2.0,
            height: metrics.line_height,
        }
    }
}

/// An emoji placed inline in a rich buffer. Occupies exactly one char.
#[derive(Clone, Debug, PartialEq)]
pub struct EmojiAttachment {
    entry: EmojiEntry,
    bounds: AttachmentBounds,
    placeholder: bool,
}

impl EmojiAttachment {
    /// Build the attachment for an entry. A missing asset renders as a placeholder.
    #[must_use]
    pub fn new(entry: EmojiEntry, metrics: GlyphMetrics) -> Self {
        let placeholder = !entry.asset_exists();
        Self {
            entry,
            bounds: AttachmentBounds::for_metrics(metrics),
            placeholder,
        }
    }

    /// The originating entry.
    #[must_use]
    pub fn entry(&self) -> &EmojiEntry {
        &self.entry
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.entry.key()
    }

    #[must_use]
    pub fn bounds(&self) -> AttachmentBounds {
        self.bounds
    }

    /// Image to draw, or `None` for a placeholder.
    #[must_use]
    pub fn image(&self) -> Option<&Path> {
        (!self.placeholder).then(|| self.entry.asset())
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// A run of a rich buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum TextSegment {
    /// Literal text.
    Text(String),
    /// One resolved emoji.
    Emoji(EmojiAttachment),
}

impl TextSegment {
    /// Length in buffer units (chars; an emoji is one unit).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Emoji(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Emoji(_) => false,
        }
    }

    /// Plain-text form: the text itself, or `[key]`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Emoji(attachment) => attachment.entry().description(),
        }
    }
}
