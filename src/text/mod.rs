//! Rich text storage and the plain-text codec.
//!
//! Key types:
//!
//! - [`RichBuffer`]: rope-backed text with inline emoji attachments
//! - [`EmojiCodec`]: `[key]` plain text ⇄ rich buffer conversion
//! - [`Selection`]: `(location, length)` in buffer units
//!
//! # Units
//!
//! Every offset is a Unicode scalar value (a Rust `char`). An emoji
//! attachment occupies exactly one unit, so the plain-text form of a buffer
//! is longer than the buffer by `len(key) + 1` per attachment.
//!
//! # Examples
//!
//! ```
//! use emojikit::{RichBuffer, Selection};
//! use emojikit::text::delete_backward;
//!
//! let mut buffer = RichBuffer::from_text("Hello!");
//! let caret = delete_backward(&mut buffer, Selection::caret(6)).unwrap();
//! assert_eq!(buffer.plain_text(), "Hello");
//! assert_eq!(caret, Selection::caret(5));
//! ```

mod buffer;
mod codec;
mod edit;
mod rope;
mod segment;
mod selection;

pub use buffer::RichBuffer;
pub use codec::{
    BracketCandidate, BracketScanner, EmojiCodec, KeyMatch, MatchReport, RefreshOutcome,
};
pub use edit::{delete_backward, replace_selection};
pub use rope::RopeWrapper;
pub use segment::{AttachmentBounds, EmojiAttachment, GlyphMetrics, OBJECT_REPLACEMENT, TextSegment};
pub use selection::Selection;
