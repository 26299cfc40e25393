//! `emojikit` - emoji-aware text input core
//!
//! Emoji travel as `[key]` in plain text and live as single-unit inline
//! attachments in a rich buffer. This crate converts between the two forms,
//! loads emoji bundles with time-limited availability, tracks recently used
//! emoji, and drives the keyboard/emoji-panel state around a host text widget.

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // EmojiEntry in emoji, etc.
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_precision_loss)] // Glyph metrics are small
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional

pub mod config;
pub mod emoji;
pub mod error;
pub mod event;
pub mod input;
pub mod state;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use config::EmojiKitConfig;
pub use emoji::{Badge, EmojiBundle, EmojiCategory, EmojiEntry, ValidationMode};
pub use error::{Error, Result};
pub use event::{EmojiEvent, EventListeners, ListenerId};

// Re-export text types
pub use text::{EmojiCodec, GlyphMetrics, MatchReport, RefreshOutcome, RichBuffer, Selection};

// Re-export state and input types
pub use input::{
    Clipboard, EmojiTextInput, InputSurface, KeyboardEvent, KeyboardMode, MemoryClipboard,
    MemorySurface, SurfaceVisibility,
};
pub use state::{EmojiSelectionState, JsonFileRecentStore, MemoryRecentStore, RecentStore};
