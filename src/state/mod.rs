//! Emoji selection state: recent usage and suggestions.

mod recent;
mod selection;

pub use recent::{
    JsonFileRecentStore, MemoryRecentStore, RECENT_STORAGE_KEY, RecentStore, RecentUsage,
};
pub use selection::EmojiSelectionState;
