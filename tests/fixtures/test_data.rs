//! Sample data for emojikit tests.

use chrono::{DateTime, TimeZone, Utc};
use emojikit::{EmojiBundle, EmojiEntry};
use std::sync::Arc;

/// Keys of [`sample_bundle`], in bundle order.
pub const SAMPLE_KEYS: &[&str] = &["smile", "cry", "heart", "ok", "fire", "wave", "cat", "dog"];

/// In-memory bundle of [`SAMPLE_KEYS`]; assets do not exist.
pub fn sample_bundle() -> Arc<EmojiBundle> {
    let entries = SAMPLE_KEYS
        .iter()
        .map(|key| EmojiEntry::new(*key, format!("/nonexistent/{key}.png")).expect("valid key"))
        .collect();
    Arc::new(EmojiBundle::from_entries(1, entries).expect("unique keys"))
}

/// A fixed instant for availability tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Plain texts with a mix of resolvable, unknown and malformed keys.
pub const MIXED_TEXTS: &[&str] = &[
    "",
    "plain text",
    "[smile]",
    "[smile][cry]",
    "hello [smile] world",
    "[nope]",
    "[[smile]",
    "[smile]]",
    "[]",
    "[sm\nile]",
    "中文[heart]テキスト",
    "👨‍👩‍👧‍👦[ok]🇺🇸",
];
