//! Emoji catalog: entries, manifests and bundles.
//!
//! - [`EmojiEntry`]: one emoji, identified by its key
//! - [`Manifest`]: the on-disk `config.json` format
//! - [`EmojiBundle`]: a validated, read-only set of entries

mod bundle;
mod entry;
mod manifest;

pub use bundle::{
    DEFAULT_BUNDLE_DIR_NAME, EmojiBundle, ValidationMode, default_bundle_dir,
    replace_shared_bundle, shared_bundle,
};
#[cfg(test)]
pub(crate) use bundle::shared_bundle_test_guard;
pub use entry::{Badge, EmojiCategory, EmojiEntry, KEY_CLOSE, KEY_OPEN, is_valid_key};
pub use manifest::{MANIFEST_FILE_NAME, Manifest, ManifestEntry};
