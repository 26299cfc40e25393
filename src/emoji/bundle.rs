//! Loaded emoji bundles.
//!
//! A bundle is a directory holding `config.json` plus the image assets it
//! references. Loading never panics: the `*_or_invalid` constructors log the
//! failure and hand back [`EmojiBundle::invalid`], which simply has no
//! entries, so callers degrade to "no emoji available".

use crate::config::EmojiKitConfig;
use crate::emoji::entry::EmojiEntry;
use crate::emoji::manifest::Manifest;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// Directory name of the bundle shipped with the crate.
pub const DEFAULT_BUNDLE_DIR_NAME: &str = "emojis_bundle";

/// When asset files are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every asset must exist at load time; the first missing one fails the load.
    Strict,
    /// Assets are checked on lookup and a missing one is only logged.
    Relaxed,
}

impl Default for ValidationMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Relaxed
        }
    }
}

/// Validated, immutable collection of emoji entries.
#[derive(Clone, Debug, Default)]
pub struct EmojiBundle {
    root: PathBuf,
    version: u32,
    entries: Vec<EmojiEntry>,
    index: HashMap<String, usize>,
    validation: ValidationMode,
}

impl EmojiBundle {
    /// The empty sentinel: no entries, version 0.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            validation: ValidationMode::Relaxed,
            ..Self::default()
        }
    }

    /// Load a bundle directory.
    pub fn load(root: impl AsRef<Path>, validation: ValidationMode) -> Result<Self> {
        let root = root.as_ref();
        let manifest = Manifest::read(root)?;
        Self::from_manifest(root, manifest, validation)
    }

    /// Load a bundle directory with the build's default validation mode.
    pub fn load_from_directory(root: impl AsRef<Path>) -> Result<Self> {
        Self::load(root, ValidationMode::default())
    }

    /// Load a distributable archive.
    ///
    /// Archives are not unpacked here. `path` may be the unpacked directory
    /// itself, or the archive file when a sibling directory with the same stem
    /// (`emoji_pack.zip` -> `emoji_pack/`) already holds its contents.
    pub fn load_from_archive(path: impl AsRef<Path>, validation: ValidationMode) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::load(path, validation);
        }
        let unpacked = path.file_stem().map(|stem| path.with_file_name(stem));
        match unpacked {
            Some(dir) if dir.is_dir() => Self::load(dir, validation),
            _ => Err(Error::ArchiveUnavailable(path.to_path_buf())),
        }
    }

    /// Load the configured bundle, falling back to the shipped one.
    #[must_use]
    pub fn load_default(config: &EmojiKitConfig) -> Self {
        let root = config.bundle_dir.clone().unwrap_or_else(default_bundle_dir);
        Self::load_or_invalid(root, config.validation)
    }

    /// Like [`load`](Self::load), but logs and returns the sentinel on failure.
    #[must_use]
    pub fn load_or_invalid(root: impl AsRef<Path>, validation: ValidationMode) -> Self {
        let root = root.as_ref();
        match Self::load(root, validation) {
            Ok(bundle) => {
                tracing::debug!(
                    root = %root.display(),
                    version = bundle.version,
                    entries = bundle.len(),
                    "loaded emoji bundle"
                );
                bundle
            }
            Err(err) => {
                tracing::error!(
                    root = %root.display(),
                    error = %err,
                    "failed to load emoji bundle"
                );
                Self::invalid()
            }
        }
    }

    /// Build a bundle from an already parsed manifest.
    pub fn from_manifest(
        root: impl Into<PathBuf>,
        manifest: Manifest,
        validation: ValidationMode,
    ) -> Result<Self> {
        manifest.validate()?;
        let root = root.into();
        let mut entries = Vec::with_capacity(manifest.entries.len());
        let mut index = HashMap::with_capacity(manifest.entries.len());

        for record in manifest.entries {
            let asset = root.join(&record.path);
            if validation == ValidationMode::Strict && !asset.is_file() {
                return Err(Error::MissingAsset(asset));
            }
            let entry = EmojiEntry::new(record.key, asset)?
                .with_category(record.category)
                .with_window(record.valid_from, record.valid_until);
            index.insert(entry.key().to_string(), entries.len());
            entries.push(entry);
        }

        Ok(Self {
            root,
            version: manifest.version,
            entries,
            index,
            validation,
        })
    }

    /// Build a bundle from entries directly (assets are not checked).
    pub fn from_entries(version: u32, entries: Vec<EmojiEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_string(), i).is_some() {
                return Err(Error::InvalidManifest(format!(
                    "duplicate key {:?}",
                    entry.key()
                )));
            }
        }
        Ok(Self {
            root: PathBuf::new(),
            version,
            entries,
            index,
            validation: ValidationMode::Relaxed,
        })
    }

    /// Resolve a key, logging misses.
    pub fn lookup(&self, key: &str) -> Result<&EmojiEntry> {
        let Some(entry) = self.get(key) else {
            tracing::debug!(key, "no emoji found for key");
            return Err(Error::KeyNotFound(key.to_string()));
        };
        if self.validation == ValidationMode::Relaxed
            && !self.root.as_os_str().is_empty()
            && !entry.asset_exists()
        {
            tracing::warn!(key, asset = %entry.asset().display(), "emoji asset does not exist");
        }
        Ok(entry)
    }

    /// Resolve a key without logging.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EmojiEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries inside their validity window at `as_of`, in manifest order.
    pub fn all_entries(&self, as_of: DateTime<Utc>) -> impl Iterator<Item = &EmojiEntry> {
        self.entries.iter().filter(move |e| !e.has_expired(as_of))
    }

    /// Entries that may be picked at `as_of`, in manifest order.
    pub fn selectable_entries(&self, as_of: DateTime<Utc>) -> impl Iterator<Item = &EmojiEntry> {
        self.entries
            .iter()
            .filter(move |e| !e.should_disable_entry(as_of))
    }

    /// Every entry, in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[EmojiEntry] {
        &self.entries
    }

    /// Every key, in manifest order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(EmojiEntry::key)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Bundle root directory (empty for the sentinel).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True for [`EmojiBundle::invalid`].
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.version == 0 && self.entries.is_empty()
    }
}

/// Location of the bundle shipped with the crate.
#[must_use]
pub fn default_bundle_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_BUNDLE_DIR_NAME)
}

fn shared_slot() -> &'static RwLock<Arc<EmojiBundle>> {
    static SLOT: OnceLock<RwLock<Arc<EmojiBundle>>> = OnceLock::new();
    SLOT.get_or_init(|| {
        let bundle = EmojiBundle::load_default(&EmojiKitConfig::from_env());
        RwLock::new(Arc::new(bundle))
    })
}

/// Process-wide bundle, loaded on first use.
#[must_use]
pub fn shared_bundle() -> Arc<EmojiBundle> {
    match shared_slot().read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Swap the process-wide bundle, returning the previous one.
pub fn replace_shared_bundle(bundle: EmojiBundle) -> Arc<EmojiBundle> {
    let bundle = Arc::new(bundle);
    match shared_slot().write() {
        Ok(mut guard) => std::mem::replace(&mut *guard, bundle),
        Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), bundle),
    }
}

/// Serializes tests that swap the process-wide bundle.
#[cfg(test)]
pub(crate) fn shared_bundle_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
