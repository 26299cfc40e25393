//! On-disk bundle directories for loader tests.

use chrono::{DateTime, Utc};
use emojikit::emoji::{EmojiCategory, MANIFEST_FILE_NAME, Manifest, ManifestEntry};
use emojikit::{EmojiBundle, ValidationMode};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for a bundle directory.
#[derive(Debug, Default)]
pub struct BundleBuilder {
    version: u32,
    entries: Vec<ManifestEntry>,
    skip_assets: HashSet<String>,
    legacy_names: bool,
    subdir: Option<String>,
}

impl BundleBuilder {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Add a `Default` emoji with asset `<key>.png`.
    pub fn emoji(mut self, key: &str) -> Self {
        self.entries.push(ManifestEntry::new(key, format!("{key}.png")));
        self
    }

    /// Add an emoji with a category and window.
    pub fn timed(
        mut self,
        key: &str,
        category: EmojiCategory,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        let mut entry = ManifestEntry::new(key, format!("{key}.png"));
        entry.category = category;
        entry.valid_from = valid_from;
        entry.valid_until = valid_until;
        self.entries.push(entry);
        self
    }

    /// List `key` in the manifest without writing its asset.
    pub fn without_asset(mut self, key: &str) -> Self {
        self.skip_assets.insert(key.to_string());
        self
    }

    /// Write `emojis`/`type`/`startTime`/`endTime` instead of the current names.
    pub fn legacy_names(mut self) -> Self {
        self.legacy_names = true;
        self
    }

    /// Put the bundle in a named subdirectory of the temp dir.
    pub fn in_subdir(mut self, name: &str) -> Self {
        self.subdir = Some(name.to_string());
        self
    }

    pub fn build(self) -> TempBundle {
        let dir = TempDir::new().expect("create temp dir");
        let root = match &self.subdir {
            Some(name) => dir.path().join(name),
            None => dir.path().to_path_buf(),
        };
        fs::create_dir_all(&root).expect("create bundle root");

        for entry in &self.entries {
            if !self.skip_assets.contains(&entry.key) {
                fs::write(root.join(&entry.path), b"\x89PNG").expect("write asset");
            }
        }

        let manifest = Manifest {
            version: self.version,
            entries: self.entries,
        };
        let mut json = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
        if self.legacy_names {
            json = json
                .replace("\"entries\"", "\"emojis\"")
                .replace("\"category\"", "\"type\"")
                .replace("\"validFrom\"", "\"startTime\"")
                .replace("\"validUntil\"", "\"endTime\"");
        }
        fs::write(root.join(MANIFEST_FILE_NAME), json).expect("write manifest");

        TempBundle { dir, root }
    }
}

/// A bundle directory that is removed on drop.
#[derive(Debug)]
pub struct TempBundle {
    dir: TempDir,
    root: PathBuf,
}

impl TempBundle {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temp dir holding the bundle root.
    pub fn parent(&self) -> &Path {
        self.dir.path()
    }

    pub fn load(&self, mode: ValidationMode) -> emojikit::Result<EmojiBundle> {
        EmojiBundle::load(&self.root, mode)
    }

    pub fn write_manifest(&self, json: &str) {
        fs::write(self.root.join(MANIFEST_FILE_NAME), json).expect("write manifest");
    }
}
