//! Bundle manifest (`config.json`) format.
//!
//! ```json
//! {
//!   "version": 3,
//!   "entries": [
//!     { "key": "smile", "path": "smile.png" },
//!     { "key": "party", "path": "party.png", "category": 3,
//!       "validFrom": 1714521600, "validUntil": 1717200000 }
//!   ]
//! }
//! ```
//!
//! Older manifests used `emojis`, `type`, `startTime` and `endTime`; those
//! names are accepted as aliases.

use crate::emoji::entry::{EmojiCategory, is_valid_key};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// File name of the manifest at the bundle root.
pub const MANIFEST_FILE_NAME: &str = "config.json";

/// Parsed manifest document.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Manifest {
    pub version: u32,
    #[serde(alias = "emojis")]
    pub entries: Vec<ManifestEntry>,
}

/// One manifest record, before asset paths are resolved.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub key: String,
    /// Asset path relative to the bundle root.
    pub path: String,
    #[serde(default, alias = "type", deserialize_with = "lenient_category")]
    pub category: EmojiCategory,
    #[serde(
        default,
        alias = "startTime",
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "endTime",
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_until: Option<DateTime<Utc>>,
}

impl ManifestEntry {
    /// A `Default` record with no window.
    #[must_use]
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            category: EmojiCategory::Default,
            valid_from: None,
            valid_until: None,
        }
    }
}

// Missing, null and unknown integers all decode as `Default`.
fn lenient_category<'de, D>(deserializer: D) -> std::result::Result<EmojiCategory, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.map_or(EmojiCategory::Default, EmojiCategory::from_raw))
}

impl Manifest {
    /// Parse and validate a manifest document.
    pub fn parse(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read `config.json` from a bundle root.
    pub fn read(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE_NAME);
        if !path.is_file() {
            return Err(Error::InvalidManifest(format!(
                "{} not found",
                path.display()
            )));
        }
        let json = std::fs::read_to_string(&path)?;
        Self::parse(&json)
    }

    /// Keys must be valid and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !is_valid_key(&entry.key) {
                return Err(Error::InvalidManifest(format!(
                    "invalid key {:?}",
                    entry.key
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(Error::InvalidManifest(format!(
                    "duplicate key {:?}",
                    entry.key
                )));
            }
        }
        Ok(())
    }
}
