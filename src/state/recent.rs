//! Recently used emoji keys and their persistence.

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Storage key of the recent-usage list.
pub const RECENT_STORAGE_KEY: &str = "emojis.recent_used";

/// Ordered-list persistence for recent keys.
pub trait RecentStore: fmt::Debug {
    /// Load the stored keys, most recent first.
    fn load(&self) -> Result<Vec<String>>;
    /// Replace the stored keys.
    fn save(&mut self, keys: &[String]) -> Result<()>;
}

/// In-memory store, for tests and hosts that persist elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecentStore {
    pub keys: Vec<String>,
}

impl MemoryRecentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with stored keys.
    #[must_use]
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecentStore for MemoryRecentStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.keys.clone())
    }

    fn save(&mut self, keys: &[String]) -> Result<()> {
        self.keys = keys.to_vec();
        Ok(())
    }
}

/// Store keeping the list as a JSON array of strings in one file.
///
/// A missing or unreadable document loads as an empty list.
#[derive(Clone, Debug)]
pub struct JsonFileRecentStore {
    path: PathBuf,
}

impl JsonFileRecentStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/emojis.recent_used.json`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{RECENT_STORAGE_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentStore for JsonFileRecentStore {
    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&json) {
            Ok(keys) => Ok(keys),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding corrupt recent-usage file"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, keys: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(keys)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Bounded most-recent-first key list without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentUsage {
    keys: Vec<String>,
    capacity: usize,
}

impl RecentUsage {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from stored keys, dropping repeats and overflow.
    #[must_use]
    pub fn from_keys(keys: Vec<String>, capacity: usize) -> Self {
        let mut usage = Self::new(capacity);
        for key in keys {
            if usage.keys.len() == capacity {
                break;
            }
            if !usage.keys.contains(&key) {
                usage.keys.push(key);
            }
        }
        usage
    }

    /// Move `key` to the front, inserting it if new, then truncate.
    pub fn record(&mut self, key: &str) {
        self.keys.retain(|k| k != key);
        self.keys.insert(0, key.to_string());
        self.keys.truncate(self.capacity);
    }

    /// Keys, most recent first.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_moves_to_front() {
        let mut usage = RecentUsage::new(7);
        usage.record("a");
        usage.record("b");
        usage.record("a");
        assert_eq!(usage.keys(), ["a", "b"]);
    }

    #[test]
    fn test_record_truncates_to_capacity() {
        let mut usage = RecentUsage::new(3);
        for key in ["a", "b", "c", "d"] {
            usage.record(key);
        }
        assert_eq!(usage.keys(), ["d", "c", "b"]);
    }

    #[test]
    fn test_from_keys_dedupes() {
        let keys = ["a", "b", "a", "c", "d"].map(String::from).to_vec();
        let usage = RecentUsage::from_keys(keys, 3);
        assert_eq!(usage.keys(), ["a", "b", "c"]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut usage = RecentUsage::new(0);
        usage.record("a");
        assert!(usage.is_empty());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecentStore::with_keys(["x"]);
        assert_eq!(store.load().unwrap(), ["x"]);
        store.save(&["y".to_string()]).unwrap();
        assert_eq!(store.keys, ["y"]);
    }
}
