//! Which emoji are offered to the user: recent ones and suggestions.

use crate::config::EmojiKitConfig;
use crate::emoji::{EmojiBundle, EmojiEntry};
use crate::state::recent::{RecentStore, RecentUsage};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Recent usage plus suggestion logic over one bundle.
///
/// Every query takes the current time explicitly so availability windows are
/// evaluated consistently within one event.
#[derive(Debug)]
pub struct EmojiSelectionState {
    bundle: Arc<EmojiBundle>,
    recent: RecentUsage,
    store: Box<dyn RecentStore>,
    suggestion_limit: usize,
}

impl EmojiSelectionState {
    /// Load recent keys from `store`. A failing store starts empty.
    #[must_use]
    pub fn new(
        bundle: Arc<EmojiBundle>,
        store: Box<dyn RecentStore>,
        config: &EmojiKitConfig,
    ) -> Self {
        let keys = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load recent emoji");
            Vec::new()
        });
        Self {
            bundle,
            recent: RecentUsage::from_keys(keys, config.recent_capacity),
            store,
            suggestion_limit: config.suggestion_limit,
        }
    }

    #[must_use]
    pub fn bundle(&self) -> &Arc<EmojiBundle> {
        &self.bundle
    }

    /// Swap the bundle; stored recent keys are kept and re-resolved.
    pub fn set_bundle(&mut self, bundle: Arc<EmojiBundle>) {
        self.bundle = bundle;
    }

    /// Stored recent keys, resolvable or not.
    #[must_use]
    pub fn recent_keys(&self) -> &[String] {
        self.recent.keys()
    }

    /// Recent entries that resolve and are selectable at `now`.
    #[must_use]
    pub fn recent_used(&self, now: DateTime<Utc>) -> Vec<&EmojiEntry> {
        self.recent
            .keys()
            .iter()
            .filter_map(|key| {
                let entry = self.bundle.get(key);
                if entry.is_none() {
                    tracing::debug!(key = %key, "recent emoji no longer in bundle");
                }
                entry
            })
            .filter(|entry| !entry.should_disable_entry(now))
            .collect()
    }

    /// Every selectable entry at `now`, in bundle order.
    #[must_use]
    pub fn all_available(&self, now: DateTime<Utc>) -> Vec<&EmojiEntry> {
        self.bundle.selectable_entries(now).collect()
    }

    /// Recent entries first, then the rest of the bundle, up to the configured limit.
    #[must_use]
    pub fn suggested(&self, now: DateTime<Utc>) -> Vec<&EmojiEntry> {
        self.suggested_with_limit(now, self.suggestion_limit)
    }

    /// Like [`suggested`](Self::suggested) with an explicit limit.
    #[must_use]
    pub fn suggested_with_limit(&self, now: DateTime<Utc>, limit: usize) -> Vec<&EmojiEntry> {
        let mut result = self.recent_used(now);
        result.truncate(limit);
        for entry in self.bundle.selectable_entries(now) {
            if result.len() >= limit {
                break;
            }
            if !result.contains(&entry) {
                result.push(entry);
            }
        }
        result
    }

    /// Record a pick. Unknown keys are kept too; a later bundle may know them.
    /// Persistence failures are logged, never returned.
    pub fn record_usage(&mut self, key: &str) {
        self.recent.record(key);
        if let Err(err) = self.store.save(self.recent.keys()) {
            tracing::warn!(key, error = %err, "failed to persist recent emoji");
        }
    }

    /// Resolve a key against the current bundle.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&EmojiEntry> {
        self.bundle.lookup(key).ok()
    }

    #[must_use]
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::EmojiCategory;
    use crate::state::recent::MemoryRecentStore;
    use chrono::Duration;

    fn bundle(keys: &[&str]) -> Arc<EmojiBundle> {
        let entries = keys
            .iter()
            .map(|k| EmojiEntry::new(*k, format!("{k}.png")).unwrap())
            .collect();
        Arc::new(EmojiBundle::from_entries(1, entries).unwrap())
    }

    fn keys(entries: &[&EmojiEntry]) -> Vec<String> {
        entries.iter().map(|e| e.key().to_string()).collect()
    }

    fn state(bundle: Arc<EmojiBundle>, recent: &[&str]) -> EmojiSelectionState {
        let store = MemoryRecentStore::with_keys(recent.iter().copied());
        EmojiSelectionState::new(bundle, Box::new(store), &EmojiKitConfig::default())
    }

    #[test]
    fn test_recent_ordering() {
        let mut state = state(bundle(&["a", "b"]), &[]);
        state.record_usage("a");
        state.record_usage("b");
        state.record_usage("a");
        assert_eq!(state.recent_keys(), ["a", "b"]);
    }

    #[test]
    fn test_unknown_key_recorded_but_not_resolved() {
        let mut state = state(bundle(&["a"]), &[]);
        state.record_usage("ghost");
        state.record_usage("a");
        assert_eq!(state.recent_keys(), ["a", "ghost"]);
        assert_eq!(keys(&state.recent_used(Utc::now())), ["a"]);
    }

    #[test]
    fn test_suggested_fill() {
        let state = state(bundle(&["a", "b", "c", "d", "e", "f", "g", "h"]), &["a"]);
        let suggested = state.suggested(Utc::now());
        assert_eq!(keys(&suggested), ["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_suggested_recent_first_without_duplicates() {
        let state = state(bundle(&["a", "b", "c", "d"]), &["c", "a"]);
        let suggested = state.suggested_with_limit(Utc::now(), 3);
        assert_eq!(keys(&suggested), ["c", "a", "b"]);
    }

    #[test]
    fn test_suggested_exhausts_source() {
        let state = state(bundle(&["a", "b"]), &[]);
        assert_eq!(keys(&state.suggested(Utc::now())), ["a", "b"]);
    }

    #[test]
    fn test_expired_limited_hidden_from_recent_and_all() {
        let now = Utc::now();
        let past = Some(now - Duration::days(2));
        let entries = vec![
            EmojiEntry::new("a", "a.png").unwrap(),
            EmojiEntry::new("lim", "l.png")
                .unwrap()
                .with_category(EmojiCategory::Limited)
                .with_window(None, past),
            EmojiEntry::new("new", "n.png")
                .unwrap()
                .with_category(EmojiCategory::New)
                .with_window(None, past),
        ];
        let bundle = Arc::new(EmojiBundle::from_entries(1, entries).unwrap());
        let state = state(bundle, &["lim", "new", "a"]);

        assert_eq!(keys(&state.recent_used(now)), ["new", "a"]);
        let all = state.all_available(now);
        assert_eq!(keys(&all), ["a", "new"]);
        assert_eq!(all[1].badge(now), None);
    }

    #[test]
    fn test_capacity_from_config() {
        let config = EmojiKitConfig {
            recent_capacity: 2,
            ..EmojiKitConfig::default()
        };
        let mut state = EmojiSelectionState::new(
            bundle(&["a"]),
            Box::new(MemoryRecentStore::new()),
            &config,
        );
        for key in ["a", "b", "c"] {
            state.record_usage(key);
        }
        assert_eq!(state.recent_keys(), ["c", "b"]);
    }
}
