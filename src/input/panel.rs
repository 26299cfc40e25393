//! Emoji panel content and its deferred teardown.
//!
//! Hiding the panel does not drop its content right away; the hide
//! transition still shows it. Removal happens on a later [`PanelHost::tick`]
//! once the cleanup delay has passed. What gets removed is captured when
//! `hide` is called, so showing the panel again before the delay keeps the
//! freshly mounted content.

use crate::emoji::{Badge, EmojiEntry};
use crate::state::EmojiSelectionState;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// One cell of the panel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmojiDisplay {
    pub entry: EmojiEntry,
    pub badge: Option<Badge>,
}

/// Identifier of mounted panel content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(u64);

/// What the panel shows while visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelContent {
    id: ContentId,
    recent: Vec<EmojiDisplay>,
    all: Vec<EmojiDisplay>,
}

impl PanelContent {
    /// Build from the selection state. Recent cells never carry badges.
    #[must_use]
    pub fn build(id: ContentId, state: &EmojiSelectionState, now: DateTime<Utc>) -> Self {
        let recent = state
            .recent_used(now)
            .into_iter()
            .map(|entry| EmojiDisplay {
                entry: entry.clone(),
                badge: None,
            })
            .collect();
        let all = state
            .all_available(now)
            .into_iter()
            .map(|entry| EmojiDisplay {
                entry: entry.clone(),
                badge: entry.badge(now),
            })
            .collect();
        Self { id, recent, all }
    }

    #[must_use]
    pub fn id(&self) -> ContentId {
        self.id
    }

    #[must_use]
    pub fn recent(&self) -> &[EmojiDisplay] {
        &self.recent
    }

    #[must_use]
    pub fn all(&self) -> &[EmojiDisplay] {
        &self.all
    }
}

#[derive(Clone, Debug)]
struct PendingCleanup {
    ids: Vec<ContentId>,
    due: Instant,
}

/// Owns the panel's mounted content and its cleanup schedule.
#[derive(Clone, Debug)]
pub struct PanelHost {
    delay: Duration,
    next_id: u64,
    visible: bool,
    mounted: Vec<PanelContent>,
    pending: Vec<PendingCleanup>,
}

impl PanelHost {
    #[must_use]
    pub fn new(cleanup_delay: Duration) -> Self {
        Self {
            delay: cleanup_delay,
            next_id: 0,
            visible: false,
            mounted: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Mount fresh content and mark the panel visible.
    pub fn show(&mut self, state: &EmojiSelectionState, now: DateTime<Utc>) -> ContentId {
        let id = ContentId(self.next_id);
        self.next_id += 1;
        if self.visible {
            // Re-render in place: the old content is not animating out.
            self.mounted.clear();
        }
        self.mounted.push(PanelContent::build(id, state, now));
        self.visible = true;
        id
    }

    /// Start hiding; content mounted right now is removed after the delay.
    pub fn hide(&mut self, at: Instant) {
        if !self.visible {
            return;
        }
        self.visible = false;
        let ids: Vec<ContentId> = self.mounted.iter().map(PanelContent::id).collect();
        if !ids.is_empty() {
            self.pending.push(PendingCleanup {
                ids,
                due: at + self.delay,
            });
        }
    }

    /// Run cleanups that are due. Returns how many contents were removed.
    pub fn tick(&mut self, at: Instant) -> usize {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|cleanup| cleanup.due <= at);
        self.pending = waiting;

        let before = self.mounted.len();
        for cleanup in due {
            self.mounted.retain(|content| !cleanup.ids.contains(&content.id));
        }
        let removed = before - self.mounted.len();
        if removed > 0 {
            tracing::trace!(removed, "panel content cleaned up");
        }
        removed
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Content on screen, when visible.
    #[must_use]
    pub fn current(&self) -> Option<&PanelContent> {
        if self.visible {
            self.mounted.last()
        } else {
            None
        }
    }

    /// Everything still mounted, including content animating out.
    #[must_use]
    pub fn mounted(&self) -> &[PanelContent] {
        &self.mounted
    }

    #[must_use]
    pub fn has_pending_cleanup(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmojiKitConfig;
    use crate::emoji::{EmojiBundle, EmojiCategory};
    use crate::state::MemoryRecentStore;
    use std::sync::Arc;

    fn state() -> EmojiSelectionState {
        let entries = vec![
            EmojiEntry::new("a", "a.png").unwrap(),
            EmojiEntry::new("b", "b.png")
                .unwrap()
                .with_category(EmojiCategory::New),
        ];
        let bundle = Arc::new(EmojiBundle::from_entries(1, entries).unwrap());
        EmojiSelectionState::new(
            bundle,
            Box::new(MemoryRecentStore::with_keys(["b"])),
            &EmojiKitConfig::default(),
        )
    }

    #[test]
    fn test_content_badges() {
        let mut host = PanelHost::new(Duration::from_millis(300));
        host.show(&state(), Utc::now());
        let content = host.current().unwrap();
        assert_eq!(content.recent().len(), 1);
        assert_eq!(content.recent()[0].badge, None);
        assert_eq!(content.all()[1].badge, Some(Badge::New));
    }

    #[test]
    fn test_hide_then_cleanup() {
        let start = Instant::now();
        let mut host = PanelHost::new(Duration::from_millis(300));
        host.show(&state(), Utc::now());
        host.hide(start);

        assert!(host.current().is_none());
        assert_eq!(host.mounted().len(), 1);
        assert_eq!(host.tick(start + Duration::from_millis(100)), 0);
        assert_eq!(host.tick(start + Duration::from_millis(300)), 1);
        assert!(host.mounted().is_empty());
        assert!(!host.has_pending_cleanup());
    }

    #[test]
    fn test_reshow_before_delay_keeps_new_content() {
        let start = Instant::now();
        let mut host = PanelHost::new(Duration::from_millis(300));
        let state = state();
        let first = host.show(&state, Utc::now());
        host.hide(start);
        let second = host.show(&state, Utc::now());

        host.tick(start + Duration::from_secs(1));
        assert_eq!(host.current().map(PanelContent::id), Some(second));
        assert!(host.mounted().iter().all(|c| c.id() != first));
    }

    #[test]
    fn test_hide_when_hidden_is_noop() {
        let mut host = PanelHost::new(Duration::ZERO);
        host.hide(Instant::now());
        assert!(!host.has_pending_cleanup());
    }
}
