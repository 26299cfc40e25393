//! Catalog entries: one immutable description per emoji.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Opening delimiter of the plain-text wire form.
pub const KEY_OPEN: char = '[';
/// Closing delimiter of the plain-text wire form.
pub const KEY_CLOSE: char = ']';

/// Availability type of an emoji, stored as an integer in manifests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    /// Always available.
    #[default]
    Default = 0,
    /// Recently added; the badge disappears once the window ends.
    New = 1,
    /// Tied to an event window.
    Activity = 2,
    /// Limited-time emoji.
    Limited = 3,
}

impl EmojiCategory {
    /// All categories in manifest order.
    pub const ALL: [Self; 4] = [Self::Default, Self::New, Self::Activity, Self::Limited];

    /// Decode a manifest integer. Unknown values fall back to [`Self::Default`]
    /// so newer manifests stay readable.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            1 => Self::New,
            2 => Self::Activity,
            3 => Self::Limited,
            _ => Self::Default,
        }
    }

    /// The manifest integer for this category.
    #[must_use]
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::New => "new",
            Self::Activity => "activity",
            Self::Limited => "limited",
        }
    }

    /// Whether a time window can make an entry of this category unselectable.
    #[must_use]
    pub fn is_time_limited(self) -> bool {
        matches!(self, Self::Activity | Self::Limited)
    }
}

impl fmt::Display for EmojiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EmojiCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.raw())
    }
}

/// Corner tag drawn over an emoji in the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Badge {
    New,
    Activity,
    Limited,
}

impl Badge {
    /// Label text for the tag.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Activity => "Activity",
            Self::Limited => "Limited",
        }
    }
}

/// Check that a key can round-trip through the `[key]` wire form.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains([KEY_OPEN, KEY_CLOSE])
}

/// One emoji of a bundle.
///
/// Equality and hashing only look at the key: two entries with the same key
/// are the same logical emoji even when other fields differ.
#[derive(Clone, Debug)]
pub struct EmojiEntry {
    key: String,
    asset: PathBuf,
    category: EmojiCategory,
    valid_from: Option<DateTime<Utc>>,
    valid_until: Option<DateTime<Utc>>,
}

impl EmojiEntry {
    /// Create a `Default` entry with no validity window.
    pub fn new(key: impl Into<String>, asset: impl Into<PathBuf>) -> Result<Self> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(Error::InvalidKey(key));
        }
        Ok(Self {
            key,
            asset: asset.into(),
            category: EmojiCategory::Default,
            valid_from: None,
            valid_until: None,
        })
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: EmojiCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the validity window. Either bound may be open.
    #[must_use]
    pub fn with_window(
        mut self,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absolute location of the image asset.
    #[must_use]
    pub fn asset(&self) -> &Path {
        &self.asset
    }

    #[must_use]
    pub fn category(&self) -> EmojiCategory {
        self.category
    }

    #[must_use]
    pub fn valid_from(&self) -> Option<DateTime<Utc>> {
        self.valid_from
    }

    #[must_use]
    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }

    /// The plain-text wire form, `[key]`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{KEY_OPEN}{}{KEY_CLOSE}", self.key)
    }

    /// Outside the validity window at `now`.
    #[must_use]
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        if self.valid_from.is_some_and(|from| now < from) {
            return true;
        }
        self.valid_until.is_some_and(|until| now > until)
    }

    /// Hidden from selection at `now`. Only time-limited categories are ever
    /// hidden; `Default` and `New` stay selectable.
    #[must_use]
    pub fn should_disable_entry(&self, now: DateTime<Utc>) -> bool {
        self.category.is_time_limited() && self.has_expired(now)
    }

    /// Category used for display; an expired `New` shows as `Default`.
    #[must_use]
    pub fn display_category(&self, now: DateTime<Utc>) -> EmojiCategory {
        if self.category == EmojiCategory::New && self.has_expired(now) {
            EmojiCategory::Default
        } else {
            self.category
        }
    }

    /// Badge to draw at `now`, if any.
    #[must_use]
    pub fn badge(&self, now: DateTime<Utc>) -> Option<Badge> {
        match self.display_category(now) {
            EmojiCategory::Default => None,
            EmojiCategory::New => Some(Badge::New),
            EmojiCategory::Activity => Some(Badge::Activity),
            EmojiCategory::Limited => Some(Badge::Limited),
        }
    }

    /// Whether the asset file is present on disk.
    #[must_use]
    pub fn asset_exists(&self) -> bool {
        self.asset.is_file()
    }
}

impl PartialEq for EmojiEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EmojiEntry {}

impl Hash for EmojiEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for EmojiEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KEY_OPEN}{}{KEY_CLOSE}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_category_from_raw_falls_back() {
        assert_eq!(EmojiCategory::from_raw(0), EmojiCategory::Default);
        assert_eq!(EmojiCategory::from_raw(1), EmojiCategory::New);
        assert_eq!(EmojiCategory::from_raw(3), EmojiCategory::Limited);
        assert_eq!(EmojiCategory::from_raw(42), EmojiCategory::Default);
        assert_eq!(EmojiCategory::from_raw(-1), EmojiCategory::Default);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(EmojiEntry::new("", "a.png").is_err());
        assert!(EmojiEntry::new("a[b", "a.png").is_err());
        assert!(EmojiEntry::new("ab]", "a.png").is_err());
        assert!(EmojiEntry::new("smile", "a.png").is_ok());
    }

    #[test]
    fn test_equality_by_key_only() {
        let a = EmojiEntry::new("smile", "one.png").unwrap();
        let b = EmojiEntry::new("smile", "two.png")
            .unwrap()
            .with_category(EmojiCategory::Limited);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_description() {
        let e = EmojiEntry::new("大笑", "laugh.png").unwrap();
        assert_eq!(e.description(), "[大笑]");
        assert_eq!(e.to_string(), "[大笑]");
    }

    #[test]
    fn test_expiry_window() {
        let e = EmojiEntry::new("x", "x.png")
            .unwrap()
            .with_window(Some(at(100)), Some(at(200)));
        assert!(e.has_expired(at(99)));
        assert!(!e.has_expired(at(100)));
        assert!(!e.has_expired(at(200)));
        assert!(e.has_expired(at(201)));

        let open = EmojiEntry::new("y", "y.png").unwrap();
        assert!(!open.has_expired(Utc::now()));
    }

    #[test]
    fn test_selectability_only_for_time_limited() {
        let now = Utc::now();
        let past = Some(now - Duration::days(1));
        for category in EmojiCategory::ALL {
            let e = EmojiEntry::new("k", "k.png")
                .unwrap()
                .with_category(category)
                .with_window(None, past);
            assert_eq!(e.should_disable_entry(now), category.is_time_limited());
        }
    }

    #[test]
    fn test_expired_new_loses_badge() {
        let now = Utc::now();
        let fresh = EmojiEntry::new("n", "n.png")
            .unwrap()
            .with_category(EmojiCategory::New)
            .with_window(None, Some(now + Duration::days(1)));
        assert_eq!(fresh.badge(now), Some(Badge::New));

        let stale = fresh.clone().with_window(None, Some(now - Duration::days(1)));
        assert_eq!(stale.display_category(now), EmojiCategory::Default);
        assert_eq!(stale.badge(now), None);
    }
}
