//! Runtime configuration.

use crate::emoji::ValidationMode;
use crate::text::GlyphMetrics;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the bundle directory.
pub const ENV_BUNDLE_DIR: &str = "EMOJIKIT_BUNDLE_DIR";
/// Environment variable forcing strict (`1`/`true`) or relaxed (`0`/`false`) asset checks.
pub const ENV_STRICT_ASSETS: &str = "EMOJIKIT_STRICT_ASSETS";

/// Default number of recent keys kept.
pub const DEFAULT_RECENT_CAPACITY: usize = 7;
/// Default number of suggestions shown in the strip.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 7;

/// Configuration for an emoji text input.
#[derive(Clone, Debug, PartialEq)]
pub struct EmojiKitConfig {
    /// Bundle directory; `None` uses the shipped bundle.
    pub bundle_dir: Option<PathBuf>,
    /// Asset validation at load time.
    pub validation: ValidationMode,
    /// Recent-usage list capacity.
    pub recent_capacity: usize,
    /// Suggestion strip size.
    pub suggestion_limit: usize,
    /// Font metrics used to size inline emoji.
    pub glyph_metrics: GlyphMetrics,
    /// Emoji panel height in points.
    pub panel_height: f64,
    /// Suggestion strip height in points.
    pub accessory_height: f64,
    /// Delay before hidden panel content is torn down.
    pub panel_cleanup_delay: Duration,
}

impl Default for EmojiKitConfig {
    fn default() -> Self {
        Self {
            bundle_dir: None,
            validation: ValidationMode::default(),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            glyph_metrics: GlyphMetrics::default(),
            panel_height: 384.0,
            accessory_height: 48.0,
            panel_cleanup_delay: Duration::from_millis(300),
        }
    }
}

impl EmojiKitConfig {
    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides read through `var`.
    #[must_use]
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = var(ENV_BUNDLE_DIR).filter(|v| !v.is_empty()) {
            config.bundle_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = var(ENV_STRICT_ASSETS) {
            match parse_flag(&value) {
                Some(true) => config.validation = ValidationMode::Strict,
                Some(false) => config.validation = ValidationMode::Relaxed,
                None => tracing::warn!(
                    value = %value,
                    "ignoring unrecognized {ENV_STRICT_ASSETS} value"
                ),
            }
        }
        config
    }

    /// Set the bundle directory.
    #[must_use]
    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = Some(dir.into());
        self
    }

    /// Set the validation mode.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
