//! Pasteboard access. Only plain text ever crosses this boundary.

use crate::error::Result;
use std::fmt;

/// System pasteboard, as provided by the host.
pub trait Clipboard: fmt::Debug {
    fn set_text(&mut self, text: String) -> Result<()>;
    fn get_text(&mut self) -> Result<String>;
}

/// In-process clipboard for tests and headless hosts.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    pub content: String,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        self.content = text;
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        Ok(self.content.clone())
    }
}
