//! Error types for emojikit.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for emojikit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for emojikit operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a bundle or a recent-usage file.
    Io(io::Error),
    /// Manifest missing, malformed, or structurally invalid.
    InvalidManifest(String),
    /// An entry references an asset file that does not exist.
    MissingAsset(PathBuf),
    /// No entry with this key in the bundle.
    KeyNotFound(String),
    /// Key is empty or contains a bracket delimiter.
    InvalidKey(String),
    /// Archive given but no unpacked bundle directory found for it.
    ArchiveUnavailable(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidManifest(reason) => write!(f, "invalid bundle manifest: {reason}"),
            Self::MissingAsset(path) => {
                write!(f, "emoji asset does not exist: {}", path.display())
            }
            Self::KeyNotFound(key) => write!(f, "no emoji found for key: {key}"),
            Self::InvalidKey(key) => write!(f, "invalid emoji key: {key:?}"),
            Self::ArchiveUnavailable(path) => {
                write!(f, "no unpacked bundle for archive: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidManifest(e.to_string())
    }
}
