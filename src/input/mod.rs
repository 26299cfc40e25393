//! Input handling around the host's text widget.
//!
//! The core never owns the widget. It reads [`SurfaceSnapshot`]s through the
//! [`InputSurface`] contract and pushes results back; keyboard mode, the
//! emoji panel and pasteboard traffic are driven by [`EmojiTextInput`].

mod clipboard;
mod controller;
mod keyboard;
mod panel;
mod surface;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use controller::EmojiTextInput;
pub use keyboard::{KeyboardEvent, KeyboardMode, KeyboardState, SurfaceVisibility, Transition};
pub use panel::{ContentId, EmojiDisplay, PanelContent, PanelHost};
pub use surface::{InputSurface, MemorySurface, SurfaceSnapshot};
