//! Keyboard mode state machine.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Surfaces shown for a keyboard mode.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SurfaceVisibility: u8 {
        /// Inline suggestion strip above the system keyboard.
        const SUGGESTION_STRIP = 0b0000_0001;
        /// Emoji panel in place of the system keyboard.
        const EMOJI_PANEL = 0b0000_0010;
        /// Text surface holds input focus.
        const FIRST_RESPONDER = 0b0000_0100;
    }
}

/// Which input surface is active. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardMode {
    /// No keyboard, no panel.
    #[default]
    Closed,
    /// System keyboard with the suggestion strip.
    SystemKeyboardActive,
    /// Emoji panel.
    EmojiPanelActive,
}

impl KeyboardMode {
    /// Surfaces implied by this mode.
    #[must_use]
    pub fn visibility(self) -> SurfaceVisibility {
        match self {
            Self::Closed => SurfaceVisibility::empty(),
            Self::SystemKeyboardActive => {
                SurfaceVisibility::SUGGESTION_STRIP | SurfaceVisibility::FIRST_RESPONDER
            }
            Self::EmojiPanelActive => {
                SurfaceVisibility::EMOJI_PANEL | SurfaceVisibility::FIRST_RESPONDER
            }
        }
    }

    /// Mode after `event`, or `None` if the event does not apply here.
    #[must_use]
    pub fn next(self, event: KeyboardEvent) -> Option<Self> {
        use KeyboardEvent as E;
        use KeyboardMode as M;

        match (self, event) {
            (M::Closed | M::EmojiPanelActive, E::FocusGained | E::EditEmoji) => {
                Some(M::SystemKeyboardActive)
            }
            (M::Closed | M::SystemKeyboardActive, E::TogglePanel) => Some(M::EmojiPanelActive),
            (M::EmojiPanelActive, E::TogglePanel) => Some(M::SystemKeyboardActive),
            (M::SystemKeyboardActive | M::EmojiPanelActive, E::FocusLost | E::Dismiss) => {
                Some(M::Closed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::SystemKeyboardActive => "keyboard",
            Self::EmojiPanelActive => "panel",
        };
        f.write_str(name)
    }
}

/// Inputs of the keyboard state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEvent {
    /// The text surface became first responder.
    FocusGained,
    /// The text surface resigned first responder.
    FocusLost,
    /// The emoji button was pressed.
    TogglePanel,
    /// An existing emoji in the text was tapped.
    EditEmoji,
    /// The host closed the input explicitly.
    Dismiss,
}

/// A mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: KeyboardMode,
    pub to: KeyboardMode,
    pub event: KeyboardEvent,
}

impl Transition {
    /// Surfaces to show because of this change.
    #[must_use]
    pub fn shown(&self) -> SurfaceVisibility {
        self.to.visibility() - self.from.visibility()
    }

    /// Surfaces to hide because of this change.
    #[must_use]
    pub fn hidden(&self) -> SurfaceVisibility {
        self.from.visibility() - self.to.visibility()
    }
}

/// Current keyboard mode plus transition logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    mode: KeyboardMode,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    #[must_use]
    pub fn visibility(&self) -> SurfaceVisibility {
        self.mode.visibility()
    }

    /// Feed an event. Returns the transition taken, if any.
    pub fn handle(&mut self, event: KeyboardEvent) -> Option<Transition> {
        let Some(to) = self.mode.next(event) else {
            tracing::trace!(mode = %self.mode, ?event, "keyboard event ignored");
            return None;
        };
        let transition = Transition {
            from: self.mode,
            to,
            event,
        };
        tracing::debug!(from = %transition.from, to = %to, ?event, "keyboard transition");
        self.mode = to;
        Some(transition)
    }
}
