//! The emoji text input: wires the codec, selection state, keyboard machine
//! and panel around a host text surface.

use crate::config::EmojiKitConfig;
use crate::emoji::{EmojiBundle, EmojiEntry, shared_bundle};
use crate::error::Result;
use crate::event::{EmojiEvent, EventListeners, ListenerId};
use crate::input::clipboard::Clipboard;
use crate::input::keyboard::{
    KeyboardEvent, KeyboardMode, KeyboardState, SurfaceVisibility, Transition,
};
use crate::input::panel::PanelHost;
use crate::input::surface::InputSurface;
use crate::state::{EmojiSelectionState, RecentStore};
use crate::text::{self, EmojiCodec, RefreshOutcome, RichBuffer, Selection};
use chrono::Utc;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

/// Emoji-aware text input around a host surface.
///
/// The host forwards widget callbacks (`on_text_changed`,
/// `on_selection_changed`, `should_change_text`, focus changes) and receives
/// [`EmojiEvent`]s through [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct EmojiTextInput<S: InputSurface> {
    surface: S,
    codec: EmojiCodec,
    selection_state: EmojiSelectionState,
    keyboard: KeyboardState,
    panel: PanelHost,
    listeners: EventListeners,
    delete_disabled: bool,
    panel_height: f64,
    accessory_height: f64,
}

impl<S: InputSurface> EmojiTextInput<S> {
    pub fn new(
        surface: S,
        bundle: Arc<EmojiBundle>,
        store: Box<dyn RecentStore>,
        config: &EmojiKitConfig,
    ) -> Self {
        let codec = EmojiCodec::new(Arc::clone(&bundle), config.glyph_metrics);
        let selection_state = EmojiSelectionState::new(bundle, store, config);
        let delete_disabled = surface.snapshot().buffer.is_empty();
        Self {
            surface,
            codec,
            selection_state,
            keyboard: KeyboardState::new(),
            panel: PanelHost::new(config.panel_cleanup_delay),
            listeners: EventListeners::new(),
            delete_disabled,
            panel_height: config.panel_height,
            accessory_height: config.accessory_height,
        }
    }

    /// Build against the process-wide bundle.
    pub fn with_shared_bundle(
        surface: S,
        store: Box<dyn RecentStore>,
        config: &EmojiKitConfig,
    ) -> Self {
        Self::new(surface, shared_bundle(), store, config)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn codec(&self) -> &EmojiCodec {
        &self.codec
    }

    #[must_use]
    pub fn selection_state(&self) -> &EmojiSelectionState {
        &self.selection_state
    }

    #[must_use]
    pub fn panel(&self) -> &PanelHost {
        &self.panel
    }

    /// Swap the bundle for both key resolution and suggestions.
    pub fn set_bundle(&mut self, bundle: Arc<EmojiBundle>) {
        self.codec.set_bundle(Arc::clone(&bundle));
        self.selection_state.set_bundle(bundle);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&EmojiEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ---- keyboard ----

    #[must_use]
    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.keyboard.mode()
    }

    #[must_use]
    pub fn visibility(&self) -> SurfaceVisibility {
        self.keyboard.visibility()
    }

    /// Height of the input view below the text: the panel when it is up,
    /// zero otherwise (the system keyboard sizes itself).
    #[must_use]
    pub fn input_view_height(&self) -> f64 {
        if self.visibility().contains(SurfaceVisibility::EMOJI_PANEL) {
            self.panel_height
        } else {
            0.0
        }
    }

    /// Height of the suggestion strip, zero while it is hidden.
    #[must_use]
    pub fn accessory_height(&self) -> f64 {
        if self.visibility().contains(SurfaceVisibility::SUGGESTION_STRIP) {
            self.accessory_height
        } else {
            0.0
        }
    }

    pub fn focus_gained(&mut self) -> Option<Transition> {
        self.handle_keyboard(KeyboardEvent::FocusGained)
    }

    pub fn focus_lost(&mut self) -> Option<Transition> {
        self.handle_keyboard(KeyboardEvent::FocusLost)
    }

    /// The emoji button: switch between keyboard and panel.
    pub fn toggle_panel(&mut self) -> Option<Transition> {
        self.handle_keyboard(KeyboardEvent::TogglePanel)
    }

    pub fn dismiss(&mut self) -> Option<Transition> {
        self.handle_keyboard(KeyboardEvent::Dismiss)
    }

    /// Drive the panel's deferred cleanup.
    pub fn tick(&mut self, at: Instant) -> usize {
        self.panel.tick(at)
    }

    fn handle_keyboard(&mut self, event: KeyboardEvent) -> Option<Transition> {
        let transition = self.keyboard.handle(event)?;
        if transition.hidden().contains(SurfaceVisibility::EMOJI_PANEL) {
            self.panel.hide(Instant::now());
        }
        if transition.shown().contains(SurfaceVisibility::EMOJI_PANEL) {
            self.panel.show(&self.selection_state, Utc::now());
        }
        self.listeners.emit(&EmojiEvent::KeyboardTransition {
            from: transition.from,
            to: transition.to,
        });
        Some(transition)
    }

    // ---- widget callbacks ----

    /// Gate an edit before the widget applies it. The return key becomes a
    /// send request instead of a line break.
    pub fn should_change_text(&mut self, _range: Range<usize>, replacement: &str) -> bool {
        if replacement == "\n" {
            self.listeners.emit(&EmojiEvent::SendRequested);
            return false;
        }
        true
    }

    /// The widget content changed: convert typed keys, then notify.
    pub fn on_text_changed(&mut self) -> RefreshOutcome {
        let snapshot = self.surface.snapshot();
        let composing = snapshot.is_composing();
        let mut buffer = snapshot.buffer;
        let mut selection = snapshot.selection;

        let outcome = self.codec.refresh(&mut buffer, &mut selection, composing);
        if let RefreshOutcome::Converted { converted, .. } = outcome {
            tracing::debug!(converted, "converted typed emoji keys");
            self.surface.apply(buffer.clone(), selection);
        }
        self.finish_edit(&buffer);
        outcome
    }

    pub fn on_selection_changed(&mut self) {
        let selection = self.surface.snapshot().selection;
        self.listeners.emit(&EmojiEvent::SelectionChanged(selection));
    }

    /// The user tapped at `offset`. On an attachment the caret moves in
    /// front of it and the system keyboard comes back for editing.
    pub fn attachment_tapped(&mut self, offset: usize) -> bool {
        if self.surface.snapshot().buffer.attachment_at(offset).is_none() {
            return false;
        }
        let caret = Selection::caret(offset);
        self.surface.apply_selection(caret);
        self.listeners.emit(&EmojiEvent::SelectionChanged(caret));
        self.handle_keyboard(KeyboardEvent::EditEmoji);
        true
    }

    // ---- panel actions ----

    /// Insert the emoji for `key` over the selection and remember it as
    /// recently used.
    pub fn select_emoji(&mut self, key: &str) -> Result<Selection> {
        let entry = self.codec.bundle().lookup(key)?.clone();
        let selection = self.insert_entry(&entry);
        self.selection_state.record_usage(key);
        if self.panel.is_visible() {
            self.panel.show(&self.selection_state, Utc::now());
        }
        self.listeners.emit(&EmojiEvent::EmojiSelected(entry));
        Ok(selection)
    }

    fn insert_entry(&mut self, entry: &EmojiEntry) -> Selection {
        let snapshot = self.surface.snapshot();
        let mut buffer = snapshot.buffer;
        let selection = self
            .codec
            .insert_emoji(&mut buffer, snapshot.selection.range(), entry);
        self.surface.apply(buffer.clone(), selection);
        self.finish_edit(&buffer);
        selection
    }

    /// The panel's delete button.
    pub fn delete_backward(&mut self) -> bool {
        let snapshot = self.surface.snapshot();
        let mut buffer = snapshot.buffer;
        let deleted = match text::delete_backward(&mut buffer, snapshot.selection) {
            Some(selection) => {
                self.surface.apply(buffer, selection);
                self.on_text_changed();
                true
            }
            None => false,
        };
        self.listeners.emit(&EmojiEvent::DeleteRequested);
        deleted
    }

    /// The panel's send button.
    pub fn send(&self) {
        self.listeners.emit(&EmojiEvent::SendRequested);
    }

    /// The "new line" menu item: a real line break, unlike the return key.
    pub fn insert_newline(&mut self) {
        let snapshot = self.surface.snapshot();
        let mut buffer = snapshot.buffer;
        let selection = text::replace_selection(&mut buffer, snapshot.selection, "\n");
        self.surface.apply(buffer, selection);
        self.on_text_changed();
    }

    // ---- pasteboard ----

    /// Copy the selection as plain text. Returns `false` when nothing is selected.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Result<bool> {
        let snapshot = self.surface.snapshot();
        match self.codec.copy(&snapshot.buffer, snapshot.selection) {
            Some(text) => {
                clipboard.set_text(text)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Cut the selection as plain text.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> Result<bool> {
        let snapshot = self.surface.snapshot();
        let mut buffer = snapshot.buffer;
        let Some((text, selection)) = self.codec.cut(&mut buffer, snapshot.selection) else {
            return Ok(false);
        };
        clipboard.set_text(text)?;
        self.surface.apply(buffer, selection);
        self.on_text_changed();
        Ok(true)
    }

    /// Paste plain text. Keys inside the pasted text and keys completed by it
    /// are both converted.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> Result<bool> {
        let text = clipboard.get_text()?;
        let snapshot = self.surface.snapshot();
        let mut buffer = snapshot.buffer;
        let Some(selection) = self.codec.paste(&mut buffer, snapshot.selection, &text) else {
            return Ok(false);
        };
        self.surface.apply(buffer, selection);
        self.on_text_changed();
        Ok(true)
    }

    // ---- queries ----

    /// Wire form of the current content.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.codec.encode_to_plain(&self.surface.snapshot().buffer)
    }

    #[must_use]
    pub fn delete_button_disabled(&self) -> bool {
        self.delete_disabled
    }

    #[must_use]
    pub fn suggested(&self) -> Vec<EmojiEntry> {
        self.selection_state
            .suggested(Utc::now())
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn recent_used(&self) -> Vec<EmojiEntry> {
        self.selection_state
            .recent_used(Utc::now())
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn all_available(&self) -> Vec<EmojiEntry> {
        self.selection_state
            .all_available(Utc::now())
            .into_iter()
            .cloned()
            .collect()
    }

    fn finish_edit(&mut self, buffer: &RichBuffer) {
        self.delete_disabled = buffer.is_empty();
        self.listeners.emit(&EmojiEvent::TextChanged);
    }
}
