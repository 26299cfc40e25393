//! Typed notifications from the input component to its host.

use crate::emoji::EmojiEntry;
use crate::input::KeyboardMode;
use crate::text::Selection;
use std::fmt;

/// Something the host may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmojiEvent {
    /// The return key was pressed; the host should send the message.
    SendRequested,
    /// The panel's delete button removed content.
    DeleteRequested,
    /// An emoji was picked from the panel and inserted.
    EmojiSelected(EmojiEntry),
    /// The keyboard mode changed.
    KeyboardTransition { from: KeyboardMode, to: KeyboardMode },
    /// The buffer content changed.
    TextChanged,
    /// The selection moved without a content change.
    SelectionChanged(Selection),
}

impl EmojiEvent {
    /// Short stable name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendRequested => "send_requested",
            Self::DeleteRequested => "delete_requested",
            Self::EmojiSelected(_) => "emoji_selected",
            Self::KeyboardTransition { .. } => "keyboard_transition",
            Self::TextChanged => "text_changed",
            Self::SelectionChanged(_) => "selection_changed",
        }
    }
}

/// Handle returned by [`EventListeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&EmojiEvent) + Send + Sync + 'static>;

/// Listener registry owned by one component instance.
#[derive(Default)]
pub struct EventListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl EventListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it is called for every later event.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&EmojiEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener, in subscription order.
    pub fn emit(&self, event: &EmojiEvent) {
        tracing::trace!(event = event.name(), listeners = self.listeners.len(), "emit");
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_reaches_listeners_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = EventListeners::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(move |event| {
                seen.lock().unwrap().push((tag, event.name()));
            });
        }

        listeners.emit(&EmojiEvent::SendRequested);
        assert_eq!(
            *seen.lock().unwrap(),
            [("first", "send_requested"), ("second", "send_requested")]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let mut listeners = EventListeners::new();
        let id = listeners.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        listeners.emit(&EmojiEvent::TextChanged);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&EmojiEvent::TextChanged);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut listeners = EventListeners::new();
        let a = listeners.subscribe(|_| {});
        let b = listeners.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);
    }
}
