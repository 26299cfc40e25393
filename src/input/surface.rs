//! Contract with the host's text widget.

use crate::text::{RichBuffer, Selection, replace_selection};
use std::ops::Range;

/// What the text widget currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceSnapshot {
    pub buffer: RichBuffer,
    pub selection: Selection,
    /// Uncommitted input-method range, if a composition is in progress.
    pub composition: Option<Range<usize>>,
}

impl SurfaceSnapshot {
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.composition.is_some()
    }
}

/// The host's text widget, seen from the core.
///
/// The widget owns caret, native selection and raw key handling. The core
/// reads a snapshot after each user edit and pushes back the result.
pub trait InputSurface {
    /// Current buffer, selection and composition state.
    fn snapshot(&self) -> SurfaceSnapshot;

    /// Replace the displayed buffer and selection.
    fn apply(&mut self, buffer: RichBuffer, selection: Selection);

    /// Only the selection changed.
    fn apply_selection(&mut self, selection: Selection) {
        let snapshot = self.snapshot();
        self.apply(snapshot.buffer, selection);
    }
}

/// Headless surface holding its state in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    buffer: RichBuffer,
    selection: Selection,
    composition: Option<Range<usize>>,
    applied: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with literal text and the caret at its end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let buffer = RichBuffer::from_text(text);
        let selection = Selection::caret(buffer.len());
        Self {
            buffer,
            selection,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &RichBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// How many times the core pushed state back.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Simulate the user typing over the selection.
    pub fn type_text(&mut self, text: &str) {
        self.selection = replace_selection(&mut self.buffer, self.selection, text);
    }

    /// Simulate the user moving the caret or selection.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.buffer.len());
    }

    /// Start or end an input-method composition.
    pub fn set_composition(&mut self, composition: Option<Range<usize>>) {
        self.composition = composition;
    }
}

impl InputSurface for MemorySurface {
    fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            buffer: self.buffer.clone(),
            selection: self.selection,
            composition: self.composition.clone(),
        }
    }

    fn apply(&mut self, buffer: RichBuffer, selection: Selection) {
        self.selection = selection.clamped(buffer.len());
        self.buffer = buffer;
        self.applied += 1;
    }

    fn apply_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.buffer.len());
        self.applied += 1;
    }
}
