//! Minimal plain-text surface.

use super::buffer::TextBuffer;
use super::{ChangeReceiver, EditorInput, EditorSurface, SurfaceKind};

/// Plain-text input: every keystroke is inserted literally.
#[derive(Debug, Default)]
pub struct PlainTextSurface {
    buffer: TextBuffer,
}

impl PlainTextSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorSurface for PlainTextSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Plain
    }

    fn value(&self) -> &str {
        self.buffer.text()
    }

    fn set_value(&mut self, text: &str) {
        self.buffer.set(text);
    }

    fn apply(&mut self, input: &EditorInput) -> bool {
        match input {
            EditorInput::Replace(text) => self.buffer.replace(text),
            EditorInput::Insert { at, text } => self.buffer.insert(*at, text),
            EditorInput::Tab { at } => self.buffer.insert(*at, "\t"),
            EditorInput::Newline { at } => self.buffer.insert(*at, "\n"),
            EditorInput::Backspace { at } => self.buffer.remove_before(*at, 1),
        }
    }

    fn subscribe(&mut self) -> ChangeReceiver {
        self.buffer.subscribe()
    }

    fn dispose(&mut self) {
        self.buffer.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.buffer.is_disposed()
    }
}
