//! Text buffer and change channel shared by the surfaces.

use std::sync::mpsc;

/// Receiver for editor change notifications.
///
/// Each notification carries the full text after the change. Wraps a
/// [`std::sync::mpsc::Receiver`]; the surface holds the sender and drops it
/// on disposal.
#[derive(Debug)]
pub struct ChangeReceiver {
    rx: mpsc::Receiver<String>,
}

impl ChangeReceiver {
    /// Try to receive a notification without blocking.
    ///
    /// Returns `None` if nothing is pending or the surface was disposed.
    #[must_use]
    pub fn try_recv(&self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    /// Iterate over all pending notifications without blocking.
    pub fn drain(&self) -> impl Iterator<Item = String> + '_ {
        self.rx.try_iter()
    }
}

/// Text plus subscriber state used by every surface.
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    text: String,
    subscriber: Option<mpsc::Sender<String>>,
    disposed: bool,
}

impl TextBuffer {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Programmatic write; subscribers are not notified.
    pub(crate) fn set(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    pub(crate) fn subscribe(&mut self) -> ChangeReceiver {
        let (tx, rx) = mpsc::channel();
        if !self.disposed {
            self.subscriber = Some(tx);
        }
        ChangeReceiver { rx }
    }

    pub(crate) fn dispose(&mut self) {
        self.subscriber = None;
        self.disposed = true;
    }

    /// Replace the text as a user edit, notifying on change.
    pub(crate) fn replace(&mut self, text: &str) -> bool {
        if self.disposed || self.text == text {
            return false;
        }
        text.clone_into(&mut self.text);
        self.notify();
        true
    }

    /// Insert at a character offset, notifying on change.
    pub(crate) fn insert(&mut self, at: usize, text: &str) -> bool {
        if self.disposed || text.is_empty() {
            return false;
        }
        let byte = byte_offset(&self.text, at);
        self.text.insert_str(byte, text);
        self.notify();
        true
    }

    /// Remove `count` characters before a character offset, notifying on change.
    pub(crate) fn remove_before(&mut self, at: usize, count: usize) -> bool {
        let at = at.min(self.text.chars().count());
        if self.disposed || at == 0 || count == 0 {
            return false;
        }
        let start = byte_offset(&self.text, at.saturating_sub(count));
        let end = byte_offset(&self.text, at);
        self.text.replace_range(start..end, "");
        self.notify();
        true
    }

    fn notify(&self) {
        if let Some(tx) = &self.subscriber {
            // A dropped receiver only means nobody listens anymore.
            let _ = tx.send(self.text.clone());
        }
    }
}

/// Byte index of a character offset, clamped to the end of the text.
pub(crate) fn byte_offset(text: &str, at: usize) -> usize {
    text.char_indices().nth(at).map_or(text.len(), |(i, _)| i)
}

/// Text of the line containing the character offset, up to that offset.
pub(crate) fn line_prefix(text: &str, at: usize) -> &str {
    let byte = byte_offset(text, at);
    let start = text[..byte].rfind('\n').map_or(0, |i| i + 1);
    &text[start..byte]
}
