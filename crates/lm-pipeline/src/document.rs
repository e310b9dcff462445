//! The edited document.

/// Current editable text, the single source of truth for what the user edits.
///
/// Created empty when the pipeline starts; only the change handler writes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the document text.
    pub(crate) fn set(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.as_str(), "");
    }

    #[test]
    fn test_set_replaces_text() {
        let mut doc = Document::new();
        doc.set("first");
        doc.set("second");
        assert_eq!(doc.as_str(), "second");
    }
}
