//! Render state and markup types.

use std::fmt;

/// Raw engine output.
///
/// Not escaped or sanitized. Injecting it into a page is only safe when the
/// engine's input is trusted; see [`SanitizedMarkup`] otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Wrap engine output.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Raw markup text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the engine produced no markup at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the markup text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Markup {
    fn from(html: &str) -> Self {
        Self(html.to_owned())
    }
}

impl From<String> for Markup {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Markup that went through the sanitizer and is safe to inject.
///
/// Only constructible by [`sanitize`](crate::sanitize).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedMarkup(String);

impl SanitizedMarkup {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// Sanitized markup text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the markup text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Latest transformation outcome shown by the preview.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderState {
    /// No edit has happened yet.
    #[default]
    Idle,
    /// The engine succeeded.
    Rendered(Markup),
    /// The engine failed with this message.
    Errored(String),
}

impl RenderState {
    /// Short name used in logs and wire messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rendered(_) => "rendered",
            Self::Errored(_) => "errored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(RenderState::default(), RenderState::Idle);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(RenderState::Idle.name(), "idle");
        assert_eq!(RenderState::Rendered("<p>x</p>".into()).name(), "rendered");
        assert_eq!(RenderState::Errored("bad".to_owned()).name(), "errored");
    }

    #[test]
    fn test_markup_accessors() {
        let markup = Markup::new("<p>x</p>");
        assert_eq!(markup.as_str(), "<p>x</p>");
        assert_eq!(markup.to_string(), "<p>x</p>");
        assert!(!markup.is_empty());
        assert!(Markup::default().is_empty());
    }
}
