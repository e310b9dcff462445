//! Render sink and preview frames.
//!
//! A [`RenderSink`] receives every [`RenderState`] transition. The frame it
//! displays is computed by [`PreviewFrame::from_state`]:
//!
//! | State | Frame |
//! |-------|-------|
//! | `Idle` | placeholder |
//! | `Rendered("")` | placeholder |
//! | `Rendered(m)` | `m`, raw or sanitized per [`TrustPolicy`] |
//! | `Errored(msg)` | error block with `msg` |

use std::fmt::Write;

use lm_engine::escape_html;

use crate::state::{Markup, RenderState, SanitizedMarkup};

/// Default placeholder shown before the first edit.
pub const DEFAULT_PLACEHOLDER: &str = "No output";

/// How engine output is treated before injection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrustPolicy {
    /// Inject engine output as-is. Only safe for a trusted engine.
    #[default]
    Trusted,
    /// Clean engine output with `ammonia` before injection.
    Sanitize,
}

/// Preview presentation options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Text shown while there is no output.
    pub placeholder: String,
    /// Treatment of engine output.
    pub trust: TrustPolicy,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            trust: TrustPolicy::default(),
        }
    }
}

/// What the preview surface displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewFrame {
    /// Fixed placeholder message.
    Placeholder(String),
    /// Markup injected into the preview.
    Markup(String),
    /// Engine failure message.
    Error(String),
}

impl PreviewFrame {
    /// Compute the frame for a render state.
    #[must_use]
    pub fn from_state(state: &RenderState, options: &PreviewOptions) -> Self {
        match state {
            RenderState::Idle => Self::Placeholder(options.placeholder.clone()),
            RenderState::Rendered(markup) if markup.is_empty() => {
                Self::Placeholder(options.placeholder.clone())
            }
            RenderState::Rendered(markup) => match options.trust {
                TrustPolicy::Trusted => Self::Markup(markup.as_str().to_owned()),
                TrustPolicy::Sanitize => Self::Markup(sanitize(markup).into_string()),
            },
            RenderState::Errored(message) => Self::Error(message.clone()),
        }
    }

    /// Frame kind name used on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Placeholder(_) => "placeholder",
            Self::Markup(_) => "markup",
            Self::Error(_) => "error",
        }
    }

    /// HTML fragment for the preview surface.
    ///
    /// Placeholder and error text are escaped; markup is injected verbatim.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Placeholder(text) => {
                format!(r#"<p class="preview-placeholder">{}</p>"#, escape_html(text))
            }
            Self::Markup(html) => html.clone(),
            Self::Error(message) => {
                let mut out = String::from(r#"<div class="preview-error" role="alert">"#);
                write!(
                    out,
                    "<strong>Error</strong><pre>{}</pre></div>",
                    escape_html(message)
                )
                .unwrap();
                out
            }
        }
    }
}

/// Remove scripts, event handlers and other active content from markup.
#[must_use]
pub fn sanitize(markup: &Markup) -> SanitizedMarkup {
    SanitizedMarkup::new(ammonia::clean(markup.as_str()))
}

/// Receives every render state transition.
pub trait RenderSink {
    /// Reflect `state` in the preview.
    fn render(&mut self, state: &RenderState);
}

/// Sink that keeps the latest frame in memory.
///
/// Used by one-shot rendering and tests.
#[derive(Debug)]
pub struct PreviewBuffer {
    options: PreviewOptions,
    frame: PreviewFrame,
    renders: usize,
}

impl PreviewBuffer {
    /// Create a buffer showing the placeholder.
    #[must_use]
    pub fn new(options: PreviewOptions) -> Self {
        let frame = PreviewFrame::Placeholder(options.placeholder.clone());
        Self {
            options,
            frame,
            renders: 0,
        }
    }

    /// Currently displayed frame.
    #[must_use]
    pub fn frame(&self) -> &PreviewFrame {
        &self.frame
    }

    /// Number of `render` calls received.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl RenderSink for PreviewBuffer {
    fn render(&mut self, state: &RenderState) {
        self.frame = PreviewFrame::from_state(state, &self.options);
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_idle_shows_placeholder() {
        let frame = PreviewFrame::from_state(&RenderState::Idle, &PreviewOptions::default());
        assert_eq!(frame, PreviewFrame::Placeholder("No output".to_owned()));
        assert_eq!(
            frame.to_html(),
            r#"<p class="preview-placeholder">No output</p>"#
        );
    }

    #[test]
    fn test_empty_markup_shows_placeholder() {
        let state = RenderState::Rendered(Markup::default());
        let frame = PreviewFrame::from_state(&state, &PreviewOptions::default());
        assert_eq!(frame.kind(), "placeholder");
    }

    #[test]
    fn test_markup_is_injected_unescaped() {
        let state = RenderState::Rendered("<ul><li>Item 1</li></ul>".into());
        let frame = PreviewFrame::from_state(&state, &PreviewOptions::default());
        assert_eq!(frame.to_html(), "<ul><li>Item 1</li></ul>");
    }

    #[test]
    fn test_trusted_markup_keeps_scripts() {
        let state = RenderState::Rendered("<p>hi</p><script>x()</script>".into());
        let frame = PreviewFrame::from_state(&state, &PreviewOptions::default());
        assert_eq!(frame.to_html(), "<p>hi</p><script>x()</script>");
    }

    #[test]
    fn test_sanitize_policy_strips_scripts() {
        let options = PreviewOptions {
            trust: TrustPolicy::Sanitize,
            ..PreviewOptions::default()
        };
        let state = RenderState::Rendered("<p>hi</p><script>x()</script>".into());
        let frame = PreviewFrame::from_state(&state, &options);
        assert_eq!(frame, PreviewFrame::Markup("<p>hi</p>".to_owned()));
    }

    #[test]
    fn test_error_block_contains_message() {
        let state = RenderState::Errored("Unexpected token !".to_owned());
        let frame = PreviewFrame::from_state(&state, &PreviewOptions::default());
        assert_eq!(frame, PreviewFrame::Error("Unexpected token !".to_owned()));
        assert_eq!(
            frame.to_html(),
            r#"<div class="preview-error" role="alert"><strong>Error</strong><pre>Unexpected token !</pre></div>"#
        );
    }

    #[test]
    fn test_error_message_is_escaped() {
        let frame = PreviewFrame::Error("<b>".to_owned());
        assert!(frame.to_html().contains("<pre>&lt;b&gt;</pre>"));
    }

    #[test]
    fn test_custom_placeholder() {
        let options = PreviewOptions {
            placeholder: "Type something".to_owned(),
            ..PreviewOptions::default()
        };
        let buffer = PreviewBuffer::new(options);
        assert_eq!(
            buffer.frame(),
            &PreviewFrame::Placeholder("Type something".to_owned())
        );
        assert_eq!(buffer.renders(), 0);
    }

    #[test]
    fn test_buffer_tracks_latest_frame() {
        let mut buffer = PreviewBuffer::new(PreviewOptions::default());
        buffer.render(&RenderState::Rendered("<p>a</p>".into()));
        buffer.render(&RenderState::Errored("bad".to_owned()));

        assert_eq!(buffer.frame(), &PreviewFrame::Error("bad".to_owned()));
        assert_eq!(buffer.renders(), 2);
    }
}
