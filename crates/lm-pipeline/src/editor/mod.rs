//! Editor port: the embeddable text-editing surface.
//!
//! Two interchangeable surfaces implement [`EditorSurface`]:
//!
//! - [`PlainTextSurface`]: applies keystrokes literally
//! - [`CodeSurface`]: tab stops, auto-indent and a line-number gutter
//!
//! Both announce every text mutation with the full current text through the
//! [`ChangeReceiver`] returned by [`EditorSurface::subscribe`]. Disposing a
//! surface closes that channel.

mod buffer;
mod code;
mod plain;
mod slot;

pub use buffer::ChangeReceiver;
pub use code::CodeSurface;
pub use plain::PlainTextSurface;
pub use slot::EditorSlot;

/// Container a surface is created in (one per mount).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MountPoint {
    id: String,
}

impl MountPoint {
    /// Create a mount point with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Mount point identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Which surface implementation to create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceKind {
    /// Minimal plain-text input.
    Plain,
    /// Code editor with line numbers and indentation support.
    #[default]
    Code,
}

/// Editor widget options.
///
/// Only `tab_size` and `auto_indent` change how keystrokes are applied;
/// the rest is presentation for the frontend.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EditorOptions {
    /// Surface implementation.
    pub surface: SurfaceKind,
    /// Language mode name.
    pub language: String,
    /// Color theme name.
    pub theme: String,
    /// Show a line-number gutter.
    pub line_numbers: bool,
    /// Width of a tab stop in columns.
    pub tab_size: usize,
    /// Carry the current line's indentation onto new lines.
    pub auto_indent: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            surface: SurfaceKind::default(),
            language: "markdown".to_owned(),
            theme: "light".to_owned(),
            line_numbers: true,
            tab_size: 4,
            auto_indent: true,
        }
    }
}

/// A user edit. Offsets are character indices, clamped to the text length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorInput {
    /// Replace the whole text (what a browser textarea reports).
    Replace(String),
    /// Insert text at an offset.
    Insert {
        /// Character offset.
        at: usize,
        /// Inserted text.
        text: String,
    },
    /// Tab key at an offset.
    Tab {
        /// Character offset.
        at: usize,
    },
    /// Enter key at an offset.
    Newline {
        /// Character offset.
        at: usize,
    },
    /// Backspace at an offset (deletes before it).
    Backspace {
        /// Character offset.
        at: usize,
    },
}

/// Editor errors.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The widget could not be created.
    #[error("Failed to create editor in {mount}: {reason}")]
    Create {
        /// Mount point identifier.
        mount: String,
        /// Failure description.
        reason: String,
    },
    /// The pipeline was already torn down.
    #[error("Pipeline has been torn down")]
    TornDown,
}

/// Capability interface shared by all editing surfaces.
pub trait EditorSurface: Send {
    /// Implementation kind.
    fn kind(&self) -> SurfaceKind;

    /// Current text.
    fn value(&self) -> &str;

    /// Programmatically replace the text. Does not notify subscribers.
    fn set_value(&mut self, text: &str);

    /// Apply a user edit. Returns `true` if the text changed, in which case
    /// subscribers receive the new full text. Ignored after disposal.
    fn apply(&mut self, input: &EditorInput) -> bool;

    /// Subscribe to change notifications, replacing any previous subscriber.
    fn subscribe(&mut self) -> ChangeReceiver;

    /// Release listeners and internal resources. Idempotent.
    fn dispose(&mut self);

    /// Whether [`dispose`](Self::dispose) has run.
    fn is_disposed(&self) -> bool;
}

/// Creates editor surfaces.
pub trait EditorFactory: Send + Sync {
    /// Create a surface in `mount` holding `initial_text`.
    fn create(
        &self,
        mount: &MountPoint,
        initial_text: &str,
        options: &EditorOptions,
    ) -> Result<Box<dyn EditorSurface>, EditorError>;
}

/// Default factory building the surface named by [`EditorOptions::surface`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceFactory;

impl EditorFactory for SurfaceFactory {
    fn create(
        &self,
        mount: &MountPoint,
        initial_text: &str,
        options: &EditorOptions,
    ) -> Result<Box<dyn EditorSurface>, EditorError> {
        if options.tab_size == 0 {
            return Err(EditorError::Create {
                mount: mount.id().to_owned(),
                reason: "tab size must be at least 1".to_owned(),
            });
        }

        let mut surface: Box<dyn EditorSurface> = match options.surface {
            SurfaceKind::Plain => Box::new(PlainTextSurface::new()),
            SurfaceKind::Code => Box::new(CodeSurface::new(options)),
        };
        surface.set_value(initial_text);
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_builds_requested_kind() {
        let mount = MountPoint::new("m");
        let plain = SurfaceFactory
            .create(
                &mount,
                "",
                &EditorOptions {
                    surface: SurfaceKind::Plain,
                    ..EditorOptions::default()
                },
            )
            .unwrap();
        let code = SurfaceFactory
            .create(&mount, "", &EditorOptions::default())
            .unwrap();

        assert_eq!(plain.kind(), SurfaceKind::Plain);
        assert_eq!(code.kind(), SurfaceKind::Code);
    }

    #[test]
    fn test_factory_sets_initial_text() {
        let surface = SurfaceFactory
            .create(&MountPoint::new("m"), "hello", &EditorOptions::default())
            .unwrap();
        assert_eq!(surface.value(), "hello");
    }

    #[test]
    fn test_factory_rejects_zero_tab_size() {
        let options = EditorOptions {
            tab_size: 0,
            ..EditorOptions::default()
        };
        let err = SurfaceFactory
            .create(&MountPoint::new("session-1"), "", &options)
            .err()
            .unwrap();
        assert!(err.to_string().contains("session-1"));
    }
}
