//! Engine interface and error type.

/// Error raised by an engine when it cannot transform a document.
///
/// The message is shown to the user verbatim, so it should read as a
/// complete sentence fragment (e.g., "Unexpected token !").
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    line: Option<usize>,
}

impl EngineError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Attach the 1-based source line the error refers to.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source line (1-based), if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// A document-transformation engine.
///
/// An engine instance is used for exactly one call. Implementations are free
/// to keep parser state on `self`; the caller never reuses an instance.
pub trait Engine {
    /// Transform document text into markup.
    fn execute(&mut self, text: &str) -> Result<String, EngineError>;
}

/// Produces fresh [`Engine`] instances.
///
/// Factories are shared between threads; the engines they produce are not.
pub trait EngineFactory: Send + Sync {
    /// Construct a new, isolated engine instance.
    fn create(&self) -> Box<dyn Engine>;
}

impl<F, E> EngineFactory for F
where
    F: Fn() -> E + Send + Sync,
    E: Engine + 'static,
{
    fn create(&self) -> Box<dyn Engine> {
        Box::new(self())
    }
}
