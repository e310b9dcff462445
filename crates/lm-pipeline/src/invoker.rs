//! Transformation invoker.
//!
//! The only place the pipeline touches the engine. Every failure mode,
//! including a panicking engine, becomes a [`TransformationError`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use lm_engine::EngineFactory;

use crate::state::Markup;

/// Failure of a single transformation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransformationError {
    message: String,
}

impl TransformationError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message as reported by the engine.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume and return the message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Outcome of one invocation; never retained by the invoker.
pub type TransformationResult = Result<Markup, TransformationError>;

/// Runs the engine on document text.
///
/// Cheap to clone; clones share the engine factory.
#[derive(Clone)]
pub struct Invoker {
    factory: Arc<dyn EngineFactory>,
}

impl Invoker {
    /// Create an invoker over an engine factory.
    #[must_use]
    pub fn new(factory: Arc<dyn EngineFactory>) -> Self {
        Self { factory }
    }

    /// Transform `text` with a freshly constructed engine.
    ///
    /// Never fails outward: engine errors and engine panics are both returned
    /// as `Err`.
    pub fn transform(&self, text: &str) -> TransformationResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut engine = self.factory.create();
            engine.execute(text)
        }));

        match outcome {
            Ok(Ok(html)) => Ok(Markup::new(html)),
            Ok(Err(err)) => {
                tracing::debug!(error = %err, line = ?err.line(), "Transformation failed");
                Err(TransformationError::new(err.message()))
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::warn!(reason = %reason, "Engine panicked");
                Err(TransformationError::new(format!("engine panicked: {reason}")))
            }
        }
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker").finish_non_exhaustive()
    }
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
