//! Strict markdown transformation engine for Livemark.
//!
//! The playground pipeline treats the engine as a black box: a constructible
//! unit with a single [`Engine::execute`] entry point that either returns
//! markup or fails with an [`EngineError`] carrying a human-readable message.
//!
//! # Architecture
//!
//! - [`Engine`]: the single-operation interface the pipeline calls
//! - [`EngineFactory`]: produces a fresh engine instance per invocation
//! - [`MarkupEngine`]: the bundled engine, a strict markdown dialect
//!   rendered to HTML with `pulldown-cmark`
//!
//! The strict dialect rejects input that plain markdown would silently
//! accept, so the playground has real failures to contain:
//!
//! - a line starting with `!` that is not an image (`![alt](src)`)
//! - a fenced code block left open at the end of the document
//! - documents larger than [`EngineOptions::max_input_bytes`]
//!
//! # Example
//!
//! ```
//! use lm_engine::{Engine, MarkupEngine};
//!
//! let mut engine = MarkupEngine::default();
//! assert_eq!(engine.execute("- Item 1").unwrap(), "<ul><li>Item 1</li></ul>");
//! assert_eq!(
//!     engine.execute("!boom").unwrap_err().message(),
//!     "Unexpected token !"
//! );
//! ```

mod engine;
mod html;
mod markup;
mod validate;

pub use engine::{Engine, EngineError, EngineFactory};
pub use html::escape_html;
pub use markup::{DEFAULT_MAX_INPUT_BYTES, EngineOptions, MarkupEngine, MarkupEngineFactory};
