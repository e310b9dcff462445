//! The bundled strict-markdown engine.

use pulldown_cmark::{Options, Parser};

use crate::engine::{Engine, EngineError, EngineFactory};
use crate::html::HtmlWriter;
use crate::validate::validate;

/// Default upper bound on document size (256 KiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 256 * 1024;

/// Engine options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Reject documents larger than this many bytes.
    pub max_input_bytes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl EngineOptions {
    fn parser_options(self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Strict markdown to HTML engine.
#[derive(Debug, Default)]
pub struct MarkupEngine {
    options: EngineOptions,
}

impl MarkupEngine {
    /// Create an engine with the given options.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }
}

impl Engine for MarkupEngine {
    fn execute(&mut self, text: &str) -> Result<String, EngineError> {
        if text.len() > self.options.max_input_bytes {
            return Err(EngineError::new(format!(
                "Document exceeds {} bytes",
                self.options.max_input_bytes
            )));
        }
        if text.is_empty() {
            return Ok(String::new());
        }

        let options = self.options.parser_options();
        validate(text, options)?;

        let parser = Parser::new_ext(text, options);
        Ok(HtmlWriter::default().render(parser))
    }
}

/// Factory producing [`MarkupEngine`] instances with fixed options.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupEngineFactory {
    options: EngineOptions,
}

impl MarkupEngineFactory {
    /// Create a factory for engines with the given options.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Options passed to every engine this factory creates.
    #[must_use]
    pub fn options(&self) -> EngineOptions {
        self.options
    }
}

impl EngineFactory for MarkupEngineFactory {
    fn create(&self) -> Box<dyn Engine> {
        Box::new(MarkupEngine::new(self.options))
    }
}
