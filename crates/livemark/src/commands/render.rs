//! `livemark render` command implementation.
//!
//! Runs one document through the pipeline, exactly as a single edit in the
//! playground would, and prints the preview fragment.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use lm_config::{CliSettings, Config};
use lm_engine::MarkupEngineFactory;
use lm_pipeline::{Invoker, PipelineController, PreviewBuffer, RenderState, SurfaceFactory};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render (default: read stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover livemark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sanitize the output.
    #[arg(long)]
    sanitize: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let settings = CliSettings {
            sanitize: self.sanitize.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };

        let html = render(&config, &text)?;
        Output::new().result(&html)?;
        Ok(())
    }
}

/// One pipeline pass over `text`.
///
/// Returns the preview fragment, or the engine's message as an error.
fn render(config: &Config, text: &str) -> Result<String, CliError> {
    let invoker = Invoker::new(Arc::new(MarkupEngineFactory::new(config.engine_options())));
    let mut controller = PipelineController::new(
        Arc::new(SurfaceFactory),
        config.editor_options(),
        invoker,
        PreviewBuffer::new(config.preview_options()),
    );
    controller.on_text_change(text);

    tracing::debug!(state = controller.state().name(), "Rendered document");
    match controller.state() {
        RenderState::Errored(message) => Err(CliError::Transform(message.clone())),
        RenderState::Idle | RenderState::Rendered(_) => Ok(controller.sink().frame().to_html()),
    }
}
