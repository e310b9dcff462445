//! `livemark serve` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lm_config::{CliSettings, Config};
use lm_pipeline::SurfaceKind;
use lm_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Editor surface choice on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SurfaceArg {
    /// Plain text input.
    Plain,
    /// Code editor with line numbers and indentation.
    Code,
}

impl From<SurfaceArg> for SurfaceKind {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Plain => Self::Plain,
            SurfaceArg::Code => Self::Code,
        }
    }
}

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover livemark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Editor surface (overrides config).
    #[arg(long, value_enum)]
    surface: Option<SurfaceArg>,

    /// Sanitize preview markup (for untrusted documents).
    #[arg(long)]
    sanitize: bool,

    /// Transform on the connection task instead of the blocking pool.
    #[arg(long)]
    no_offload: bool,

    /// Enable verbose output (session and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(match config.editor.surface {
            SurfaceKind::Plain => "Editor: plain text",
            SurfaceKind::Code => "Editor: code",
        });
        if config.preview.sanitize {
            output.info("Preview: sanitized");
        } else {
            output.info("Preview: trusted (engine output injected as-is)");
        }
        output.success(&format!(
            "Open http://{}:{}/ in your browser",
            config.server.host, config.server.port
        ));

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            surface: self.surface.map(SurfaceKind::from),
            sanitize: self.sanitize.then_some(true),
            offload: self.no_offload.then_some(false),
        }
    }
}
