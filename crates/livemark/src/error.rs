//! CLI error types.

use lm_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Editor(#[from] lm_pipeline::EditorError),

    #[error("{0}")]
    Server(String),

    /// The engine rejected the document.
    #[error("{0}")]
    Transform(String),
}
