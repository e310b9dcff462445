//! Configuration management for Livemark.
//!
//! Parses `livemark.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied on load via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` expands to the value of VAR and errors if unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset
//!
//! Expanded fields: `server.host`, `preview.placeholder`.

mod expand;

use std::path::{Path, PathBuf};

use lm_engine::{DEFAULT_MAX_INPUT_BYTES, EngineOptions};
use lm_pipeline::{
    DEFAULT_PLACEHOLDER, EditorOptions, PreviewOptions, SurfaceKind, TrustPolicy,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override editor surface.
    pub surface: Option<SurfaceKind>,
    /// Override output sanitization.
    pub sanitize: Option<bool>,
    /// Override background transformation.
    pub offload: Option<bool>,
}

const CONFIG_FILENAME: &str = "livemark.toml";

const MAX_TAB_SIZE: usize = 16;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Editor widget configuration.
    pub editor: EditorConfig,
    /// Preview pane configuration.
    pub preview: PreviewConfig,
    /// Transformation engine configuration.
    pub engine: EngineConfig,
    /// Pipeline driving configuration.
    pub pipeline: PipelineConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Editor widget configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Surface implementation.
    pub surface: SurfaceKind,
    /// Tab stop width.
    pub tab_size: usize,
    /// Carry indentation onto new lines.
    pub auto_indent: bool,
    /// Show line numbers.
    pub line_numbers: bool,
    /// Color theme name.
    pub theme: String,
    /// Language mode name.
    pub language: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let defaults = EditorOptions::default();
        Self {
            surface: defaults.surface,
            tab_size: defaults.tab_size,
            auto_indent: defaults.auto_indent,
            line_numbers: defaults.line_numbers,
            theme: defaults.theme,
            language: defaults.language,
        }
    }
}

/// Preview pane configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Text shown before the first edit.
    pub placeholder: String,
    /// Clean engine output before injecting it.
    pub sanitize: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            sanitize: false,
        }
    }
}

/// Transformation engine configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    /// Largest accepted document in bytes.
    pub max_input_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Pipeline driving configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run transformations off the connection task.
    pub offload: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { offload: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`LIVEMARK_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `livemark.toml` in the current directory and parents, falling back
    /// to defaults. CLI settings take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(surface) = settings.surface {
            self.editor.surface = surface;
        }
        if let Some(sanitize) = settings.sanitize {
            self.preview.sanitize = sanitize;
        }
        if let Some(offload) = settings.offload {
            self.pipeline.offload = offload;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if !(1..=MAX_TAB_SIZE).contains(&self.editor.tab_size) {
            return Err(ConfigError::Validation(format!(
                "editor.tab_size must be between 1 and {MAX_TAB_SIZE}"
            )));
        }

        if self.engine.max_input_bytes == 0 {
            return Err(ConfigError::Validation(
                "engine.max_input_bytes must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.preview.placeholder =
            expand::expand_env(&self.preview.placeholder, "preview.placeholder")?;
        Ok(())
    }

    /// Options for the editor surface.
    #[must_use]
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            surface: self.editor.surface,
            language: self.editor.language.clone(),
            theme: self.editor.theme.clone(),
            line_numbers: self.editor.line_numbers,
            tab_size: self.editor.tab_size,
            auto_indent: self.editor.auto_indent,
        }
    }

    /// Options for the preview sink.
    #[must_use]
    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            placeholder: self.preview.placeholder.clone(),
            trust: if self.preview.sanitize {
                TrustPolicy::Sanitize
            } else {
                TrustPolicy::Trusted
            },
        }
    }

    /// Options for the transformation engine.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            gfm: self.engine.gfm,
            max_input_bytes: self.engine.max_input_bytes,
        }
    }
}
