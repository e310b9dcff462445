//! HTTP and WebSocket server for the Livemark playground.
//!
//! Serves:
//! - the playground frontend (static files)
//! - a JSON API for configuration, help content and one-shot transforms
//! - a WebSocket endpoint where each connection is one editing session
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (lm-server)
//!                        │
//!                        ├─► /api/*        one-shot PipelineController per request
//!                        │
//!                        ├─► /ws/session   one mounted PipelineController per socket
//!                        │       │
//!                        │       └─► spawn_blocking ──► Invoker (when offloading)
//!                        │
//!                        └─► static files (lm-assets, embedded or filesystem)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod session;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use lm_engine::EngineOptions;
use lm_pipeline::{EditorOptions, PreviewOptions};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Options for every session's editor surface.
    pub editor: EditorOptions,
    /// Preview placeholder and trust policy.
    pub preview: PreviewOptions,
    /// Transformation engine options.
    pub engine: EngineOptions,
    /// Run session transforms on the blocking pool.
    pub offload: bool,
    /// Application version reported to the frontend.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            editor: EditorOptions::default(),
            preview: PreviewOptions::default(),
            engine: EngineOptions::default(),
            offload: true,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&config));
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, offload = config.offload, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Livemark config.
#[must_use]
pub fn server_config_from_config(config: &lm_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        editor: config.editor_options(),
        preview: config.preview_options(),
        engine: config.engine_options(),
        offload: config.pipeline.offload,
        version,
    }
}

#[cfg(test)]
mod tests {
    use lm_pipeline::{SurfaceKind, TrustPolicy};

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = lm_config::Config::default();
        config.server.port = 9000;
        config.editor.surface = SurfaceKind::Plain;
        config.preview.sanitize = true;
        config.pipeline.offload = false;

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.port, 9000);
        assert_eq!(server.editor.surface, SurfaceKind::Plain);
        assert_eq!(server.preview.trust, TrustPolicy::Sanitize);
        assert!(!server.offload);
        assert_eq!(server.version, "1.2.3");
    }
}
