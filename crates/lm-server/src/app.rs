//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::middleware::security;
use crate::session;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/config", get(handlers::config::get_config))
        .route("/api/help", get(handlers::help::get_help))
        .route("/api/transform", post(handlers::transform::post_transform));

    let router = Router::new()
        .merge(api_routes)
        .route("/ws/session", get(session::ws_handler))
        .merge(static_files::static_router());

    security::with_security_headers(router).with_state(state)
}
