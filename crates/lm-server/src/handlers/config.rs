//! Configuration API endpoint.
//!
//! Returns the editor setup the frontend needs before opening a session.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use lm_pipeline::{EditorOptions, TrustPolicy};
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/config.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigResponse {
    /// Editor widget options.
    editor: EditorOptions,
    /// Preview placeholder text.
    placeholder: String,
    /// How preview markup is treated.
    trust: TrustPolicy,
    /// Whether transforms run in the background.
    offload: bool,
    /// Server version.
    version: String,
}

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        editor: state.editor.clone(),
        placeholder: state.preview.placeholder.clone(),
        trust: state.preview.trust,
        offload: state.offload,
        version: state.version.clone(),
    })
}
