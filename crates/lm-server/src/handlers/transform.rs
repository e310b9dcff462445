//! One-shot transform endpoint.
//!
//! Runs the text through a fresh, unmounted pipeline and reports the frame
//! the preview would show.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use lm_pipeline::{PreviewBuffer, RenderState};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Request body for POST /api/transform.
#[derive(Deserialize)]
pub(crate) struct TransformRequest {
    text: String,
}

/// Response for POST /api/transform.
#[derive(Debug, Serialize)]
pub(crate) struct TransformResponse {
    /// Render state name.
    state: &'static str,
    /// Preview fragment.
    html: String,
    /// Engine failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Handle POST /api/transform.
pub(crate) async fn post_transform(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, ServerError> {
    let response = if state.offload {
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || transform(&state, &request.text)).await?
    } else {
        transform(&state, &request.text)
    };
    Ok(Json(response))
}

fn transform(state: &AppState, text: &str) -> TransformResponse {
    let mut controller = state.controller(PreviewBuffer::new(state.preview.clone()));
    controller.on_text_change(text);

    let message = match controller.state() {
        RenderState::Errored(message) => Some(message.clone()),
        RenderState::Idle | RenderState::Rendered(_) => None,
    };
    TransformResponse {
        state: controller.state().name(),
        html: controller.sink().frame().to_html(),
        message,
    }
}
