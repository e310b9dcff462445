//! Static file serving for the playground frontend.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().fallback(serve_asset)
}

/// Serve a frontend asset, or `index.html` for extensionless paths.
async fn serve_asset(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if !path.is_empty()
        && let Some(content) = lm_assets::get(path)
    {
        return (
            [(header::CONTENT_TYPE, lm_assets::mime_for(path))],
            content.into_owned(),
        )
            .into_response();
    }

    let is_page = !path.starts_with("api/") && !path.contains('.');
    if is_page && let Some(index) = lm_assets::get("index.html") {
        return (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            index.into_owned(),
        )
            .into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::ServerConfig;

    fn router() -> Router {
        static_router().with_state(Arc::new(AppState::new(&ServerConfig::default())))
    }

    async fn get(uri: &str) -> Response {
        router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_script_with_mime() {
        let response = get("/app.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/javascript");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        assert_eq!(get("/missing.css").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get("/api/unknown").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_page_falls_back_to_index() {
        assert_eq!(get("/playground").await.status(), StatusCode::OK);
    }
}
