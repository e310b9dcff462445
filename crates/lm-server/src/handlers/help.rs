//! Help content endpoint.

use axum::Json;
use lm_pipeline::{HelpContent, HelpOverlay};

/// Handle GET /api/help.
pub(crate) async fn get_help() -> Json<&'static HelpContent> {
    Json(HelpOverlay::content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_serialization() {
        let json = serde_json::to_value(HelpOverlay::content()).unwrap();

        assert!(json["example"].as_str().unwrap().starts_with("# "));
        let first = &json["metacharacters"][0];
        assert_eq!(first["token"], "# ");
        assert!(first["meaning"].is_string());
    }
}
