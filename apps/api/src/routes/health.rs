use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Resume parser API is running"
    }))
}

/// GET /health
/// Returns a status object with service version and the loaded backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-parser-api",
        "extractor": state.extractor.id(),
        "ner_backend": state.recognizer.backend_id()
    }))
}
