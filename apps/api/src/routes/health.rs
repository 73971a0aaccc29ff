use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Confirms the API is reachable.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Syllabus Analyzer API is running"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "syllabus-analyzer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
