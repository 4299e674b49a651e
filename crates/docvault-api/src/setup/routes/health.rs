//! Root and liveness handlers.

use axum::Json;
use serde_json::{json, Value};

/// Static confirmation that the API process is up.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "PDF Extractor API is running" }))
}

/// Liveness check: the process is running.
pub async fn liveness_check() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}
