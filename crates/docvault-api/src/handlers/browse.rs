//! Browse and retrieve: list bucket keys and stream one object back.
//!
//! No filtering or access control applies; any key in the bucket can be
//! downloaded.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    Json,
};
use docvault_core::{AppError, ObjectListing};
use futures::StreamExt;
use std::sync::Arc;

/// Every key in the bucket (one listing page).
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ObjectListing>, HttpAppError> {
    let keys = state.store.list_all().await?;
    Ok(Json(ObjectListing { keys }))
}

/// Keys under the PDF namespace, then the Markdown namespace.
pub async fn list_namespaced_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ObjectListing>, HttpAppError> {
    let keys = state.store.list_documents().await?;
    Ok(Json(ObjectListing { keys }))
}

#[tracing::instrument(skip(state), fields(operation = "download_document"))]
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response<Body>, HttpAppError> {
    let object = state.store.open(&key).await?;

    tracing::debug!(key = %key, size_bytes = object.size, "Streaming object from storage");

    let body_stream = object.body.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, object.size)
        .header(header::CONTENT_DISPOSITION, content_disposition(&key))
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// `attachment` disposition naming the key's final segment.
fn content_disposition(key: &str) -> String {
    let filename = key.rsplit('/').next().unwrap_or(key);
    let ascii_fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback,
        urlencoding::encode(filename)
    )
}
