use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    Json,
};
use docvault_core::{DocumentRecord, RawUploadResponse};
use std::sync::Arc;

/// Ingest a PDF: extract its text and store both the PDF and the text.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_pdf"))]
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<DocumentRecord>, HttpAppError> {
    let file = extract_multipart_file(multipart).await?;
    tracing::debug!(
        filename = %file.filename,
        content_type = %file.content_type,
        size_bytes = file.data.len(),
        "Received PDF upload"
    );

    let record = state.pipeline.ingest(&file.filename, file.data).await?;
    Ok(Json(record))
}

/// Store a file at the bucket root as-is, without extraction.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_document"))]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<RawUploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart).await?;
    tracing::debug!(
        filename = %file.filename,
        content_type = %file.content_type,
        size_bytes = file.data.len(),
        "Received raw upload"
    );

    let (key, url) = state.store.put_raw(&file.filename, file.data).await?;
    Ok(Json(RawUploadResponse { key, url }))
}
