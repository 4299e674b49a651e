//! Response models shared by the API and its clients.

use serde::{Deserialize, Serialize};

/// Outcome of one successful ingestion.
///
/// Built once, returned to the caller and then dropped; the two stored objects
/// it points at are the only durable trace of the ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub original_filename: String,
    pub pdf_url: String,
    pub markdown_url: String,
    /// Second-granularity timestamp used in `document_id` (`YYYYMMDD_HHMMSS`).
    pub processing_date: String,
}

/// Object keys returned by a listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectListing {
    pub keys: Vec<String>,
}

/// Result of a raw (non-extracting) upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUploadResponse {
    pub key: String,
    pub url: String,
}
