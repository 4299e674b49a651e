//! PDF text extraction
//!
//! The extractor opens the PDF from memory and concatenates the plain text of
//! every page in page order. No layout analysis happens here: the output is
//! whatever the parsing library produces for each page.

use async_trait::async_trait;
use bytes::Bytes;
use std::any::Any;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The bytes could not be opened or parsed as a PDF.
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// The parser aborted while walking the document.
    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

/// Produces plain text from raw document bytes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// An empty string is a valid result (e.g. image-only scans).
    async fn extract(&self, data: Bytes) -> Result<String, ExtractionError>;
}

/// [`TextExtractor`] backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractionError> {
        let start = Instant::now();
        let size = data.len();

        // pdf-extract is CPU bound and panics on some malformed inputs; running
        // it on the blocking pool turns a panic into a JoinError.
        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&data)
        })
        .await
        .map_err(|e| {
            let reason = if e.is_panic() {
                panic_message(e.into_panic())
            } else {
                e.to_string()
            };
            tracing::error!(error = %reason, size_bytes = size, "PDF extraction aborted");
            ExtractionError::Aborted(reason)
        })?
        .map_err(|e| {
            tracing::warn!(error = %e, size_bytes = size, "PDF could not be parsed");
            ExtractionError::InvalidPdf(e.to_string())
        })?;

        let text = pages.concat();
        tracing::debug!(
            pages = pages.len(),
            text_len = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "PDF text extracted"
        );

        Ok(text)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
