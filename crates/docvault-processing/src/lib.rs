//! Docvault Processing Library
//!
//! Text extraction and the ingestion pipeline that turns one uploaded PDF into
//! two stored objects.

pub mod document;
pub mod identifier;
pub mod pipeline;
pub mod validator;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_fixtures;

pub use document::{ExtractionError, PdfTextExtractor, TextExtractor};
pub use identifier::{base_name, document_id, processing_date, PROCESSING_DATE_FORMAT};
pub use pipeline::{IngestError, IngestStage, IngestionPipeline};
pub use validator::{validate_pdf_filename, ValidationError};
