//! Document text extraction

pub mod extractor;

pub use extractor::{ExtractionError, PdfTextExtractor, TextExtractor};
