//! Test fixtures: the lopdf-built PDFs from docvault-processing, as multipart
//! payloads.

use docvault_processing::test_fixtures;

/// A PDF with one page per entry; empty entries produce blank pages.
pub fn create_test_pdf(pages: &[&str]) -> Vec<u8> {
    test_fixtures::pdf_with_pages(pages).to_vec()
}

/// Bytes that carry a PDF header but no parseable body.
pub fn create_corrupt_pdf() -> Vec<u8> {
    test_fixtures::corrupt_pdf().to_vec()
}

/// A PDF that needs a non-empty user password to open.
pub fn create_password_protected_pdf() -> Vec<u8> {
    test_fixtures::password_protected_pdf().to_vec()
}
