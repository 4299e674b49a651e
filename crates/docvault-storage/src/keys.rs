//! Document key layout.
//!
//! PDFs: `documents/pdf/{document_id}_{original_filename}`; extracted text:
//! `documents/markdown/{document_id}_{base_name}.md`. Both embed the document
//! identifier, so re-ingesting a file writes new keys instead of overwriting.

pub const PDF_NAMESPACE: &str = "documents/pdf/";
pub const MARKDOWN_NAMESPACE: &str = "documents/markdown/";

/// Namespaces in listing order.
pub const DOCUMENT_NAMESPACES: [&str; 2] = [PDF_NAMESPACE, MARKDOWN_NAMESPACE];

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// Name of the zero-byte object that marks a namespace as created.
pub const MARKER_NAME: &str = ".keep";

pub fn pdf_key(document_id: &str, original_filename: &str) -> String {
    format!("{}{}_{}", PDF_NAMESPACE, document_id, original_filename)
}

pub fn markdown_key(document_id: &str, base_name: &str) -> String {
    format!("{}{}_{}.md", MARKDOWN_NAMESPACE, document_id, base_name)
}

/// Marker key for a namespace; `namespace` may omit its trailing `/`.
pub fn marker_key(namespace: &str) -> String {
    format!("{}/{}", namespace.trim_end_matches('/'), MARKER_NAME)
}

/// Best-effort content type from a filename's extension.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(PDF_CONTENT_TYPE),
        "md" | "markdown" => Some(MARKDOWN_CONTENT_TYPE),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
