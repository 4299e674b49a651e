//! Document identifiers
//!
//! An identifier is `{base_name}_{timestamp}` with the timestamp at second
//! granularity. Two uploads sharing a base name within the same second get the
//! same identifier.

use chrono::NaiveDateTime;

/// `YYYYMMDD_HHMMSS`, used for both the identifier and `processing_date`.
pub const PROCESSING_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Final path segment of the filename, without its last extension.
///
/// A dot only starts an extension when something precedes it and follows it,
/// so `.pdf` and `notes.` keep their full name.
pub fn base_name(filename: &str) -> &str {
    let file = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match file.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file.len() => &file[..dot],
        _ => file,
    }
}

pub fn processing_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format(PROCESSING_DATE_FORMAT).to_string()
}

pub fn document_id(base_name: &str, timestamp: &NaiveDateTime) -> String {
    format!("{}_{}", base_name, processing_date(timestamp))
}
