/// Filename validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File must be a PDF")]
    NotPdf { filename: String },
}

/// Accept a filename only when it ends in `.pdf`, in any letter case.
///
/// The extension is the only gate; the bytes are not sniffed.
pub fn validate_pdf_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(ValidationError::NotPdf {
            filename: filename.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_extension_in_any_case() {
        for name in ["report.pdf", "REPORT.PDF", "scan.Pdf", "a.b.pdf"] {
            assert!(validate_pdf_filename(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["report.txt", "report.pdf.exe", "report", "pdf", "report.pd f", ""] {
            let err = validate_pdf_filename(name).unwrap_err();
            assert_eq!(err.to_string(), "File must be a PDF");
        }
    }
}
