//! Error types module
//!
//! Every failure that reaches the HTTP boundary becomes an [`AppError`]. Each
//! variant carries a fixed [`Presentation`] (status, code, retry hint, log
//! level), exposed through [`ErrorMetadata`], so the boundary only renders.

/// Severity an error is logged at when it is turned into a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes: bad filename, unknown key.
    Debug,
    /// Bad input that only shows up once processing starts.
    Warn,
    /// Backend or server faults.
    Error,
}

/// How an error is shown to clients and operators.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable upper-case code clients can branch on, e.g. `STORAGE_ERROR`.
    fn error_code(&self) -> &'static str;

    /// True when sending the same request again may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message placed in the response body.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their internal text in production.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request itself is wrong (non-PDF filename, missing `file` field).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The PDF could not be turned into text. The message names the step.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An object-store call failed. The message names the artifact.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Fixed presentation of one [`AppError`] variant.
#[derive(Debug, Clone, Copy)]
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY_LATER: &str = "Retry after a short delay";

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::InvalidInput(_) => Presentation {
                status: 400,
                code: "INVALID_INPUT",
                recoverable: false,
                action: Some("Check the uploaded file and try again"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::Extraction(_) => Presentation {
                status: 500,
                code: "EXTRACTION_ERROR",
                recoverable: false,
                action: Some("Verify the file is a readable, unencrypted PDF"),
                sensitive: false,
                level: LogLevel::Warn,
            },
            AppError::Storage(_) => Presentation {
                status: 500,
                code: "STORAGE_ERROR",
                recoverable: true,
                action: Some(RETRY_LATER),
                sensitive: false,
                level: LogLevel::Error,
            },
            AppError::NotFound(_) => Presentation {
                status: 404,
                code: "NOT_FOUND",
                recoverable: false,
                action: Some("List the bucket to find an existing key"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::PayloadTooLarge(_) => Presentation {
                status: 413,
                code: "PAYLOAD_TOO_LARGE",
                recoverable: false,
                action: Some("Upload a smaller document"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::Internal(_) | AppError::InternalWithSource { .. } => Presentation {
                status: 500,
                code: "INTERNAL_ERROR",
                recoverable: true,
                action: Some(RETRY_LATER),
                sensitive: true,
                level: LogLevel::Error,
            },
        }
    }

    /// Variant name, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Extraction(_) => "Extraction",
            AppError::Storage(_) => "Storage",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }

    /// Display text plus the whole source chain.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Extraction(msg)
            | AppError::Storage(msg)
            | AppError::NotFound(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }
}
