//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Storage and ingestion errors are
//! mapped onto [`AppError`] here; the response status and body come from its
//! [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docvault_core::{AppError, ErrorMetadata, LogLevel};
use docvault_processing::IngestError;
use docvault_storage::StorageError;
use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Full error text; omitted in production for sensitive errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub code: String,
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// [`AppError`] as an axum response.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Same rule as `Config::is_production`, read where no config is at hand.
fn running_in_production() -> bool {
    ["ENVIRONMENT", "APP_ENV"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .map(|env| matches!(env.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_type = err.error_type();
        match err.log_level() {
            LogLevel::Debug => tracing::debug!(error = %err, error_type, "Request failed"),
            LogLevel::Warn => tracing::warn!(error = %err, error_type, "Request failed"),
            LogLevel::Error => tracing::error!(error = %err, error_type, "Request failed"),
        }

        let show_details = !(err.is_sensitive() && running_in_production());
        let body = ErrorResponse {
            error: err.client_message(),
            details: show_details.then(|| err.detailed_message()),
            error_type: show_details.then(|| error_type.to_string()),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("No object at key {}", key)),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other @ (StorageError::UploadFailed(_)
            | StorageError::DownloadFailed(_)
            | StorageError::ListFailed(_)
            | StorageError::BackendError(_)) => AppError::Storage(other.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<IngestError> for HttpAppError {
    fn from(err: IngestError) -> Self {
        let message = err.to_string();
        let app = match err {
            IngestError::Validation(_) => AppError::InvalidInput(message),
            IngestError::Extraction(_) => AppError::Extraction(message),
            IngestError::PdfUpload(_) | IngestError::MarkdownUpload(_) => {
                AppError::Storage(message)
            }
        };
        HttpAppError(app)
    }
}
