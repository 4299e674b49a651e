//! Docvault Core Library
//!
//! This crate provides the configuration, error types and shared models used by
//! every Docvault component: the storage gateway, the ingestion pipeline, the
//! HTTP API and the viewer CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DocumentRecord, ObjectListing, RawUploadResponse};
pub use storage_types::StorageBackend;
