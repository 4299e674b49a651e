//! Key-level object storage.
//!
//! [`Storage`] moves bytes in and out of one bucket. The S3 and in-memory
//! backends implement it; tests wrap it to inject failures.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Failures from a storage backend, tagged by the operation that hit them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A fully buffered object and the content type it was written with.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A streaming object body.
pub struct ObjectStream {
    pub content_type: Option<String>,
    pub size: u64,
    pub body: Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>,
}

/// One bucket, addressed by raw keys.
///
/// The document naming scheme lives one level up in
/// [`DocumentStore`](crate::DocumentStore); implementations only move bytes.
/// No operation retries: failures surface as [`StorageError`] on the first attempt.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key`, replacing any existing object, and
    /// return the object's public URL.
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<String>;

    /// Check if an object exists. A missing key is `Ok(false)`, not an error.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Download a whole object into memory.
    async fn get(&self, storage_key: &str) -> StorageResult<StoredObject>;

    /// Download an object as a stream of chunks.
    async fn get_stream(&self, storage_key: &str) -> StorageResult<ObjectStream>;

    /// List keys under `prefix` (the whole bucket when `None`).
    ///
    /// Returns at most `max_keys` keys: one listing page. Callers wanting more
    /// must page explicitly; nothing here follows continuation tokens.
    async fn list(&self, prefix: Option<&str>, max_keys: usize) -> StorageResult<Vec<String>>;

    /// Public URL of an object, whether or not it exists.
    fn url_for(&self, storage_key: &str) -> String;

    /// Which backend this is, for startup logs.
    fn backend_type(&self) -> StorageBackend;
}
