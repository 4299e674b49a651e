use crate::{MemoryStorage, S3Storage, Storage, StorageBackend, StorageError, StorageResult};
use docvault_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::S3 => {
            let bucket = config.s3_bucket().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_BUCKET_NAME not configured".to_string())
            })?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AWS_REGION or S3_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint)?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Memory => {
            let storage = match (config.s3_bucket(), config.s3_region()) {
                (Some(bucket), Some(region)) => MemoryStorage::new(bucket, region),
                (Some(bucket), None) => MemoryStorage::new(bucket, "local"),
                _ => MemoryStorage::default(),
            };
            tracing::warn!("Using in-memory storage; stored documents are lost on restart");
            Ok(Arc::new(storage))
        }
    }
}
