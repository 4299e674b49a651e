//! Storage doubles.

use async_trait::async_trait;
use bytes::Bytes;
use docvault_storage::{
    MemoryStorage, ObjectStream, Storage, StorageBackend, StorageError, StorageResult,
    StoredObject,
};

/// In-memory storage whose writes fail for keys under `fail_prefix`.
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_prefix: &'static str,
}

impl FailingStorage {
    pub fn new(fail_prefix: &'static str) -> Self {
        Self {
            inner: MemoryStorage::new(super::TEST_BUCKET, super::TEST_REGION),
            fail_prefix,
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<String> {
        if storage_key.starts_with(self.fail_prefix) {
            return Err(StorageError::UploadFailed(
                "service unavailable (simulated)".to_string(),
            ));
        }
        self.inner.put(storage_key, data, content_type).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    async fn get(&self, storage_key: &str) -> StorageResult<StoredObject> {
        self.inner.get(storage_key).await
    }

    async fn get_stream(&self, storage_key: &str) -> StorageResult<ObjectStream> {
        self.inner.get_stream(storage_key).await
    }

    async fn list(&self, prefix: Option<&str>, max_keys: usize) -> StorageResult<Vec<String>> {
        self.inner.list(prefix, max_keys).await
    }

    fn url_for(&self, storage_key: &str) -> String {
        self.inner.url_for(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
