use crate::object::ObjectBackend;
use crate::s3::object_url;
use crate::traits::{ObjectStream, Storage, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use std::sync::Arc;

/// In-process storage backed by object_store's `InMemory` store.
///
/// Objects live as long as the value (and its clones) do. URLs use the same
/// virtual-hosted S3 shape as [`S3Storage`](crate::S3Storage) so responses look
/// identical across backends.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    backend: ObjectBackend,
    region: String,
}

impl MemoryStorage {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            backend: ObjectBackend::new(Arc::new(InMemory::new()), bucket.into()),
            region: region.into(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("docvault-local", "local")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<String> {
        self.backend.put(storage_key, data, content_type).await?;
        Ok(self.url_for(storage_key))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.backend.exists(storage_key).await
    }

    async fn get(&self, storage_key: &str) -> StorageResult<StoredObject> {
        self.backend.get(storage_key).await
    }

    async fn get_stream(&self, storage_key: &str) -> StorageResult<ObjectStream> {
        self.backend.get_stream(storage_key).await
    }

    async fn list(&self, prefix: Option<&str>, max_keys: usize) -> StorageResult<Vec<String>> {
        self.backend.list(prefix, max_keys).await
    }

    fn url_for(&self, storage_key: &str) -> String {
        object_url(self.backend.bucket(), &self.region, None, storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
