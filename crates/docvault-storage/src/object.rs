//! Operations shared by every object_store backed [`Storage`](crate::Storage).

use crate::traits::{ObjectStream, StorageError, StorageResult, StoredObject};
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, GetOptions, ObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;
use std::time::Instant;

/// A bucket reached through an object_store client.
#[derive(Clone, Debug)]
pub(crate) struct ObjectBackend {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

/// Parse a bucket key into an object_store path.
///
/// Keys must not contain empty segments, `.`/`..` segments or control characters.
pub(crate) fn parse_key(storage_key: &str) -> StorageResult<Path> {
    Path::parse(storage_key)
        .map_err(|e| StorageError::InvalidKey(format!("{}: {}", storage_key, e)))
}

impl ObjectBackend {
    pub(crate) fn new(store: Arc<dyn ObjectStore>, bucket: String) -> Self {
        Self { store, bucket }
    }

    pub(crate) fn bucket(&self) -> &str {
        &self.bucket
    }

    pub(crate) async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let location = parse_key(storage_key)?;
        let size = data.len() as u64;
        let start = Instant::now();

        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.to_string()),
            );
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&location, PutPayload::from(data), options)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            content_type = content_type.unwrap_or("-"),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(())
    }

    pub(crate) async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = parse_key(storage_key)?;
        let options = GetOptions {
            head: true,
            ..Default::default()
        };

        match self.store.get_opts(&location, options).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    pub(crate) async fn get(&self, storage_key: &str) -> StorageResult<StoredObject> {
        let start = Instant::now();
        let location = parse_key(storage_key)?;

        let result = self
            .store
            .get_opts(&location, GetOptions::default())
            .await
            .map_err(|e| self.download_error(storage_key, e, start))?;

        let content_type = content_type_of(&result.attributes);
        let data = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = data.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object download successful"
        );

        Ok(StoredObject {
            key: storage_key.to_string(),
            content_type,
            data,
        })
    }

    pub(crate) async fn get_stream(&self, storage_key: &str) -> StorageResult<ObjectStream> {
        let start = Instant::now();
        let location = parse_key(storage_key)?;

        let result = self
            .store
            .get_opts(&location, GetOptions::default())
            .await
            .map_err(|e| self.download_error(storage_key, e, start))?;

        let content_type = content_type_of(&result.attributes);
        let size = result.meta.size;
        let bucket = self.bucket.clone();
        let key = storage_key.to_string();

        let body = result.into_stream().map(move |res| {
            res.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object stream download error"
                );
                StorageError::DownloadFailed(e.to_string())
            })
        });

        Ok(ObjectStream {
            content_type,
            size,
            body: Box::pin(body),
        })
    }

    pub(crate) async fn list(
        &self,
        prefix: Option<&str>,
        max_keys: usize,
    ) -> StorageResult<Vec<String>> {
        let start = Instant::now();
        let prefix_path = match prefix.map(|p| p.trim_end_matches('/')) {
            Some(p) if !p.is_empty() => Some(parse_key(p)?),
            _ => None,
        };

        let metas: Vec<_> = self
            .store
            .list(prefix_path.as_ref())
            .take(max_keys)
            .try_collect()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    prefix = prefix.unwrap_or(""),
                    "Object listing failed"
                );
                StorageError::ListFailed(e.to_string())
            })?;

        let keys: Vec<String> = metas
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();

        tracing::debug!(
            bucket = %self.bucket,
            prefix = prefix.unwrap_or(""),
            count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object listing successful"
        );

        Ok(keys)
    }

    fn download_error(
        &self,
        storage_key: &str,
        error: ObjectStoreError,
        start: Instant,
    ) -> StorageError {
        match error {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        }
    }
}

fn content_type_of(attributes: &Attributes) -> Option<String> {
    attributes
        .get(&Attribute::ContentType)
        .map(|value| value.to_string())
}
