use crate::object::ObjectBackend;
use crate::traits::{ObjectStream, Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

/// Amazon S3, or any S3-compatible service reachable at `endpoint_url`.
#[derive(Clone, Debug)]
pub struct S3Storage {
    backend: ObjectBackend,
    region: String,
    endpoint_url: Option<String>,
}

impl S3Storage {
    /// Build the client. No request is sent until the first operation.
    ///
    /// Credentials (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, optional session
    /// token) come from the environment. A plain `http://` endpoint such as a
    /// local MinIO switches on `allow_http`.
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            backend: ObjectBackend::new(Arc::new(store), bucket),
            region,
            endpoint_url,
        })
    }
}

/// Public URL for an object in `bucket`.
///
/// AWS uses the virtual-hosted form `https://{bucket}.s3.{region}.amazonaws.com/{key}`;
/// S3-compatible providers get the path-style form `{endpoint}/{bucket}/{key}`.
pub(crate) fn object_url(
    bucket: &str,
    region: &str,
    endpoint_url: Option<&str>,
    key: &str,
) -> String {
    match endpoint_url {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl Storage for S3Storage {
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
        object_url(
            self.backend.bucket(),
            &self.region,
            self.endpoint_url.as_deref(),
            storage_key,
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_urls_are_virtual_hosted() {
        assert_eq!(
            object_url("docs", "us-east-1", None, "documents/pdf/a_1_a.pdf"),
            "https://docs.s3.us-east-1.amazonaws.com/documents/pdf/a_1_a.pdf"
        );
    }

    #[test]
    fn custom_endpoint_urls_are_path_style() {
        assert_eq!(
            object_url("docs", "local", Some("http://localhost:9000/"), "a.md"),
            "http://localhost:9000/docs/a.md"
        );
    }

    #[test]
    fn builds_client_without_contacting_s3() {
        let storage = S3Storage::new(
            "docs".to_string(),
            "eu-west-1".to_string(),
            Some("http://localhost:9000".to_string()),
        )
        .expect("builder should accept explicit settings");
        assert_eq!(storage.backend_type(), StorageBackend::S3);
        assert_eq!(storage.url_for("k"), "http://localhost:9000/docs/k");
    }
}
