//! Object Store Gateway
//!
//! [`DocumentStore`] is the only component that knows where documents live in
//! the bucket and which content type each kind of object carries. Everything
//! above it deals in document identifiers and filenames, never in keys.

use crate::keys::{
    self, DOCUMENT_NAMESPACES, MARKDOWN_CONTENT_TYPE, MARKDOWN_NAMESPACE, PDF_CONTENT_TYPE,
    PDF_NAMESPACE,
};
use crate::traits::{ObjectStream, Storage, StorageError, StorageResult, StoredObject};
use bytes::Bytes;
use std::sync::Arc;

/// Document-level view over a [`Storage`] backend.
///
/// Cheap to clone; clones share the same backend handle.
#[derive(Clone)]
pub struct DocumentStore {
    storage: Arc<dyn Storage>,
    list_page_size: usize,
}

impl DocumentStore {
    /// `list_page_size` bounds every listing call (see [`Storage::list`]).
    pub fn new(storage: Arc<dyn Storage>, list_page_size: usize) -> Self {
        Self {
            storage,
            list_page_size,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Create the namespace's marker object unless it already exists.
    ///
    /// Safe to call repeatedly. Two concurrent callers may both write the
    /// marker; the second write replaces an identical empty object.
    pub async fn ensure_namespace_exists(&self, namespace: &str) -> StorageResult<()> {
        let marker = keys::marker_key(namespace);
        if self.storage.exists(&marker).await? {
            return Ok(());
        }

        tracing::debug!(namespace = %namespace, marker = %marker, "Creating namespace marker");
        self.storage.put(&marker, Bytes::new(), None).await?;
        Ok(())
    }

    /// Store an original PDF and return its URL.
    ///
    /// Writes `documents/pdf/{document_id}_{original_filename}`, replacing any
    /// object already at that key.
    pub async fn put_pdf(
        &self,
        data: Bytes,
        original_filename: &str,
        document_id: &str,
    ) -> StorageResult<String> {
        self.ensure_namespace_exists(PDF_NAMESPACE).await?;
        let key = keys::pdf_key(document_id, original_filename);
        self.storage.put(&key, data, Some(PDF_CONTENT_TYPE)).await
    }

    /// Store extracted text (UTF-8) and return its URL.
    ///
    /// Writes `documents/markdown/{document_id}_{base_name}.md`.
    pub async fn put_markdown(
        &self,
        text: &str,
        document_id: &str,
        base_name: &str,
    ) -> StorageResult<String> {
        self.ensure_namespace_exists(MARKDOWN_NAMESPACE).await?;
        let key = keys::markdown_key(document_id, base_name);
        let data = Bytes::copy_from_slice(text.as_bytes());
        self.storage.put(&key, data, Some(MARKDOWN_CONTENT_TYPE)).await
    }

    /// Keys under both document namespaces, PDF namespace first.
    ///
    /// One listing call per namespace; each is capped at one page.
    pub async fn list_documents(&self) -> StorageResult<Vec<String>> {
        let mut document_keys = Vec::new();
        for namespace in DOCUMENT_NAMESPACES {
            let keys = self
                .storage
                .list(Some(namespace), self.list_page_size)
                .await?;
            document_keys.extend(keys);
        }
        Ok(document_keys)
    }

    /// Every key in the bucket, from a single listing call.
    pub async fn list_all(&self) -> StorageResult<Vec<String>> {
        self.storage.list(None, self.list_page_size).await
    }

    /// Store a file at the bucket root under its own name, without extraction.
    ///
    /// Returns `(key, url)`.
    pub async fn put_raw(&self, filename: &str, data: Bytes) -> StorageResult<(String, String)> {
        let key = filename
            .rsplit(['/', '\\'])
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StorageError::InvalidKey(format!("unusable filename: {:?}", filename)))?
            .to_string();

        let url = self
            .storage
            .put(&key, data, keys::content_type_for(&key))
            .await?;
        Ok((key, url))
    }

    /// Open any object in the bucket for streaming.
    pub async fn open(&self, key: &str) -> StorageResult<ObjectStream> {
        self.storage.get_stream(key).await
    }

    /// Read any object in the bucket into memory.
    pub async fn fetch(&self, key: &str) -> StorageResult<StoredObject> {
        self.storage.get(key).await
    }
}
