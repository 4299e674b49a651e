//! Ingestion pipeline
//!
//! One upload moves through `validate -> extract -> name -> store PDF -> store
//! Markdown` and either yields a [`DocumentRecord`] or stops at the first
//! failing step. Nothing is retried. A failed Markdown write leaves the PDF in
//! place; there is no compensating delete.

use crate::document::{ExtractionError, TextExtractor};
use crate::identifier::{base_name, document_id, processing_date};
use crate::validator::{validate_pdf_filename, ValidationError};
use bytes::Bytes;
use chrono::{Local, NaiveDateTime};
use docvault_core::DocumentRecord;
use docvault_storage::{DocumentStore, StorageError};
use std::sync::Arc;
use std::time::Instant;

/// Step at which an ingestion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Validate,
    Extract,
    StorePdf,
    StoreMarkdown,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to process PDF: {0}")]
    Extraction(#[source] ExtractionError),

    #[error("Failed to upload PDF to S3: {0}")]
    PdfUpload(#[source] StorageError),

    #[error("Failed to upload Markdown to S3: {0}")]
    MarkdownUpload(#[source] StorageError),
}

impl IngestError {
    pub fn stage(&self) -> IngestStage {
        match self {
            IngestError::Validation(_) => IngestStage::Validate,
            IngestError::Extraction(_) => IngestStage::Extract,
            IngestError::PdfUpload(_) => IngestStage::StorePdf,
            IngestError::MarkdownUpload(_) => IngestStage::StoreMarkdown,
        }
    }
}

/// Turns uploaded PDFs into stored PDF + Markdown object pairs.
///
/// Holds no per-request state; clone it freely and call it concurrently.
#[derive(Clone)]
pub struct IngestionPipeline {
    extractor: Arc<dyn TextExtractor>,
    store: DocumentStore,
}

impl IngestionPipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, store: DocumentStore) -> Self {
        Self { extractor, store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Ingest one upload, stamping it with the local wall clock once the text
    /// has been extracted.
    pub async fn ingest(&self, filename: &str, data: Bytes) -> Result<DocumentRecord, IngestError> {
        self.run(filename, data, || Local::now().naive_local()).await
    }

    /// Ingest one upload with a fixed processing timestamp.
    pub async fn ingest_at(
        &self,
        filename: &str,
        data: Bytes,
        timestamp: NaiveDateTime,
    ) -> Result<DocumentRecord, IngestError> {
        self.run(filename, data, move || timestamp).await
    }

    async fn run<F>(&self, filename: &str, data: Bytes, clock: F) -> Result<DocumentRecord, IngestError>
    where
        F: FnOnce() -> NaiveDateTime + Send,
    {
        let start = Instant::now();

        validate_pdf_filename(filename).inspect_err(|e| {
            tracing::debug!(filename = %filename, error = %e, "Rejected upload");
        })?;

        let size = data.len();
        let pdf = data.clone();
        let text = self
            .extractor
            .extract(data)
            .await
            .map_err(IngestError::Extraction)?;

        let timestamp = clock();
        let base = base_name(filename);
        let id = document_id(base, &timestamp);

        let pdf_url = self
            .store
            .put_pdf(pdf, filename, &id)
            .await
            .map_err(IngestError::PdfUpload)?;

        let markdown_url = self
            .store
            .put_markdown(&text, &id, base)
            .await
            .map_err(|e| {
                tracing::warn!(
                    document_id = %id,
                    pdf_url = %pdf_url,
                    "Markdown upload failed; PDF stays stored without extracted text"
                );
                IngestError::MarkdownUpload(e)
            })?;

        tracing::info!(
            document_id = %id,
            filename = %filename,
            size_bytes = size,
            text_len = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document ingested"
        );

        Ok(DocumentRecord {
            document_id: id,
            original_filename: filename.to_string(),
            pdf_url,
            markdown_url,
            processing_date: processing_date(&timestamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PdfTextExtractor;
    use crate::test_fixtures::{blank_pdf, password_protected_pdf, pdf_with_pages};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use docvault_storage::{
        MemoryStorage, ObjectStream, Storage, StorageBackend, StorageResult, StoredObject,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Rejects writes whose key starts with `fail_prefix`.
    struct FailingStorage {
        inner: MemoryStorage,
        fail_prefix: &'static str,
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
                return Err(StorageError::UploadFailed("bucket unavailable".to_string()));
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

    /// Returns fixed text and counts calls.
    #[derive(Default)]
    struct CountingExtractor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextExtractor for CountingExtractor {
        async fn extract(&self, _data: Bytes) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("stub text".to_string())
        }
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn pdf_pipeline() -> IngestionPipeline {
        let store = DocumentStore::new(Arc::new(MemoryStorage::new("docs", "us-east-1")), 1000);
        IngestionPipeline::new(Arc::new(PdfTextExtractor::new()), store)
    }

    fn failing_pipeline(fail_prefix: &'static str) -> IngestionPipeline {
        let storage = FailingStorage {
            inner: MemoryStorage::new("docs", "us-east-1"),
            fail_prefix,
        };
        let store = DocumentStore::new(Arc::new(storage), 1000);
        IngestionPipeline::new(Arc::new(PdfTextExtractor::new()), store)
    }

    async fn document_keys(pipeline: &IngestionPipeline) -> Vec<String> {
        pipeline
            .store()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|k| !k.ends_with("/.keep"))
            .collect()
    }

    #[tokio::test]
    async fn ingests_pdf_into_two_objects() {
        let pipeline = pdf_pipeline();
        let pdf = pdf_with_pages(&["Alpha", "Beta"]);

        let record = pipeline
            .ingest_at("report.pdf", pdf.clone(), fixed_time())
            .await
            .unwrap();

        assert_eq!(record.document_id, "report_20240102_030405");
        assert_eq!(record.original_filename, "report.pdf");
        assert_eq!(record.processing_date, "20240102_030405");
        assert_eq!(
            record.pdf_url,
            "https://docs.s3.us-east-1.amazonaws.com/documents/pdf/report_20240102_030405_report.pdf"
        );
        assert_eq!(
            record.markdown_url,
            "https://docs.s3.us-east-1.amazonaws.com/documents/markdown/report_20240102_030405_report.md"
        );

        let stored_pdf = pipeline
            .store()
            .fetch("documents/pdf/report_20240102_030405_report.pdf")
            .await
            .unwrap();
        assert_eq!(stored_pdf.data, pdf);
        assert_eq!(stored_pdf.content_type.as_deref(), Some("application/pdf"));

        let markdown = pipeline
            .store()
            .fetch("documents/markdown/report_20240102_030405_report.md")
            .await
            .unwrap();
        assert_eq!(markdown.content_type.as_deref(), Some("text/markdown"));
        let text = std::str::from_utf8(&markdown.data).unwrap();
        let alpha = text.find("Alpha").expect("page one text");
        let beta = text.find("Beta").expect("page two text");
        assert!(alpha < beta);
    }

    #[tokio::test]
    async fn non_pdf_name_is_rejected_before_extraction() {
        let extractor = Arc::new(CountingExtractor::default());
        let store = DocumentStore::new(Arc::new(MemoryStorage::default()), 1000);
        let pipeline = IngestionPipeline::new(extractor.clone(), store);

        for name in ["notes.txt", "report.pdf.zip", "README"] {
            let err = pipeline
                .ingest(name, pdf_with_pages(&["Alpha"]))
                .await
                .unwrap_err();
            assert_eq!(err.stage(), IngestStage::Validate);
            assert_eq!(err.to_string(), "File must be a PDF");
        }

        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn uppercase_extension_is_accepted() {
        let extractor = Arc::new(CountingExtractor::default());
        let store = DocumentStore::new(Arc::new(MemoryStorage::default()), 1000);
        let pipeline = IngestionPipeline::new(extractor.clone(), store);

        let record = pipeline
            .ingest_at("SCAN.PDF", Bytes::from_static(b"bytes"), fixed_time())
            .await
            .unwrap();
        assert_eq!(record.document_id, "SCAN_20240102_030405");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn corrupt_pdf_stores_nothing() {
        let pipeline = pdf_pipeline();
        let err = pipeline
            .ingest("broken.pdf", Bytes::from_static(b"%PDF-1.7\ngarbage without xref"))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), IngestStage::Extract);
        assert!(err.to_string().starts_with("Failed to process PDF: "));
        assert!(pipeline.store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn password_protected_pdf_stores_nothing() {
        let pipeline = pdf_pipeline();
        let err = pipeline
            .ingest("locked.pdf", password_protected_pdf())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), IngestStage::Extract);
        assert!(pipeline.store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn directory_in_filename_stays_out_of_identifier() {
        let pipeline = pdf_pipeline();
        let record = pipeline
            .ingest_at("scans/report.pdf", pdf_with_pages(&["Alpha"]), fixed_time())
            .await
            .unwrap();

        assert_eq!(record.document_id, "report_20240102_030405");
        assert_eq!(record.original_filename, "scans/report.pdf");
        let mut keys: Vec<String> = pipeline
            .store()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|k| !k.ends_with("/.keep"))
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "documents/markdown/report_20240102_030405_report.md",
                "documents/pdf/report_20240102_030405_scans/report.pdf",
            ]
        );
    }

    #[tokio::test]
    async fn blank_pdf_stores_empty_markdown() {
        let pipeline = pdf_pipeline();
        let record = pipeline
            .ingest_at("blank.pdf", blank_pdf(), fixed_time())
            .await
            .unwrap();

        let markdown = pipeline
            .store()
            .fetch(&format!("documents/markdown/{}_blank.md", record.document_id))
            .await
            .unwrap();
        assert!(std::str::from_utf8(&markdown.data).unwrap().trim().is_empty());
    }

    #[tokio::test]
    async fn pdf_upload_failure_skips_markdown() {
        let pipeline = failing_pipeline("documents/pdf/");
        let err = pipeline
            .ingest("report.pdf", pdf_with_pages(&["Alpha"]))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), IngestStage::StorePdf);
        assert!(err.to_string().starts_with("Failed to upload PDF to S3: "));
        assert!(err.to_string().contains("bucket unavailable"));
        assert!(document_keys(&pipeline).await.is_empty());
    }

    #[tokio::test]
    async fn markdown_failure_leaves_pdf_in_place() {
        let pipeline = failing_pipeline("documents/markdown/");
        let err = pipeline
            .ingest_at("report.pdf", pdf_with_pages(&["Alpha"]), fixed_time())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), IngestStage::StoreMarkdown);
        assert!(err.to_string().starts_with("Failed to upload Markdown to S3: "));
        assert_eq!(
            document_keys(&pipeline).await,
            vec!["documents/pdf/report_20240102_030405_report.pdf"]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_ingestions_stay_separate() {
        let pipeline = pdf_pipeline();
        let names: Vec<String> = (0..8).map(|i| format!("Doc{}", i)).collect();

        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let pipeline = pipeline.clone();
                let filename = format!("{}.pdf", name);
                let pdf = pdf_with_pages(&[name.as_str()]);
                tokio::spawn(async move { pipeline.ingest_at(&filename, pdf, fixed_time()).await })
            })
            .collect();

        for handle in futures::future::join_all(handles).await {
            handle.unwrap().unwrap();
        }

        assert_eq!(document_keys(&pipeline).await.len(), names.len() * 2);
        for name in &names {
            let markdown = pipeline
                .store()
                .fetch(&format!("documents/markdown/{}_20240102_030405_{}.md", name, name))
                .await
                .unwrap();
            let text = std::str::from_utf8(&markdown.data).unwrap();
            assert!(text.contains(name.as_str()));
            assert!(pipeline
                .store()
                .storage()
                .exists(&format!("documents/pdf/{}_20240102_030405_{}.pdf", name, name))
                .await
                .unwrap());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn same_second_same_name_last_write_wins() {
        let pipeline = pdf_pipeline();
        let first = pdf_with_pages(&["First"]);
        let second = pdf_with_pages(&["Second"]);

        let (a, b) = tokio::join!(
            pipeline.ingest_at("dup.pdf", first.clone(), fixed_time()),
            pipeline.ingest_at("dup.pdf", second.clone(), fixed_time()),
        );
        assert_eq!(a.unwrap().document_id, b.unwrap().document_id);

        let keys = document_keys(&pipeline).await;
        assert_eq!(keys.len(), 2);

        let stored = pipeline
            .store()
            .fetch("documents/pdf/dup_20240102_030405_dup.pdf")
            .await
            .unwrap();
        assert!(stored.data == first || stored.data == second);
    }
}
