//! Application state shared by every handler.

use docvault_core::Config;
use docvault_processing::{IngestionPipeline, PdfTextExtractor, TextExtractor};
use docvault_storage::{DocumentStore, Storage};
use std::sync::Arc;

/// Process-wide handles, built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
    pub pipeline: IngestionPipeline,
}

impl AppState {
    /// State over `storage` with the `pdf-extract` backed extractor.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self::with_extractor(config, storage, Arc::new(PdfTextExtractor::new()))
    }

    pub fn with_extractor(
        config: Config,
        storage: Arc<dyn Storage>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let store = DocumentStore::new(storage, config.list_page_size());
        let pipeline = IngestionPipeline::new(extractor, store.clone());
        Self {
            config,
            store,
            pipeline,
        }
    }
}
