//! Storage setup and initialization

use anyhow::{Context, Result};
use docvault_core::Config;
use docvault_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the process-wide storage handle.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.s3_bucket().unwrap_or("-"),
        region = config.s3_region().unwrap_or("-"),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
