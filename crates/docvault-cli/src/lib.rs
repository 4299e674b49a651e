//! Docvault viewer client: browse, upload and download stored documents
//! through the HTTP API.

pub mod client;

pub use client::{check_path, ApiClient, DEFAULT_API_URL};

use std::path::PathBuf;

/// Where `download` writes when no output path is given: the key's last segment.
pub fn default_output_path(key: &str) -> Option<PathBuf> {
    key.rsplit('/')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(PathBuf::from)
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
