//! HTTP client for the Docvault API.

use anyhow::{Context, Result};
use bytes::Bytes;
use docvault_core::{DocumentRecord, ObjectListing, RawUploadResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::{Component, Path};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: DOCVAULT_API_URL, falling back to localhost.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("DOCVAULT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every key in the bucket, as one listing page.
    pub async fn list(&self) -> Result<ObjectListing> {
        self.get_json("/documents").await
    }

    /// Keys under the PDF namespace followed by the Markdown namespace.
    pub async fn list_namespaced(&self) -> Result<ObjectListing> {
        self.get_json("/documents/namespaced").await
    }

    /// Run a PDF through the ingestion pipeline.
    pub async fn ingest(&self, file_path: &Path) -> Result<DocumentRecord> {
        let form = file_form(file_path)?;
        self.post_multipart("/upload_pdf", form).await
    }

    /// Store a file as-is at the bucket root.
    pub async fn upload(&self, file_path: &Path) -> Result<RawUploadResponse> {
        let form = file_form(file_path)?;
        self.post_multipart("/documents", form).await
    }

    pub async fn download(&self, key: &str) -> Result<Bytes> {
        let url = self.build_url(&format!("/documents/file/{}", encode_key(key)));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;
        let response = ensure_success(response).await?;

        response
            .bytes()
            .await
            .context("Failed to read response body")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(anyhow::anyhow!(
        "API request failed with status {}: {}",
        status,
        error_text
    ))
}

/// Reject paths that climb out of the working tree.
pub fn check_path(path: &Path) -> Result<()> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(anyhow::anyhow!("Invalid path: {}", path.display()));
    }
    Ok(())
}

fn file_form(file_path: &Path) -> Result<reqwest::multipart::Form> {
    check_path(file_path)?;
    let buffer = std::fs::read(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("File has no usable name: {}", file_path.display()))?;

    Ok(reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(buffer).file_name(filename.to_string()),
    ))
}

/// Percent-encode each key segment, keeping the `/` separators.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
