//! Configuration module
//!
//! Configuration is read once from the process environment at startup (a `.env`
//! file is loaded first when present). A missing or malformed value is a
//! startup error; nothing here is consulted again per request.

use std::env;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8000;
const MAX_DOCUMENT_SIZE_MB: usize = 50;
/// Matches the page size of a single S3 ListObjectsV2 call.
const LIST_PAGE_SIZE: usize = 1000;

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_document_size_bytes: usize,
}

/// Object storage settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    pub list_page_size: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = non_empty("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let max_document_size_mb = match non_empty("MAX_DOCUMENT_SIZE_MB") {
            Some(size) => size
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_DOCUMENT_SIZE_MB must be a valid number"))?,
            None => MAX_DOCUMENT_SIZE_MB,
        };

        let max_document_size_bytes = max_document_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_DOCUMENT_SIZE_MB is too large"))?;

        let backend = match non_empty("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::S3,
        };

        let list_page_size = match non_empty("LIST_PAGE_SIZE") {
            Some(size) => size
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("LIST_PAGE_SIZE must be a valid number"))?,
            None => LIST_PAGE_SIZE,
        };

        Ok(Config {
            base: BaseConfig {
                server_port,
                cors_origins,
                environment,
                max_document_size_bytes,
            },
            storage: StorageConfig {
                backend,
                bucket: non_empty("S3_BUCKET_NAME").or_else(|| non_empty("S3_BUCKET")),
                region: non_empty("AWS_REGION").or_else(|| non_empty("S3_REGION")),
                endpoint: non_empty("S3_ENDPOINT"),
                list_page_size,
            },
        })
    }

    /// Reject configurations that cannot serve requests.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if self.base.max_document_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_DOCUMENT_SIZE_MB cannot be 0"));
        }

        if self.storage.list_page_size == 0 {
            return Err(anyhow::anyhow!("LIST_PAGE_SIZE cannot be 0"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET_NAME must be set when using the S3 storage backend"
                ));
            }
            if self.storage.region.is_none() {
                return Err(anyhow::anyhow!(
                    "AWS_REGION must be set when using the S3 storage backend"
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_document_size_bytes(&self) -> usize {
        self.base.max_document_size_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.storage.bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.storage.region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.endpoint.as_deref()
    }

    pub fn list_page_size(&self) -> usize {
        self.storage.list_page_size
    }
}
