//! Test helpers: build AppState and router over in-memory storage.
//!
//! Run from workspace root: `cargo test -p docvault-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use docvault_api::setup::routes;
use docvault_api::AppState;
use docvault_core::Config;
use docvault_storage::{MemoryStorage, Storage};
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_BUCKET: &str = "docvault-test";
pub const TEST_REGION: &str = "us-east-1";

/// Test application: server plus the storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Config for the memory backend, with optional overrides.
pub fn create_test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("STORAGE_BACKEND", "memory"),
        ("S3_BUCKET_NAME", TEST_BUCKET),
        ("AWS_REGION", TEST_REGION),
        ("MAX_DOCUMENT_SIZE_MB", "5"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// App over an empty in-memory bucket.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(
        create_test_config(&[]),
        Arc::new(MemoryStorage::new(TEST_BUCKET, TEST_REGION)),
    )
}

/// App over caller-provided storage.
pub fn setup_test_app_with(config: Config, storage: Arc<dyn Storage>) -> TestApp {
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");
    TestApp { server, storage }
}

/// Multipart form with a single `file` field.
pub fn file_form(filename: &str, data: Vec<u8>, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data).file_name(filename).mime_type(mime_type),
    )
}

/// Object URL in the test bucket.
pub fn object_url(key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", TEST_BUCKET, TEST_REGION, key)
}
