//! Browse/retrieve endpoint integration tests.
//!
//! Run with: `cargo test -p docvault-api --test browse_test`

mod helpers;

use axum::http::StatusCode;
use bytes::Bytes;
use docvault_core::{DocumentRecord, ObjectListing, RawUploadResponse};
use docvault_storage::{MemoryStorage, Storage};
use helpers::fixtures::create_test_pdf;
use helpers::{create_test_config, file_form, object_url, setup_test_app, setup_test_app_with};
use std::sync::Arc;

#[tokio::test]
async fn test_list_empty_bucket() {
    let app = setup_test_app();

    let response = app.client().get("/documents").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let listing: ObjectListing = response.json();
    assert!(listing.keys.is_empty());
}

#[tokio::test]
async fn test_list_covers_whole_bucket() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/upload_pdf")
        .multipart(file_form(
            "report.pdf",
            create_test_pdf(&["Alpha"]),
            "application/pdf",
        ))
        .await;
    let record: DocumentRecord = response.json();

    let response = app
        .client()
        .post("/documents")
        .multipart(file_form("notes.txt", b"loose".to_vec(), "text/plain"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listing: ObjectListing = app.client().get("/documents").await.json();
    assert!(listing.keys.contains(&"notes.txt".to_string()));
    assert!(listing
        .keys
        .contains(&format!("documents/pdf/{}_report.pdf", record.document_id)));
    assert!(listing
        .keys
        .contains(&format!("documents/markdown/{}_report.md", record.document_id)));
}

#[tokio::test]
async fn test_namespaced_listing_puts_pdfs_first() {
    let app = setup_test_app();

    for name in ["a.pdf", "b.pdf"] {
        let response = app
            .client()
            .post("/upload_pdf")
            .multipart(file_form(name, create_test_pdf(&[name]), "application/pdf"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    app.client()
        .post("/documents")
        .multipart(file_form("loose.txt", b"x".to_vec(), "text/plain"))
        .await;

    let listing: ObjectListing = app.client().get("/documents/namespaced").await.json();
    let first_markdown = listing
        .keys
        .iter()
        .position(|k| k.starts_with("documents/markdown/"))
        .expect("markdown keys listed");
    assert!(listing.keys[..first_markdown]
        .iter()
        .all(|k| k.starts_with("documents/pdf/")));
    assert!(listing.keys[first_markdown..]
        .iter()
        .all(|k| k.starts_with("documents/markdown/")));
    assert!(!listing.keys.contains(&"loose.txt".to_string()));
    // two documents plus one marker per namespace
    assert_eq!(listing.keys.len(), 6);
}

#[tokio::test]
async fn test_listing_is_single_page() {
    let app = setup_test_app_with(
        create_test_config(&[("LIST_PAGE_SIZE", "2")]),
        Arc::new(MemoryStorage::new(helpers::TEST_BUCKET, helpers::TEST_REGION)),
    );

    for i in 0..4 {
        app.client()
            .post("/documents")
            .multipart(file_form(&format!("file{}.txt", i), b"x".to_vec(), "text/plain"))
            .await;
    }

    let listing: ObjectListing = app.client().get("/documents").await.json();
    assert_eq!(listing.keys.len(), 2);
}

#[tokio::test]
async fn test_raw_upload_skips_extraction() {
    let app = setup_test_app();

    // Not a parseable PDF; raw upload stores it anyway.
    let response = app
        .client()
        .post("/documents")
        .multipart(file_form("draft.pdf", b"not a pdf".to_vec(), "application/pdf"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let uploaded: RawUploadResponse = response.json();
    assert_eq!(uploaded.key, "draft.pdf");
    assert_eq!(uploaded.url, object_url("draft.pdf"));

    let object = app.storage.get("draft.pdf").await.expect("stored");
    assert_eq!(object.data, Bytes::from_static(b"not a pdf"));
    assert_eq!(object.content_type.as_deref(), Some("application/pdf"));
}

#[tokio::test]
async fn test_download_streams_object_with_headers() {
    let app = setup_test_app();

    let pdf = create_test_pdf(&["Alpha"]);
    let record: DocumentRecord = app
        .client()
        .post("/upload_pdf")
        .multipart(file_form("report.pdf", pdf.clone(), "application/pdf"))
        .await
        .json();

    let key = format!("documents/pdf/{}_report.pdf", record.document_id);
    let response = app.client().get(&format!("/documents/file/{}", key)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(response.header("content-length"), pdf.len().to_string().as_str());
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains(&format!("{}_report.pdf", record.document_id)));
    assert_eq!(response.as_bytes().as_ref(), pdf.as_slice());

    let markdown_key = format!("documents/markdown/{}_report.md", record.document_id);
    let response = app
        .client()
        .get(&format!("/documents/file/{}", markdown_key))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "text/markdown");
    assert!(response.text().contains("Alpha"));
}

#[tokio::test]
async fn test_download_missing_key_is_not_found() {
    let app = setup_test_app();

    let response = app.client().get("/documents/file/documents/pdf/missing.pdf").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}
