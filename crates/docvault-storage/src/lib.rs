//! Docvault Storage Library
//!
//! This crate provides the storage abstraction for Docvault: the key-level
//! [`Storage`] trait, its object_store backed implementations, and the
//! [`DocumentStore`] gateway that owns the document key layout.
//!
//! # Storage key format
//!
//! - Original PDFs: `documents/pdf/{document_id}_{original_filename}`
//! - Extracted text: `documents/markdown/{document_id}_{base_name}.md`
//! - Namespace markers: `documents/pdf/.keep`, `documents/markdown/.keep`
//!
//! Key generation is centralized in the `keys` module.

pub mod factory;
pub mod gateway;
pub mod keys;
pub mod memory;
mod object;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use docvault_core::StorageBackend;
pub use factory::create_storage;
pub use gateway::DocumentStore;
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{ObjectStream, Storage, StorageError, StorageResult, StoredObject};
