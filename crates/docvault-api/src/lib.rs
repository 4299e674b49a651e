//! Docvault API Library
//!
//! HTTP boundary for the ingestion pipeline and the browse/retrieve surface:
//! handlers, error rendering and application setup.

mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
