//! tunebox-ingest library interface
//!
//! Exposes the ingestion pipeline and its parts for the binary and for
//! integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use crate::config::IngestConfig;
pub use crate::error::{IngestError, RunError, RunResult};
