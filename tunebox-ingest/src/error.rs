//! Error types for tunebox-ingest
//!
//! Per-file failures are [`IngestError`]s: they are logged, counted and the
//! walk continues. Failures of the run itself (covers directory, store,
//! catalog seeding) surface as [`RunError`].

use crate::services::tag_extractor::MetadataError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to ingest one file
#[derive(Debug, Error)]
pub enum IngestError {
    /// Tags could not be decoded
    #[error("Metadata extraction failed: {0}")]
    Metadata(#[from] MetadataError),

    /// A store operation failed part-way through the file
    #[error("Store error: {0}")]
    Store(#[from] tunebox_common::Error),
}

impl IngestError {
    /// Decode failures are expected input noise; store failures are not
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, IngestError::Metadata(_))
    }
}

/// Failure that stops the run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Cannot create covers directory {path}: {source}")]
    CoversDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot load catalog: {0}")]
    Catalog(#[source] tunebox_common::Error),
}

pub type RunResult<T> = std::result::Result<T, RunError>;
