//! Album cover art persistence
//!
//! Writes an embedded picture to `{covers_dir}/{album_id}.{ext}` and hands
//! back the reference path stored on albums and songs
//! (`{ref_prefix}/{album_id}.{ext}`).

use crate::services::tag_extractor::CoverImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Default prefix of stored cover reference paths
pub const DEFAULT_COVER_REF_PREFIX: &str = "covers";

#[derive(Debug, Error)]
pub enum CoverArtError {
    #[error("Failed to write cover {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File extension for a picture MIME type (`jpg` when unrecognized)
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// Cover storage location
#[derive(Debug, Clone)]
pub struct CoverArtStore {
    covers_dir: PathBuf,
    ref_prefix: String,
}

impl CoverArtStore {
    pub fn new(covers_dir: impl Into<PathBuf>, ref_prefix: impl Into<String>) -> Self {
        Self {
            covers_dir: covers_dir.into(),
            ref_prefix: ref_prefix.into(),
        }
    }

    pub fn covers_dir(&self) -> &Path {
        &self.covers_dir
    }

    /// Create the cover directory
    ///
    /// Run once at start-up; failure means the run cannot proceed.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.covers_dir)
    }

    /// Persist a cover, returning its reference path or `""` on failure
    ///
    /// A failed write is logged and degrades to "album without cover".
    pub fn save(&self, album_id: Uuid, cover: &CoverImage) -> String {
        match self.try_save(album_id, cover) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!(album_id = %album_id, error = %e, "Failed to save cover art");
                String::new()
            }
        }
    }

    pub fn try_save(&self, album_id: Uuid, cover: &CoverImage) -> Result<String, CoverArtError> {
        let file_name = format!("{}.{}", album_id, extension_for_mime(&cover.mime_type));
        let path = self.covers_dir.join(&file_name);

        tracing::info!("Creating cover at \"{}\"", path.display());

        std::fs::write(&path, &cover.data).map_err(|source| CoverArtError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(self.reference_for(&file_name))
    }

    fn reference_for(&self, file_name: &str) -> String {
        let prefix = self.ref_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        }
    }
}
