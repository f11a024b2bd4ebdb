//! Audio file scanner
//!
//! Lazy, depth-first discovery of audio files below a library root. Only
//! regular files whose name ends with the configured extension (exact,
//! case-sensitive suffix) are yielded. Directory entries are visited in file
//! name order so repeated scans over an unchanged tree produce the same
//! sequence.
//!
//! Symlinked files and directories are followed and reported under the link's
//! own path. A link pointing back up the tree is detected as a loop, logged
//! and skipped, as are unreadable entries and dangling links.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Default audio file suffix
pub const DEFAULT_AUDIO_EXTENSION: &str = ".flac";

/// Audio file scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Audio file scanner
#[derive(Debug, Clone)]
pub struct FileScanner {
    extension: String,
}

impl FileScanner {
    /// Create a scanner matching [`DEFAULT_AUDIO_EXTENSION`]
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_AUDIO_EXTENSION)
    }

    /// Create a scanner matching a custom file name suffix (e.g. `".mp3"`)
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check that `root_path` is an existing directory
    pub fn check_root(&self, root_path: &Path) -> Result<(), ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }
        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }
        Ok(())
    }

    /// Lazily walk `root_path`, yielding absolute paths of matching files
    ///
    /// A missing root (or a root that is not a directory) is not fatal: it is
    /// reported as a warning and the sequence is empty.
    pub fn scan(&self, root_path: &Path) -> AudioFiles {
        if let Err(e) = self.check_root(root_path) {
            tracing::warn!("{} is not a scannable directory: {}", root_path.display(), e);
            return AudioFiles {
                inner: None,
                extension: self.extension.clone(),
            };
        }

        let root = std::fs::canonicalize(root_path).unwrap_or_else(|_| root_path.to_path_buf());

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        AudioFiles {
            inner: Some(walker),
            extension: self.extension.clone(),
        }
    }

    /// Check if a file name carries the audio suffix
    pub fn is_audio_file_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy sequence of discovered audio files
pub struct AudioFiles {
    inner: Option<walkdir::IntoIter>,
    extension: String,
}

impl Iterator for AudioFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let walker = self.inner.as_mut()?;

        for entry in walker.by_ref() {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let matches = entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| name.ends_with(&self.extension));
                    if matches {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    // Continue scanning, don't abort
                    tracing::warn!("Error accessing entry: {}", e);
                }
            }
        }

        None
    }
}
