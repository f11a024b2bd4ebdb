//! Configuration resolution for tunebox-ingest
//!
//! Per field, highest priority first:
//! 1. Command-line argument (or its environment variable, see `main.rs`)
//! 2. `[ingest]` table of the TOML config
//! 3. Default derived from the root folder

use crate::services::cover_art::DEFAULT_COVER_REF_PREFIX;
use crate::services::file_scanner::DEFAULT_AUDIO_EXTENSION;
use std::path::{Path, PathBuf};
use tunebox_common::config::TomlConfig;

/// Library folder name under the root folder
pub const DEFAULT_LIBRARY_DIR_NAME: &str = "music";
/// Cover folder name under the root folder
pub const DEFAULT_COVERS_DIR_NAME: &str = "covers";
/// Database file name under the root folder
pub const DEFAULT_DATABASE_NAME: &str = "tunebox.db";

/// Resolved settings of one ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    /// Scan root; song paths are stored relative to it
    pub library_dir: PathBuf,
    pub covers_dir: PathBuf,
    /// Prefix of cover reference paths stored on albums and songs
    pub cover_ref_prefix: String,
    pub database_path: PathBuf,
    /// Exact, case-sensitive file name suffix
    pub audio_extension: String,
    /// Skip files whose relative path already has a song
    pub skip_existing_paths: bool,
}

impl IngestConfig {
    /// Defaults for a root folder
    pub fn under_root(root: &Path) -> Self {
        Self {
            library_dir: root.join(DEFAULT_LIBRARY_DIR_NAME),
            covers_dir: root.join(DEFAULT_COVERS_DIR_NAME),
            cover_ref_prefix: DEFAULT_COVER_REF_PREFIX.to_string(),
            database_path: root.join(DEFAULT_DATABASE_NAME),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
            skip_existing_paths: false,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub library_dir: Option<PathBuf>,
    pub covers_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub audio_extension: Option<String>,
    pub skip_existing_paths: bool,
}

/// Merge command line, TOML and root-folder defaults
pub fn resolve_ingest_config(
    overrides: &ConfigOverrides,
    toml: &TomlConfig,
    root: &Path,
) -> IngestConfig {
    let defaults = IngestConfig::under_root(root);
    let section = &toml.ingest;

    let pick_path = |cli: &Option<PathBuf>, file: &Option<String>, default: PathBuf| {
        cli.clone()
            .or_else(|| file.as_ref().map(PathBuf::from))
            .unwrap_or(default)
    };

    let config = IngestConfig {
        library_dir: pick_path(&overrides.library_dir, &section.library_dir, defaults.library_dir),
        covers_dir: pick_path(&overrides.covers_dir, &section.covers_dir, defaults.covers_dir),
        cover_ref_prefix: section
            .cover_ref_prefix
            .clone()
            .unwrap_or(defaults.cover_ref_prefix),
        database_path: pick_path(
            &overrides.database_path,
            &section.database,
            defaults.database_path,
        ),
        audio_extension: overrides
            .audio_extension
            .clone()
            .or_else(|| section.audio_extension.clone())
            .unwrap_or(defaults.audio_extension),
        skip_existing_paths: overrides.skip_existing_paths
            || section.skip_existing_paths.unwrap_or(defaults.skip_existing_paths),
    };

    tracing::debug!(
        library_dir = %config.library_dir.display(),
        covers_dir = %config.covers_dir.display(),
        database = %config.database_path.display(),
        extension = %config.audio_extension,
        "Resolved ingest configuration"
    );

    config
}
