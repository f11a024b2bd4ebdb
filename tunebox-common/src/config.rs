//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the tunebox root folder
pub const ROOT_ENV_VAR: &str = "TUNEBOX_ROOT";

/// Contents of `config.toml`
///
/// Every field is optional; a missing file or missing key falls through to
/// the next resolution tier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ingest: IngestToml,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// `[ingest]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestToml {
    pub library_dir: Option<String>,
    pub covers_dir: Option<String>,
    pub cover_ref_prefix: Option<String>,
    pub database: Option<String>,
    pub audio_extension: Option<String>,
    pub skip_existing_paths: Option<bool>,
}

/// Load and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the config file at `explicit`, or the platform default if it exists
///
/// An explicit path that cannot be read is an error. A missing default file
/// yields an empty config.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading config from {}", path.display());
            load_toml_config(&path)
        }
        _ => Ok(TomlConfig::default()),
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `TUNEBOX_ROOT` environment variable
/// 3. `root_folder` in the TOML config
/// 4. OS-dependent default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.root_folder {
        return PathBuf::from(path);
    }

    default_root_folder()
}

/// Platform config file location (`~/.config/tunebox/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        let user_config = dirs::config_dir().map(|d| d.join("tunebox").join("config.toml"));
        match user_config {
            Some(path) if path.exists() => Some(path),
            _ => Some(PathBuf::from("/etc/tunebox/config.toml")),
        }
    } else {
        dirs::config_dir().map(|d| d.join("tunebox").join("config.toml"))
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("tunebox"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\tunebox"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("tunebox"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/tunebox"))
    } else {
        dirs::data_local_dir()
            .map(|d| d.join("tunebox"))
            .unwrap_or_else(|| PathBuf::from("./tunebox_data"))
    }
}
