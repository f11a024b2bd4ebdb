//! Configuration resolution tests
//!
//! Root folder priority: CLI → TUNEBOX_ROOT → TOML → platform default.
//!
//! Tests that touch TUNEBOX_ROOT are marked #[serial] so they do not race.

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tunebox_common::config::{
    default_root_folder, load_config, load_toml_config, resolve_root_folder, TomlConfig,
    ROOT_ENV_VAR,
};
use tunebox_common::Error;

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(ROOT_ENV_VAR, "/tmp/tunebox-env");
    let toml = TomlConfig {
        root_folder: Some("/tmp/tunebox-toml".to_string()),
        ..Default::default()
    };

    let root = resolve_root_folder(Some(Path::new("/tmp/tunebox-cli")), &toml);
    env::remove_var(ROOT_ENV_VAR);

    assert_eq!(root, PathBuf::from("/tmp/tunebox-cli"));
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ROOT_ENV_VAR, "/tmp/tunebox-env");
    let toml = TomlConfig {
        root_folder: Some("/tmp/tunebox-toml".to_string()),
        ..Default::default()
    };

    let root = resolve_root_folder(None, &toml);
    env::remove_var(ROOT_ENV_VAR);

    assert_eq!(root, PathBuf::from("/tmp/tunebox-env"));
}

#[test]
#[serial]
fn test_toml_used_without_env() {
    env::remove_var(ROOT_ENV_VAR);
    let toml = TomlConfig {
        root_folder: Some("/tmp/tunebox-toml".to_string()),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/tunebox-toml"));
}

#[test]
#[serial]
fn test_default_when_nothing_configured() {
    env::remove_var(ROOT_ENV_VAR);

    let root = resolve_root_folder(None, &TomlConfig::default());

    assert_eq!(root, default_root_folder());
    assert!(!root.as_os_str().is_empty());
}

#[test]
fn test_load_toml_with_ingest_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/tunebox"

[logging]
level = "debug"

[ingest]
library_dir = "/srv/music"
audio_extension = ".mp3"
skip_existing_paths = true
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.root_folder.as_deref(), Some("/srv/tunebox"));
    assert_eq!(config.logging.level.as_deref(), Some("debug"));
    assert_eq!(config.ingest.library_dir.as_deref(), Some("/srv/music"));
    assert_eq!(config.ingest.audio_extension.as_deref(), Some(".mp3"));
    assert_eq!(config.ingest.skip_existing_paths, Some(true));
    assert!(config.ingest.covers_dir.is_none());
}

#[test]
fn test_missing_sections_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = load_toml_config(&path).unwrap();

    assert!(config.root_folder.is_none());
    assert!(config.ingest.database.is_none());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [unterminated").unwrap();

    match load_toml_config(&path) {
        Err(Error::Config(msg)) => assert!(msg.contains("Parse")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_explicit_missing_config_is_error() {
    let result = load_config(Some(Path::new("/nonexistent/tunebox/config.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}
