//! Scratch library layout
//!
//! Returns a TempDir-backed root with `music/`, `covers/` and a database
//! path. Keep the [`TestLibrary`] alive for the duration of the test.

use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tunebox_ingest::IngestConfig;

pub struct TestLibrary {
    pub dir: TempDir,
}

impl TestLibrary {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("music")).expect("Failed to create music dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn library_dir(&self) -> PathBuf {
        self.root().join("music")
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.root().join("covers")
    }

    /// Create an empty placeholder file below the library root
    pub fn add_file(&self, relative: &str) -> PathBuf {
        let path = self.library_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, b"").expect("Failed to write file");
        path
    }

    pub fn config(&self) -> IngestConfig {
        IngestConfig::under_root(self.root())
    }

    pub async fn pool(&self) -> SqlitePool {
        tunebox_ingest::db::init_database_pool(&self.config().database_path)
            .await
            .expect("Failed to open test database")
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
