//! Library store access for tunebox-ingest
//!
//! Typed records and create/exists/load/delete operations per entity over the
//! shared SQLite database.

pub mod albums;
pub mod artists;
pub mod songs;

pub use albums::Album;
pub use artists::Artist;
pub use songs::Song;

use sqlx::SqlitePool;
use std::path::Path;
use tunebox_common::Result;

/// Open the library database, creating file and tables on first use
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::debug!("Connecting to database: {}", db_path.display());
    tunebox_common::db::init_database(db_path).await
}
