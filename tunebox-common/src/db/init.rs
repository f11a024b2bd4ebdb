//! Database initialization
//!
//! Opens (creating if needed) the library database and makes sure the
//! artist/album/song tables exist. Table creation is idempotent, so running
//! against an existing catalog leaves its rows untouched.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Applied to every pooled connection; ingestion relies on foreign keys to
    // reject songs whose album or artist is missing
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all library tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_artists_table(pool).await?;
    create_albums_table(pool).await?;
    create_songs_table(pool).await?;
    Ok(())
}

/// Create the artists table
///
/// `name` is deliberately not UNIQUE: name dedup is done by the ingest
/// catalog, and catalogs imported from elsewhere may already hold duplicates.
pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            artist_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            cover_image_path TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artists_name ON artists(name)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the albums table
pub async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            album_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist_id TEXT NOT NULL REFERENCES artists(artist_id) ON DELETE CASCADE,
            gold_price INTEGER NOT NULL DEFAULT 0,
            cover_image_path TEXT,
            release_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (gold_price >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the songs table
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            song_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            duration_sec INTEGER NOT NULL DEFAULT 0,
            album_id TEXT NOT NULL REFERENCES albums(album_id) ON DELETE CASCADE,
            silver_price INTEGER NOT NULL DEFAULT 0,
            file_path TEXT NOT NULL,
            track_number INTEGER NOT NULL DEFAULT 0,
            genre TEXT NOT NULL DEFAULT '',
            artist_id TEXT NOT NULL REFERENCES artists(artist_id) ON DELETE CASCADE,
            cover_image_path TEXT NOT NULL DEFAULT '',
            CHECK (duration_sec >= 0),
            CHECK (silver_price >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_album ON songs(album_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_artist ON songs(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_file_path ON songs(file_path)")
        .execute(pool)
        .await?;

    Ok(())
}
