//! Artist database operations

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tunebox_common::{time, uuid_utils, Error, Result};
use uuid::Uuid;

/// Artist record
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub artist_id: Uuid,
    pub name: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub cover_image_path: String,
}

impl Artist {
    /// New artist with empty bio and cover, created now
    pub fn new(artist_id: Uuid, name: String) -> Self {
        Self {
            artist_id,
            name,
            bio: String::new(),
            created_at: time::now(),
            cover_image_path: String::new(),
        }
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        let id: String = row.try_get("artist_id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self {
            artist_id: uuid_utils::parse(&id)?,
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
            created_at: time::from_db_string(&created_at)?,
            cover_image_path: row.try_get("cover_image_path")?,
        })
    }
}

/// Insert a new artist
pub async fn save_artist(pool: &SqlitePool, artist: &Artist) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO artists (artist_id, name, bio, created_at, cover_image_path)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(artist.artist_id.to_string())
    .bind(&artist.name)
    .bind(&artist.bio)
    .bind(time::to_db_string(&artist.created_at))
    .bind(&artist.cover_image_path)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn artist_exists(pool: &SqlitePool, artist_id: Uuid) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM artists WHERE artist_id = ?")
        .bind(artist_id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Allocate an artist id not already present in the store
pub async fn new_artist_id(pool: &SqlitePool) -> Result<Uuid> {
    loop {
        let id = uuid_utils::generate();
        if !artist_exists(pool, id).await? {
            return Ok(id);
        }
    }
}

/// Load artist by id
///
/// A missing artist is `Error::NotFound`.
pub async fn load_artist(pool: &SqlitePool, artist_id: Uuid) -> Result<Artist> {
    let row = sqlx::query(
        r#"
        SELECT artist_id, name, bio, created_at, cover_image_path
        FROM artists
        WHERE artist_id = ?
        "#,
    )
    .bind(artist_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Artist::from_row(&row),
        None => Err(Error::NotFound(format!("artist {}", artist_id))),
    }
}

/// Load every artist, oldest first
pub async fn load_all_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    load_all_artists_per_row(pool).await?.into_iter().collect()
}

/// Load every artist, oldest first, decoding each row on its own
///
/// The outer error is a failed query. An inner error is a row whose id or
/// timestamp does not decode; the other rows are unaffected.
pub async fn load_all_artists_per_row(pool: &SqlitePool) -> Result<Vec<Result<Artist>>> {
    let rows = sqlx::query(
        r#"
        SELECT artist_id, name, bio, created_at, cover_image_path
        FROM artists
        ORDER BY created_at, rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(Artist::from_row).collect())
}

/// Delete an artist (albums and songs cascade)
pub async fn delete_artist(pool: &SqlitePool, artist_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM artists WHERE artist_id = ?")
        .bind(artist_id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_pool() -> (TempDir, SqlitePool) {
        let temp_dir = TempDir::new().unwrap();
        let pool = tunebox_common::db::init_database(&temp_dir.path().join("test.db"))
            .await
            .expect("Failed to create test database");
        (temp_dir, pool)
    }

    #[tokio::test]
    async fn test_save_and_load_artist() {
        let (_dir, pool) = test_pool().await;

        let artist = Artist::new(new_artist_id(&pool).await.unwrap(), "Test Artist".to_string());
        save_artist(&pool, &artist).await.expect("Failed to save artist");

        let loaded = load_artist(&pool, artist.artist_id)
            .await
            .expect("Failed to load artist");

        assert_eq!(loaded, artist);
        assert!(artist_exists(&pool, artist.artist_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_load_missing_artist_is_not_found() {
        let (_dir, pool) = test_pool().await;

        let result = load_artist(&pool, Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_artist() {
        let (_dir, pool) = test_pool().await;

        let artist = Artist::new(Uuid::new_v4(), "Gone".to_string());
        save_artist(&pool, &artist).await.unwrap();

        delete_artist(&pool, artist.artist_id).await.unwrap();
        assert!(!artist_exists(&pool, artist.artist_id).await.unwrap());
        assert!(matches!(
            load_artist(&pool, artist.artist_id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_load_all_keeps_duplicate_names() {
        let (_dir, pool) = test_pool().await;

        save_artist(&pool, &Artist::new(Uuid::new_v4(), "Twin".to_string())).await.unwrap();
        save_artist(&pool, &Artist::new(Uuid::new_v4(), "Twin".to_string())).await.unwrap();

        let all = load_all_artists(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|a| a.name == "Twin"));
    }
}
