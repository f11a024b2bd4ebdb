//! Album database operations

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tunebox_common::{time, uuid_utils, Error, Result};
use uuid::Uuid;

/// Album record, owned by one artist
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub album_id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub gold_price: i64,
    /// Reference path of the stored cover, `None` when the album has no art
    pub cover_image_path: Option<String>,
    pub release_date: DateTime<Utc>,
}

impl Album {
    /// New unpriced album released now
    pub fn new(album_id: Uuid, title: String, artist_id: Uuid, cover_image_path: Option<String>) -> Self {
        Self {
            album_id,
            title,
            artist_id,
            gold_price: 0,
            cover_image_path,
            release_date: time::now(),
        }
    }

    /// Cover path as copied onto songs (empty when there is no cover)
    pub fn cover_path(&self) -> &str {
        self.cover_image_path.as_deref().unwrap_or("")
    }

    fn from_row(row: &SqliteRow) -> Result<Self> {
        let id: String = row.try_get("album_id")?;
        let artist_id: String = row.try_get("artist_id")?;
        let release_date: String = row.try_get("release_date")?;

        Ok(Self {
            album_id: uuid_utils::parse(&id)?,
            title: row.try_get("title")?,
            artist_id: uuid_utils::parse(&artist_id)?,
            gold_price: row.try_get("gold_price")?,
            cover_image_path: row.try_get("cover_image_path")?,
            release_date: time::from_db_string(&release_date)?,
        })
    }
}

const ALBUM_COLUMNS: &str = "album_id, title, artist_id, gold_price, cover_image_path, release_date";

/// Insert a new album
///
/// Fails if the owning artist has not been committed.
pub async fn save_album(pool: &SqlitePool, album: &Album) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO albums (album_id, title, artist_id, gold_price, cover_image_path, release_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(album.album_id.to_string())
    .bind(&album.title)
    .bind(album.artist_id.to_string())
    .bind(album.gold_price)
    .bind(&album.cover_image_path)
    .bind(time::to_db_string(&album.release_date))
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn album_exists(pool: &SqlitePool, album_id: Uuid) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM albums WHERE album_id = ?")
        .bind(album_id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Allocate an album id not already present in the store
pub async fn new_album_id(pool: &SqlitePool) -> Result<Uuid> {
    loop {
        let id = uuid_utils::generate();
        if !album_exists(pool, id).await? {
            return Ok(id);
        }
    }
}

/// Load album by id
///
/// A missing album is `Error::NotFound`.
pub async fn load_album(pool: &SqlitePool, album_id: Uuid) -> Result<Album> {
    let row = sqlx::query(&format!("SELECT {} FROM albums WHERE album_id = ?", ALBUM_COLUMNS))
        .bind(album_id.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Album::from_row(&row),
        None => Err(Error::NotFound(format!("album {}", album_id))),
    }
}

/// Load every album in insertion order
pub async fn load_all_albums(pool: &SqlitePool) -> Result<Vec<Album>> {
    load_all_albums_per_row(pool).await?.into_iter().collect()
}

/// Load every album in insertion order, decoding each row on its own
///
/// Same contract as [`super::artists::load_all_artists_per_row`].
pub async fn load_all_albums_per_row(pool: &SqlitePool) -> Result<Vec<Result<Album>>> {
    let rows = sqlx::query(&format!("SELECT {} FROM albums ORDER BY rowid", ALBUM_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(Album::from_row).collect())
}

/// Albums of one artist, earliest release first
pub async fn load_albums_by_artist(pool: &SqlitePool, artist_id: Uuid) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM albums WHERE artist_id = ? ORDER BY release_date ASC, rowid",
        ALBUM_COLUMNS
    ))
    .bind(artist_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(Album::from_row).collect()
}

/// Delete an album (its songs cascade)
pub async fn delete_album(pool: &SqlitePool, album_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM albums WHERE album_id = ?")
        .bind(album_id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::artists::{save_artist, Artist};
    use tempfile::TempDir;

    async fn pool_with_artist() -> (TempDir, SqlitePool, Uuid) {
        let temp_dir = TempDir::new().unwrap();
        let pool = tunebox_common::db::init_database(&temp_dir.path().join("test.db"))
            .await
            .expect("Failed to create test database");

        let artist = Artist::new(Uuid::new_v4(), "Owner".to_string());
        save_artist(&pool, &artist).await.unwrap();
        (temp_dir, pool, artist.artist_id)
    }

    #[tokio::test]
    async fn test_save_and_load_album() {
        let (_dir, pool, artist_id) = pool_with_artist().await;

        let album = Album::new(
            new_album_id(&pool).await.unwrap(),
            "Test Album".to_string(),
            artist_id,
            Some("covers/x.png".to_string()),
        );
        save_album(&pool, &album).await.expect("Failed to save album");

        let loaded = load_album(&pool, album.album_id).await.unwrap();
        assert_eq!(loaded, album);
        assert_eq!(loaded.cover_path(), "covers/x.png");
        assert_eq!(loaded.gold_price, 0);
    }

    #[tokio::test]
    async fn test_album_without_cover_reads_back_empty() {
        let (_dir, pool, artist_id) = pool_with_artist().await;

        let album = Album::new(Uuid::new_v4(), "Bare".to_string(), artist_id, None);
        save_album(&pool, &album).await.unwrap();

        let loaded = load_album(&pool, album.album_id).await.unwrap();
        assert_eq!(loaded.cover_image_path, None);
        assert_eq!(loaded.cover_path(), "");
    }

    #[tokio::test]
    async fn test_save_album_requires_committed_artist() {
        let (_dir, pool, _artist_id) = pool_with_artist().await;

        let album = Album::new(Uuid::new_v4(), "Orphan".to_string(), Uuid::new_v4(), None);
        assert!(save_album(&pool, &album).await.is_err());
        assert!(!album_exists(&pool, album.album_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_load_albums_by_artist_filters_owner() {
        let (_dir, pool, artist_id) = pool_with_artist().await;
        let other = Artist::new(Uuid::new_v4(), "Other".to_string());
        save_artist(&pool, &other).await.unwrap();

        save_album(&pool, &Album::new(Uuid::new_v4(), "Mine".to_string(), artist_id, None))
            .await
            .unwrap();
        save_album(&pool, &Album::new(Uuid::new_v4(), "Theirs".to_string(), other.artist_id, None))
            .await
            .unwrap();

        let mine = load_albums_by_artist(&pool, artist_id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
        assert_eq!(load_all_albums(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_album_then_lookup() {
        let (_dir, pool, artist_id) = pool_with_artist().await;
        let album = Album::new(Uuid::new_v4(), "Gone".to_string(), artist_id, None);
        save_album(&pool, &album).await.unwrap();

        delete_album(&pool, album.album_id).await.unwrap();

        assert!(matches!(
            load_album(&pool, album.album_id).await,
            Err(Error::NotFound(_))
        ));
    }
}
