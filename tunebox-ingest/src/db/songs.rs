//! Song database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tunebox_common::{uuid_utils, Error, Result};
use uuid::Uuid;

/// Song record
///
/// `cover_image_path` is a copy of the album's cover path taken when the song
/// was created; later album cover changes do not propagate.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub song_id: Uuid,
    pub title: String,
    pub duration_sec: i64,
    pub album_id: Uuid,
    pub silver_price: i64,
    /// Path relative to the library root
    pub file_path: String,
    pub track_number: i64,
    pub genre: String,
    pub artist_id: Uuid,
    pub cover_image_path: String,
}

impl Song {
    fn from_row(row: &SqliteRow) -> Result<Self> {
        let id: String = row.try_get("song_id")?;
        let album_id: String = row.try_get("album_id")?;
        let artist_id: String = row.try_get("artist_id")?;

        Ok(Self {
            song_id: uuid_utils::parse(&id)?,
            title: row.try_get("title")?,
            duration_sec: row.try_get("duration_sec")?,
            album_id: uuid_utils::parse(&album_id)?,
            silver_price: row.try_get("silver_price")?,
            file_path: row.try_get("file_path")?,
            track_number: row.try_get("track_number")?,
            genre: row.try_get("genre")?,
            artist_id: uuid_utils::parse(&artist_id)?,
            cover_image_path: row.try_get("cover_image_path")?,
        })
    }
}

const SONG_COLUMNS: &str = "song_id, title, duration_sec, album_id, silver_price, file_path, \
                            track_number, genre, artist_id, cover_image_path";

/// Insert a new song
///
/// Fails if the referenced album or artist has not been committed.
pub async fn save_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO songs (
            song_id, title, duration_sec, album_id, silver_price, file_path,
            track_number, genre, artist_id, cover_image_path
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(song.song_id.to_string())
    .bind(&song.title)
    .bind(song.duration_sec)
    .bind(song.album_id.to_string())
    .bind(song.silver_price)
    .bind(&song.file_path)
    .bind(song.track_number)
    .bind(&song.genre)
    .bind(song.artist_id.to_string())
    .bind(&song.cover_image_path)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn song_exists(pool: &SqlitePool, song_id: Uuid) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM songs WHERE song_id = ?")
        .bind(song_id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Whether any song was already ingested from this library-relative path
pub async fn song_exists_with_path(pool: &SqlitePool, file_path: &str) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM songs WHERE file_path = ? LIMIT 1")
        .bind(file_path)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Allocate a song id not already present in the store
pub async fn new_song_id(pool: &SqlitePool) -> Result<Uuid> {
    loop {
        let id = uuid_utils::generate();
        if !song_exists(pool, id).await? {
            return Ok(id);
        }
    }
}

/// Load song by id
///
/// A missing song is `Error::NotFound`.
pub async fn load_song(pool: &SqlitePool, song_id: Uuid) -> Result<Song> {
    let row = sqlx::query(&format!("SELECT {} FROM songs WHERE song_id = ?", SONG_COLUMNS))
        .bind(song_id.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Song::from_row(&row),
        None => Err(Error::NotFound(format!("song {}", song_id))),
    }
}

pub async fn load_all_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("SELECT {} FROM songs ORDER BY rowid", SONG_COLUMNS))
        .fetch_all(pool)
        .await?;

    rows.iter().map(Song::from_row).collect()
}

/// Songs credited to one artist, shortest first
pub async fn load_songs_by_artist(pool: &SqlitePool, artist_id: Uuid) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM songs WHERE artist_id = ? ORDER BY duration_sec, rowid",
        SONG_COLUMNS
    ))
    .bind(artist_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(Song::from_row).collect()
}

/// Songs of one album in track order
pub async fn load_songs_by_album(pool: &SqlitePool, album_id: Uuid) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM songs WHERE album_id = ? ORDER BY track_number, rowid",
        SONG_COLUMNS
    ))
    .bind(album_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(Song::from_row).collect()
}

pub async fn delete_song(pool: &SqlitePool, song_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM songs WHERE song_id = ?")
        .bind(song_id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}
