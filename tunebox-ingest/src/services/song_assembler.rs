//! Song record assembly
//!
//! Builds the song row for one file once its artist and album are resolved
//! and commits it.

use crate::db::{songs, Album, Song};
use crate::services::tag_extractor::TagBag;
use sqlx::SqlitePool;
use std::path::Path;
use tunebox_common::Result;
use uuid::Uuid;

/// Path stored on a song: relative to the library root, `/`-separated
///
/// A file outside the root keeps its full path.
pub fn library_relative_path(library_root: &Path, file: &Path) -> String {
    let Ok(relative) = file.strip_prefix(library_root) else {
        return file.to_string_lossy().to_string();
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the song for a file from its tags and resolved references
///
/// The cover path is copied from the album as it is right now. Songs start
/// with a zero price.
pub fn assemble_song(
    song_id: Uuid,
    bag: &TagBag,
    file_path: String,
    album: &Album,
    artist_id: Uuid,
) -> Song {
    Song {
        song_id,
        title: bag.title.clone(),
        duration_sec: bag.duration_sec,
        album_id: album.album_id,
        silver_price: 0,
        file_path,
        track_number: bag.track_number,
        genre: bag.genre.clone(),
        artist_id,
        cover_image_path: album.cover_path().to_string(),
    }
}

/// Allocate an id, build the song and commit it
pub async fn create_song(
    pool: &SqlitePool,
    bag: &TagBag,
    file_path: String,
    album: &Album,
    artist_id: Uuid,
) -> Result<Song> {
    let song_id = songs::new_song_id(pool).await?;
    let song = assemble_song(song_id, bag, file_path, album, artist_id);
    songs::save_song(pool, &song).await?;

    tracing::info!(
        song_id = %song.song_id,
        title = %song.title,
        file = %song.file_path,
        "Created song"
    );

    Ok(song)
}
