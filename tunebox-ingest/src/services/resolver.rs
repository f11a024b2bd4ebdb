//! Get-or-create resolution of artists and albums
//!
//! A miss in the catalog creates the entity, commits it to the store and
//! only then records it in the catalog. A failed commit leaves the catalog
//! untouched, so the catalog never references an uncommitted row.

use crate::db::{albums, artists, Album, Artist};
use crate::services::catalog::Catalog;
use crate::services::cover_art::CoverArtStore;
use crate::services::tag_extractor::CoverImage;
use sqlx::SqlitePool;
use tunebox_common::Result;
use uuid::Uuid;

/// Outcome of a get-or-create
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    /// True when this call created (and committed) the entity
    pub created: bool,
}

/// Resolve a normalized artist name to an artist id
pub async fn resolve_artist(
    pool: &SqlitePool,
    catalog: &mut Catalog,
    name: &str,
) -> Result<Resolved<Uuid>> {
    if let Some(existing) = catalog.find_artist(name) {
        tracing::debug!(artist = %name, artist_id = %existing.artist_id, "Artist found in catalog");
        return Ok(Resolved {
            value: existing.artist_id,
            created: false,
        });
    }

    let artist = Artist::new(artists::new_artist_id(pool).await?, name.to_string());
    artists::save_artist(pool, &artist).await?;

    tracing::info!(artist = %artist.name, artist_id = %artist.artist_id, "Created artist");

    let artist_id = artist.artist_id;
    catalog.insert_artist(artist);

    Ok(Resolved {
        value: artist_id,
        created: true,
    })
}

/// Resolve `(title, artist_id)` to an album
///
/// The cover is only written when the album is created here; an existing
/// album keeps whatever cover it already has.
pub async fn resolve_album(
    pool: &SqlitePool,
    catalog: &mut Catalog,
    covers: &CoverArtStore,
    title: &str,
    artist_id: Uuid,
    cover: Option<&CoverImage>,
) -> Result<Resolved<Album>> {
    if let Some(existing) = catalog.find_album(title, artist_id) {
        tracing::debug!(album = %title, album_id = %existing.album_id, "Album found in catalog");
        return Ok(Resolved {
            value: existing.clone(),
            created: false,
        });
    }

    let album_id = albums::new_album_id(pool).await?;

    let cover_image_path = cover
        .map(|image| covers.save(album_id, image))
        .filter(|reference| !reference.is_empty());

    let album = Album::new(album_id, title.to_string(), artist_id, cover_image_path);
    albums::save_album(pool, &album).await?;

    tracing::info!(
        album = %album.title,
        album_id = %album.album_id,
        artist_id = %artist_id,
        cover = %album.cover_path(),
        "Created album"
    );

    catalog.insert_album(album.clone());

    Ok(Resolved {
        value: album,
        created: true,
    })
}
