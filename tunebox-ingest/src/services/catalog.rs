//! In-memory catalog of known artists and albums
//!
//! Seeded from the store when a run starts and extended as the run creates
//! entities. It decides "does this entity already exist" for the whole run,
//! so every insert here must mirror a row that has already been committed.
//!
//! Lookups are exact and case-sensitive: artists by name, albums by
//! `(title, artist_id)`.
//!
//! Stored rows that do not decode (malformed id or timestamp) are logged and
//! left out of the catalog; only a failed query stops seeding.

use crate::db::{albums, artists, Album, Artist};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tunebox_common::Result;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Catalog {
    artists: HashMap<String, Artist>,
    albums: HashMap<(String, Uuid), Album>,
}

impl Catalog {
    /// Empty catalog (no prior library)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from every artist and album currently in the store
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for row in artists::load_all_artists_per_row(pool).await? {
            match row {
                Ok(artist) => catalog.seed_artist(artist),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable artist row");
                    skipped += 1;
                }
            }
        }
        for row in albums::load_all_albums_per_row(pool).await? {
            match row {
                Ok(album) => catalog.seed_album(album),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable album row");
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            artists = catalog.artist_count(),
            albums = catalog.album_count(),
            skipped,
            "Catalog seeded from store"
        );

        Ok(catalog)
    }

    /// Pre-existing duplicates are not merged: the first one seen answers lookups
    fn seed_artist(&mut self, artist: Artist) {
        self.artists.entry(artist.name.clone()).or_insert(artist);
    }

    fn seed_album(&mut self, album: Album) {
        self.albums
            .entry((album.title.clone(), album.artist_id))
            .or_insert(album);
    }

    pub fn find_artist(&self, name: &str) -> Option<&Artist> {
        self.artists.get(name)
    }

    pub fn find_album(&self, title: &str, artist_id: Uuid) -> Option<&Album> {
        self.albums.get(&(title.to_string(), artist_id))
    }

    /// Record a freshly committed artist
    pub fn insert_artist(&mut self, artist: Artist) {
        self.artists.insert(artist.name.clone(), artist);
    }

    /// Record a freshly committed album
    pub fn insert_album(&mut self, album: Album) {
        self.albums.insert((album.title.clone(), album.artist_id), album);
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }
}
