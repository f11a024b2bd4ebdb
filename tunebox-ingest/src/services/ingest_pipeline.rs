//! Ingestion pipeline
//!
//! Walks the library and, for each audio file in turn:
//! extract tags → normalize artist names → resolve album artist → resolve
//! song artist → resolve album (cover on first sight) → commit song.
//!
//! Files are processed strictly one after another. Every get-or-create is
//! visible in the [`Catalog`] before the next file's lookups run, which is
//! what keeps artists and albums from being created twice.
//!
//! A failing file is logged, counted in the [`IngestSummary`] and skipped.
//! Anything already committed for that file stays committed (an artist may
//! be left without songs).

use crate::config::IngestConfig;
use crate::db::songs;
use crate::db::Song;
use crate::error::{IngestError, RunError, RunResult};
use crate::services::catalog::Catalog;
use crate::services::cover_art::CoverArtStore;
use crate::services::file_scanner::FileScanner;
use crate::services::name_normalizer::normalize_artist_name;
use crate::services::resolver::{resolve_album, resolve_artist};
use crate::services::song_assembler::{create_song, library_relative_path};
use crate::services::tag_extractor::{TagBag, TagExtractor, TagReader, UNKNOWN_ARTIST};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One file that could not be ingested
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// End-of-run counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    pub files_discovered: usize,
    pub songs_ingested: usize,
    /// Files passed over because their path was already ingested
    pub files_skipped: usize,
    pub failures: Vec<FileFailure>,
    pub artists_created: usize,
    pub albums_created: usize,
    pub covers_written: usize,
}

impl IngestSummary {
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }
}

/// Artist names a file resolves to
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistNames {
    /// Owner of the album
    pub album_artist: String,
    /// Credited on the song
    pub song_artist: String,
}

/// Pick and normalize album and song artist names from a tag bag
///
/// The album artist tag falls back to the track artist. The song is credited
/// to the track artist unless that is the unknown placeholder, in which case
/// the album artist stands in. A name that normalizes to nothing becomes the
/// placeholder.
pub fn artist_names(bag: &TagBag) -> ArtistNames {
    let track_raw = bag.track_artist.as_str();
    let album_raw = bag.album_artist.as_deref().unwrap_or(track_raw);

    let album_artist = normalized_or_unknown(album_raw);
    let track_artist = normalized_or_unknown(track_raw);

    let song_artist = if track_artist == UNKNOWN_ARTIST {
        album_artist.clone()
    } else {
        track_artist
    };

    ArtistNames {
        album_artist,
        song_artist,
    }
}

fn normalized_or_unknown(raw: &str) -> String {
    let name = normalize_artist_name(raw);
    if name.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        name
    }
}

/// One ingestion run over a library
pub struct Ingestor<R> {
    pool: SqlitePool,
    config: IngestConfig,
    scanner: FileScanner,
    extractor: TagExtractor<R>,
    covers: CoverArtStore,
    catalog: Catalog,
    songs: Vec<Song>,
    summary: IngestSummary,
}

impl<R: TagReader> Ingestor<R> {
    pub fn new(pool: SqlitePool, config: IngestConfig, reader: R) -> Self {
        let scanner = FileScanner::with_extension(config.audio_extension.clone());
        let covers = CoverArtStore::new(config.covers_dir.clone(), config.cover_ref_prefix.clone());

        Self {
            pool,
            config,
            scanner,
            extractor: TagExtractor::new(reader),
            covers,
            catalog: Catalog::new(),
            songs: Vec::new(),
            summary: IngestSummary::default(),
        }
    }

    /// Songs committed by the last run
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest every audio file below the library root
    ///
    /// Returns `Err` only when the run cannot start: the covers directory
    /// cannot be created or the catalog cannot be read from the store.
    pub async fn run(&mut self) -> RunResult<IngestSummary> {
        let start_time = Instant::now();
        self.songs.clear();
        self.summary = IngestSummary::default();

        tracing::info!(
            library = %self.config.library_dir.display(),
            extension = %self.config.audio_extension,
            "Starting ingestion"
        );

        self.covers.ensure_dir().map_err(|source| RunError::CoversDir {
            path: self.covers.covers_dir().to_path_buf(),
            source,
        })?;

        self.catalog = Catalog::load(&self.pool).await.map_err(RunError::Catalog)?;

        // Scanned paths are canonical; relative paths must be taken against the same form
        let library_root = std::fs::canonicalize(&self.config.library_dir)
            .unwrap_or_else(|_| self.config.library_dir.clone());

        for path in self.scanner.scan(&self.config.library_dir) {
            self.summary.files_discovered += 1;
            tracing::info!("Processing \"{}\"", path.display());

            match self.ingest_file(&library_root, &path).await {
                Ok(Some(song)) => {
                    self.summary.songs_ingested += 1;
                    self.songs.push(song);
                }
                Ok(None) => {
                    self.summary.files_skipped += 1;
                }
                Err(e) => {
                    if e.is_decode_failure() {
                        tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable file");
                    } else {
                        tracing::error!(file = %path.display(), error = %e, "Failed to ingest file");
                    }
                    self.summary.failures.push(FileFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let summary = self.summary.clone();
        tracing::info!(
            files = summary.files_discovered,
            songs = summary.songs_ingested,
            skipped = summary.files_skipped,
            failed = summary.files_failed(),
            artists_created = summary.artists_created,
            albums_created = summary.albums_created,
            covers_written = summary.covers_written,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Ingestion complete"
        );

        Ok(summary)
    }

    /// Process one file; `Ok(None)` when it was skipped as already ingested
    async fn ingest_file(
        &mut self,
        library_root: &Path,
        path: &Path,
    ) -> Result<Option<Song>, IngestError> {
        let relative_path = library_relative_path(library_root, path);

        if self.config.skip_existing_paths
            && songs::song_exists_with_path(&self.pool, &relative_path).await?
        {
            tracing::debug!(file = %relative_path, "Already ingested, skipping");
            return Ok(None);
        }

        let bag = self.extractor.extract(path)?;
        let names = artist_names(&bag);

        // Album artist first: it owns the album
        let album_artist =
            resolve_artist(&self.pool, &mut self.catalog, &names.album_artist).await?;
        if album_artist.created {
            self.summary.artists_created += 1;
        }

        let song_artist = resolve_artist(&self.pool, &mut self.catalog, &names.song_artist).await?;
        if song_artist.created {
            self.summary.artists_created += 1;
        }

        let album = resolve_album(
            &self.pool,
            &mut self.catalog,
            &self.covers,
            &bag.album,
            album_artist.value,
            bag.cover.as_ref(),
        )
        .await?;
        if album.created {
            self.summary.albums_created += 1;
            if album.value.cover_image_path.is_some() {
                self.summary.covers_written += 1;
            }
        }

        let song = create_song(&self.pool, &bag, relative_path, &album.value, song_artist.value).await?;

        Ok(Some(song))
    }
}
