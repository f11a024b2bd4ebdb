//! Audio tag extraction
//!
//! Turns the decoder's per-container tag sets into one [`TagBag`] per file.
//!
//! Field resolution, per field:
//! 1. Vorbis comment value
//! 2. ID3v2 value
//! 3. Placeholder (`"Unknown Title"`, `"Unknown Artist"`, ...)
//!
//! Empty or whitespace-only values count as absent. Album artist has no
//! placeholder: when neither container carries one the bag reports `None`
//! and the pipeline falls back to the track artist.
//!
//! Decoding itself is delegated to a [`TagReader`]; [`LoftyTagReader`] is the
//! production implementation.

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::Picture;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagType};
use std::path::Path;
use thiserror::Error;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

/// MIME type assumed for embedded pictures that do not declare one
const DEFAULT_PICTURE_MIME: &str = "image/jpeg";

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Decoder could not open or parse the file
    #[error("Failed to read tags from {path}: {reason}")]
    ReadError { path: String, reason: String },

    /// I/O error (file read)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Embedded cover image
#[derive(Debug, Clone, PartialEq)]
pub struct CoverImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Text fields read from one tag container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagFields {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub track_number: Option<String>,
}

/// Decoder output for one file, before fallback resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTags {
    pub vorbis: Option<TagFields>,
    pub id3: Option<TagFields>,
    /// Playtime estimate in seconds
    pub playtime_seconds: Option<f64>,
    pub picture: Option<CoverImage>,
}

/// Normalized per-file metadata
#[derive(Debug, Clone, PartialEq)]
pub struct TagBag {
    pub title: String,
    /// Raw track artist (may carry "feat." annotations)
    pub track_artist: String,
    /// Raw album artist, if tagged
    pub album_artist: Option<String>,
    pub album: String,
    pub genre: String,
    /// Duration rounded to whole seconds
    pub duration_sec: i64,
    /// Track number, 0 when absent or unparsable
    pub track_number: i64,
    pub cover: Option<CoverImage>,
}

/// Tag-decoding collaborator
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError>;
}

/// Tag extractor: decoder + fallback resolution
pub struct TagExtractor<R> {
    reader: R,
}

impl<R: TagReader> TagExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Extract the tag bag of one file
    pub fn extract(&self, path: &Path) -> Result<TagBag, MetadataError> {
        let raw = self.reader.read_tags(path)?;
        let bag = resolve_tag_bag(raw);

        tracing::debug!(
            file = %path.display(),
            title = %bag.title,
            artist = %bag.track_artist,
            album = %bag.album,
            duration_s = bag.duration_sec,
            has_cover = bag.cover.is_some(),
            "Extracted metadata"
        );

        Ok(bag)
    }
}

/// Apply the Vorbis → ID3v2 → placeholder resolution order
pub fn resolve_tag_bag(raw: RawTags) -> TagBag {
    let vorbis = raw.vorbis.unwrap_or_default();
    let id3 = raw.id3.unwrap_or_default();

    let pick = |field: fn(&TagFields) -> &Option<String>| -> Option<String> {
        present(field(&vorbis)).or_else(|| present(field(&id3)))
    };

    let title = pick(|f| &f.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let track_artist = pick(|f| &f.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let album_artist = pick(|f| &f.album_artist);
    let album = pick(|f| &f.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string());
    let genre = pick(|f| &f.genre).unwrap_or_else(|| UNKNOWN_GENRE.to_string());
    let track_number = pick(|f| &f.track_number)
        .map(|t| coerce_track_number(&t))
        .unwrap_or(0);

    TagBag {
        title,
        track_artist,
        album_artist,
        album,
        genre,
        duration_sec: raw.playtime_seconds.map(round_seconds).unwrap_or(0),
        track_number,
        cover: raw.picture,
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn round_seconds(seconds: f64) -> i64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as i64
    } else {
        0
    }
}

/// Integer coercion of a track tag: leading digits only ("3/12" → 3), else 0
pub fn coerce_track_number(raw: &str) -> i64 {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Production tag reader backed by `lofty`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError> {
        let read_error = |e: lofty::error::LoftyError| MetadataError::ReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let tagged_file = Probe::open(path)
            .map_err(read_error)?
            .read()
            .map_err(read_error)?;

        let vorbis = tagged_file.tag(TagType::VorbisComments);
        let id3 = tagged_file.tag(TagType::Id3v2);

        // First embedded picture, preferring the same containers as text fields
        let picture = vorbis
            .into_iter()
            .chain(id3)
            .chain(tagged_file.tags().iter())
            .find_map(|tag| tag.pictures().first())
            .map(cover_from_picture);

        Ok(RawTags {
            vorbis: vorbis.map(fields_from_tag),
            id3: id3.map(fields_from_tag),
            playtime_seconds: Some(tagged_file.properties().duration().as_secs_f64()),
            picture,
        })
    }
}

fn fields_from_tag(tag: &Tag) -> TagFields {
    TagFields {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album_artist: tag.get_string(&ItemKey::AlbumArtist).map(str::to_string),
        album: tag.album().map(|s| s.to_string()),
        genre: tag.genre().map(|s| s.to_string()),
        track_number: tag
            .get_string(&ItemKey::TrackNumber)
            .map(str::to_string)
            .or_else(|| tag.track().map(|t| t.to_string())),
    }
}

fn cover_from_picture(picture: &Picture) -> CoverImage {
    CoverImage {
        mime_type: picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_PICTURE_MIME.to_string()),
        data: picture.data().to_vec(),
    }
}
