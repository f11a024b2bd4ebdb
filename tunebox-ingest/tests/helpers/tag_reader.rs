//! In-memory tag reader
//!
//! Serves prepared tag sets by file name, so pipeline tests run over empty
//! placeholder files instead of real audio.

use std::collections::HashMap;
use std::path::Path;
use tunebox_ingest::services::{MetadataError, RawTags, TagFields, TagReader};

#[derive(Debug, Clone, Default)]
pub struct FakeTagReader {
    tags: HashMap<String, RawTags>,
}

impl FakeTagReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags returned for any file with this name; unknown names fail to decode
    pub fn with(mut self, file_name: &str, raw: RawTags) -> Self {
        self.tags.insert(file_name.to_string(), raw);
        self
    }
}

impl TagReader for FakeTagReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.tags
            .get(&name)
            .cloned()
            .ok_or_else(|| MetadataError::ReadError {
                path: path.display().to_string(),
                reason: "no tags prepared".to_string(),
            })
    }
}

/// Vorbis-only tag set
pub fn tagged(
    title: &str,
    artist: &str,
    album_artist: Option<&str>,
    album: &str,
    track: &str,
) -> RawTags {
    RawTags {
        vorbis: Some(TagFields {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            album_artist: album_artist.map(str::to_string),
            album: Some(album.to_string()),
            genre: Some("Pop".to_string()),
            track_number: Some(track.to_string()),
        }),
        id3: None,
        playtime_seconds: Some(200.4),
        picture: None,
    }
}
