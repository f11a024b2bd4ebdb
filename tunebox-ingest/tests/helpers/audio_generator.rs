//! Audio Test Fixture Generator
//!
//! Short WAV files with real ID3v2 tags, for exercising the lofty-backed
//! tag reader end to end.

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::{Accessor, ItemKey, Tag, TagType};
use std::path::Path;

/// Write a mono 16-bit 440 Hz tone of the given length
pub fn generate_test_wav(path: &Path, duration_seconds: f64) -> anyhow::Result<()> {
    let sample_rate = 8000;
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let total_samples = (duration_seconds * sample_rate as f64) as usize;

    for i in 0..total_samples {
        let t = i as f32 / sample_rate as f32;
        let sample = (0.3 * (2.0 * std::f32::consts::PI * 440.0 * t).sin() * i16::MAX as f32) as i16;
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Fields to embed; `None` leaves the frame out
#[derive(Debug, Clone, Default)]
pub struct TestTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub track: Option<(u32, u32)>,
    pub png_cover: Option<Vec<u8>>,
}

/// Attach an ID3v2 tag to an existing audio file
pub fn write_id3v2_tags(path: &Path, tags: &TestTags) -> anyhow::Result<()> {
    let mut tagged_file = lofty::probe::Probe::open(path)?.read()?;

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(title) = &tags.title {
        tag.set_title(title.clone());
    }
    if let Some(artist) = &tags.artist {
        tag.set_artist(artist.clone());
    }
    if let Some(album_artist) = &tags.album_artist {
        tag.insert_text(ItemKey::AlbumArtist, album_artist.clone());
    }
    if let Some(album) = &tags.album {
        tag.set_album(album.clone());
    }
    if let Some(genre) = &tags.genre {
        tag.set_genre(genre.clone());
    }
    if let Some((track, total)) = tags.track {
        tag.set_track(track);
        tag.set_track_total(total);
    }
    if let Some(data) = &tags.png_cover {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Png),
            None,
            data.clone(),
        ));
    }

    tagged_file.insert_tag(tag);
    tagged_file.save_to_path(path, WriteOptions::default())?;
    Ok(())
}
