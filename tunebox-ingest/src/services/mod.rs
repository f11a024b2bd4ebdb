//! Ingestion services
//!
//! Leaf-first: scanner, tag extraction, name normalization, catalog, cover
//! art, get-or-create resolvers, song assembly and the pipeline tying them
//! together.

pub mod catalog;
pub mod cover_art;
pub mod file_scanner;
pub mod ingest_pipeline;
pub mod name_normalizer;
pub mod resolver;
pub mod song_assembler;
pub mod tag_extractor;

pub use catalog::Catalog;
pub use cover_art::{CoverArtError, CoverArtStore};
pub use file_scanner::{FileScanner, ScanError};
pub use ingest_pipeline::{artist_names, FileFailure, IngestSummary, Ingestor};
pub use name_normalizer::normalize_artist_name;
pub use resolver::{resolve_album, resolve_artist, Resolved};
pub use tag_extractor::{
    CoverImage, LoftyTagReader, MetadataError, RawTags, TagBag, TagExtractor, TagFields, TagReader,
};
