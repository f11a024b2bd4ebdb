//! Test Helper Utilities
//!
//! Shared utilities for testing tunebox-ingest

pub mod audio_generator;
pub mod library;
pub mod tag_reader;

pub use audio_generator::{generate_test_wav, write_id3v2_tags, TestTags};
pub use library::{count_rows, TestLibrary};
pub use tag_reader::{tagged, FakeTagReader};
