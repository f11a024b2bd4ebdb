//! # Tunebox Common Library
//!
//! Shared code for the tunebox crates:
//! - Error type
//! - Configuration loading and root folder resolution
//! - Database initialization (artist/album/song schema)
//! - Time and identifier helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
