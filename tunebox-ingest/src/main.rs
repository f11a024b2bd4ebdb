//! tunebox-ingest - Music library ingestion
//!
//! Walks a library folder of audio files and records artists, albums,
//! songs and album covers in the tunebox database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunebox_ingest::config::{resolve_ingest_config, ConfigOverrides};
use tunebox_ingest::services::{Ingestor, LoftyTagReader};

/// Command-line arguments for tunebox-ingest
#[derive(Parser, Debug)]
#[command(name = "tunebox-ingest")]
#[command(about = "Ingest a music library into the tunebox catalog")]
#[command(version)]
struct Args {
    /// Config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root folder for default library, covers and database locations
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Folder to scan
    #[arg(long, env = "TUNEBOX_LIBRARY_DIR")]
    library_dir: Option<PathBuf>,

    /// Folder cover images are written to
    #[arg(long, env = "TUNEBOX_COVERS_DIR")]
    covers_dir: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "TUNEBOX_DATABASE")]
    database: Option<PathBuf>,

    /// Audio file name suffix, e.g. ".flac"
    #[arg(long)]
    extension: Option<String>,

    /// Skip files whose path already has a song
    #[arg(long)]
    skip_existing: bool,

    /// Log filter (overrides RUST_LOG), e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = tunebox_common::config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    let filter = match args.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("Invalid log level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(toml_config.logging.level.as_deref().unwrap_or("info"))
        }),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tunebox-ingest v{}", env!("CARGO_PKG_VERSION"));

    let root = tunebox_common::config::resolve_root_folder(args.root.as_deref(), &toml_config);
    info!("Root folder: {}", root.display());

    let overrides = ConfigOverrides {
        library_dir: args.library_dir,
        covers_dir: args.covers_dir,
        database_path: args.database,
        audio_extension: args.extension,
        skip_existing_paths: args.skip_existing,
    };
    let config = resolve_ingest_config(&overrides, &toml_config, &root);
    info!("Database: {}", config.database_path.display());

    let pool = tunebox_ingest::db::init_database_pool(&config.database_path)
        .await
        .context("Failed to open database")?;

    let mut ingestor = Ingestor::new(pool, config, LoftyTagReader::new());
    let summary = ingestor.run().await.context("Ingestion aborted")?;

    for failure in &summary.failures {
        info!("Not ingested: {} ({})", failure.path.display(), failure.message);
    }

    Ok(())
}
