//! playlog binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite warehouse, and runs the two load passes in order: song metadata
//! first, then activity logs. `--reset` drops and recreates the schema
//! before loading — the destructive reset that normal runs never perform.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use playlog_core::warehouse::Warehouse as _;
use playlog_store_sqlite::SqliteWarehouse;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::EtlConfig;

mod config;
mod run;
mod walk;

#[derive(Parser)]
#[command(author, version, about = "playlog song-play warehouse loader")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Drop and recreate the warehouse schema before loading.
  #[arg(long)]
  reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = ::config::Config::builder()
    .add_source(::config::File::from(cli.config).required(false))
    .add_source(::config::Environment::with_prefix("PLAYLOG"))
    .build()
    .context("failed to read config file")?;

  let etl_cfg: EtlConfig = settings
    .try_deserialize()
    .context("failed to deserialise EtlConfig")?;

  // Open the warehouse.
  let store = SqliteWarehouse::open(&etl_cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open warehouse at {:?}", etl_cfg.database_path)
    })?;

  if cli.reset {
    tracing::warn!("resetting warehouse schema");
    store.drop_schema().await.context("failed to drop schema")?;
    store
      .create_schema()
      .await
      .context("failed to recreate schema")?;
  }

  // Song pass must commit before the log pass runs: the songplay lookups
  // expect the dimension rows to already be present.
  run::run_song_pass(&store, &etl_cfg.song_data_dir).await?;
  let stats = run::run_log_pass(&store, &etl_cfg.log_data_dir).await?;
  tracing::info!(
    "{} plays loaded, {} matched a song/artist pair",
    stats.plays,
    stats.matched
  );

  let counts = store.table_counts().await?;
  tracing::info!(
    "warehouse totals: songplays={} users={} songs={} artists={} time={}",
    counts.songplays,
    counts.users,
    counts.songs,
    counts.artists,
    counts.time
  );

  Ok(())
}
