//! Run configuration for the playlog binary.
//!
//! Loaded from `config.toml` plus `PLAYLOG_*` environment overrides; every
//! field has a default so a bare run against the conventional `data/`
//! layout needs no file at all.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EtlConfig {
  /// SQLite database file backing the warehouse.
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,

  /// Root of the song-metadata files (one JSON record per file).
  #[serde(default = "default_song_data_dir")]
  pub song_data_dir: PathBuf,

  /// Root of the activity-log files (one JSON record per line).
  #[serde(default = "default_log_data_dir")]
  pub log_data_dir: PathBuf,
}

impl Default for EtlConfig {
  fn default() -> Self {
    Self {
      database_path: default_database_path(),
      song_data_dir: default_song_data_dir(),
      log_data_dir:  default_log_data_dir(),
    }
  }
}

fn default_database_path() -> PathBuf { PathBuf::from("playlog.db") }

fn default_song_data_dir() -> PathBuf { PathBuf::from("data/song_data") }

fn default_log_data_dir() -> PathBuf { PathBuf::from("data/log_data") }
