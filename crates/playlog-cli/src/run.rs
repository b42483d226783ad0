//! The batch driver: one pass per data root, one commit per file.
//!
//! A pass is fail-fast — the first file that fails to read, extract, or
//! load aborts the pass with the file path in the error chain, and that
//! file's writes never commit. Everything loaded from earlier files stays
//! committed.

use std::{fs, path::Path};

use anyhow::Context as _;
use playlog_core::warehouse::{LoadStats, Warehouse};

use crate::walk::json_files;

/// Load every song-metadata file under `root`. Returns the number of files
/// processed.
pub async fn run_song_pass<W: Warehouse>(
  store: &W,
  root: &Path,
) -> anyhow::Result<usize> {
  let files = json_files(root)
    .with_context(|| format!("failed to walk {}", root.display()))?;
  tracing::info!("{} song files found in {}", files.len(), root.display());

  for (i, file) in files.iter().enumerate() {
    let contents = fs::read_to_string(file)
      .with_context(|| format!("failed to read {}", file.display()))?;
    let record = playlog_extract::extract_song(&contents)
      .with_context(|| format!("failed to extract {}", file.display()))?;
    store
      .load_song_record(record)
      .await
      .with_context(|| format!("failed to load {}", file.display()))?;

    tracing::info!("{}/{} files processed", i + 1, files.len());
  }

  Ok(files.len())
}

/// Load every activity-log file under `root`. Must run after the song pass
/// has committed: the songplay lookups expect the dimension rows to be in
/// place. Returns the aggregated load stats across all files.
pub async fn run_log_pass<W: Warehouse>(
  store: &W,
  root: &Path,
) -> anyhow::Result<LoadStats> {
  let files = json_files(root)
    .with_context(|| format!("failed to walk {}", root.display()))?;
  tracing::info!("{} log files found in {}", files.len(), root.display());

  let mut totals = LoadStats::default();
  for (i, file) in files.iter().enumerate() {
    let contents = fs::read_to_string(file)
      .with_context(|| format!("failed to read {}", file.display()))?;
    let batch = playlog_extract::extract_events(&contents)
      .with_context(|| format!("failed to extract {}", file.display()))?;
    let stats = store
      .load_event_batch(batch)
      .await
      .with_context(|| format!("failed to load {}", file.display()))?;

    totals.plays += stats.plays;
    totals.matched += stats.matched;
    tracing::info!("{}/{} files processed", i + 1, files.len());
  }

  Ok(totals)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
