//! The `Warehouse` trait and supporting batch types.
//!
//! The trait is implemented by storage backends (e.g.
//! `playlog-store-sqlite`). The driver in `playlog-cli` depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::row::{ArtistRow, PlayRow, SongRow, TimeRow, UserRow};

// ─── Batch types ─────────────────────────────────────────────────────────────

/// Everything extracted from one song-metadata file: exactly one song row
/// and exactly one artist row, loaded in a single transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
  pub song:   SongRow,
  pub artist: ArtistRow,
}

/// Everything extracted from one activity-log file.
///
/// Rows are loaded in field order — time, then users, then plays — so the
/// dimension rows a play references by timestamp or user id are in place
/// before the fact row lands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
  pub time:  Vec<TimeRow>,
  pub users: Vec<UserRow>,
  pub plays: Vec<PlayRow>,
}

impl EventBatch {
  /// True when the source file had no `NextSong` events at all.
  pub fn is_empty(&self) -> bool { self.plays.is_empty() }
}

// ─── Load results ────────────────────────────────────────────────────────────

/// The ids a play event resolved to in the songs⋈artists join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongArtistIds {
  pub song_id:   String,
  pub artist_id: String,
}

/// Per-batch load outcome, reported by [`Warehouse::load_event_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
  /// Songplay rows appended.
  pub plays:   usize,
  /// How many of those resolved both dimension foreign keys.
  pub matched: usize,
}

/// Row counts per table, for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
  pub songplays: u64,
  pub users:     u64,
  pub songs:     u64,
  pub artists:   u64,
  pub time:      u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational sink the extractors load into.
///
/// Conflict rules are part of this contract, not of the extractors:
/// songs/artists/time ignore duplicate keys, users overwrite `level` only,
/// songplays always append. Each `load_*` call is one transaction,
/// committed before the call returns — the per-file atomicity unit.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait Warehouse: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create the five tables if they do not already exist.
  fn create_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Drop all five tables. Destructive; only the `--reset` path calls it.
  fn drop_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Loads — one transaction per call ──────────────────────────────────

  /// Upsert one song and one artist row (both insert-or-ignore) and
  /// commit.
  fn load_song_record(
    &self,
    record: SongRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Load one log file's batch: all time rows (insert-or-ignore), all
  /// user rows (upsert `level`), then one songplay append per play row,
  /// resolving each play's dimension keys inside the same transaction.
  /// On any failure the whole batch rolls back.
  fn load_event_batch(
    &self,
    batch: EventBatch,
  ) -> impl Future<Output = Result<LoadStats, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Resolve (title, artist name, duration) against songs⋈artists.
  /// Requires an exact match on all three; a miss is `Ok(None)`, which is
  /// normal control flow rather than an error.
  fn lookup_song_artist<'a>(
    &'a self,
    title: &'a str,
    artist_name: &'a str,
    duration: f64,
  ) -> impl Future<Output = Result<Option<SongArtistIds>, Self::Error>> + Send + 'a;

  /// Row counts for all five tables.
  fn table_counts(
    &self,
  ) -> impl Future<Output = Result<TableCounts, Self::Error>> + Send + '_;
}
