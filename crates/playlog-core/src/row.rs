//! Row types for the five warehouse tables.
//!
//! These are the normalized tuples the extractors emit and the sink
//! persists. Column order in the structs matches the column order of the
//! prepared statements in the store, so a row can be read top-to-bottom
//! against its INSERT.

use chrono::{DateTime, Datelike, Timelike};

use crate::error::{Error, Result};

// ─── Dimension rows ──────────────────────────────────────────────────────────

/// One row of the `songs` dimension table.
///
/// Keyed by the composite (song_id, title, duration); re-inserting the same
/// key is a no-op at the sink, so the first-seen `year` wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
  pub song_id:   String,
  pub title:     String,
  pub artist_id: String,
  pub year:      Option<i32>,
  pub duration:  f64,
}

/// One row of the `artists` dimension table, keyed by `artist_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
  pub artist_id: String,
  pub name:      String,
  pub location:  Option<String>,
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

/// One row of the `users` dimension table, keyed by `user_id`.
///
/// `level` is the one mutable attribute: a user moves between "free" and
/// "paid" over time, and the table reflects the most recently loaded value.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
  pub user_id:    i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub gender:     Option<String>,
  pub level:      String,
}

/// One row of the `time` dimension table: a start-time timestamp broken out
/// into calendar fields, keyed by the timestamp itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
  /// Epoch milliseconds, as found in the log's `ts` field.
  pub start_time: i64,
  pub hour:       u32,
  pub day:        u32,
  /// ISO 8601 week of year (1..=53).
  pub week:       u32,
  pub month:      u32,
  pub year:       i32,
  /// Day of week, Monday = 0 .. Sunday = 6.
  pub weekday:    u8,
}

impl TimeRow {
  /// Derive all calendar fields from an epoch-millisecond timestamp (UTC).
  ///
  /// Pure and integer-only so that no floating point ever leaks into the
  /// `start_time` key.
  pub fn from_epoch_ms(ts: i64) -> Result<Self> {
    let dt = DateTime::from_timestamp_millis(ts)
      .ok_or(Error::TimestampOutOfRange(ts))?;

    Ok(Self {
      start_time: ts,
      hour:       dt.hour(),
      day:        dt.day(),
      week:       dt.iso_week().week(),
      month:      dt.month(),
      year:       dt.year(),
      weekday:    dt.weekday().num_days_from_monday() as u8,
    })
  }
}

// ─── Fact rows ───────────────────────────────────────────────────────────────

/// One candidate row of the `songplays` fact table.
///
/// The `song`/`artist`/`length` triple is carried raw: the sink resolves it
/// against songs⋈artists at load time and binds NULL foreign keys on a miss.
/// The surrogate `songplay_id` is assigned by the sink on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRow {
  pub start_time: i64,
  pub user_id:    i64,
  pub level:      String,
  pub session_id: i64,
  pub location:   Option<String>,
  pub user_agent: Option<String>,

  /// Song title as logged, for the dimension lookup.
  pub song:   Option<String>,
  /// Artist name as logged, for the dimension lookup.
  pub artist: Option<String>,
  /// Play length in seconds, matched exactly against `songs.duration`.
  pub length: Option<f64>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
