//! Song-metadata extractor.
//!
//! One input file holds one JSON object describing a song and its artist.
//! Every file yields exactly one [`SongRow`] and one [`ArtistRow`]
//! candidate; first-write-wins dedup happens at the sink.

use playlog_core::{
  row::{ArtistRow, SongRow},
  warehouse::SongRecord,
};
use serde::Deserialize;

use crate::error::{Error, Result};

// ─── Raw document shape ──────────────────────────────────────────────────────

/// The song-metadata document as found on disk. Everything is optional
/// here; required-field validation happens in [`extract_song`] so a missing
/// field surfaces as a structured error naming the field, not as a generic
/// deserialisation failure.
#[derive(Debug, Deserialize)]
struct RawSong {
  song_id:          Option<String>,
  title:            Option<String>,
  artist_id:        Option<String>,
  year:             Option<i32>,
  duration:         Option<f64>,
  artist_name:      Option<String>,
  artist_location:  Option<String>,
  artist_latitude:  Option<f64>,
  artist_longitude: Option<f64>,
}

// ─── Extraction ──────────────────────────────────────────────────────────────

/// Extract one song row and one artist row from a song-metadata document.
///
/// Required fields: `song_id`, `title`, `artist_id`, `duration`, and
/// `artist_name` (the artists table declares the name NOT NULL; catching
/// its absence here beats a constraint violation mid-transaction).
/// `year` and the artist location/coordinate fields may be absent.
pub fn extract_song(input: &str) -> Result<SongRecord> {
  let raw: RawSong = serde_json::from_str(input)
    .map_err(|source| Error::Json { record: 0, source })?;

  let song_id = required(raw.song_id, "song_id")?;
  let title = required(raw.title, "title")?;
  let artist_id = required(raw.artist_id, "artist_id")?;
  let duration = raw.duration.ok_or(Error::MissingField {
    record: 0,
    field:  "duration",
  })?;
  let artist_name = required(raw.artist_name, "artist_name")?;

  Ok(SongRecord {
    song:   SongRow {
      song_id,
      title,
      artist_id: artist_id.clone(),
      year: raw.year,
      duration,
    },
    artist: ArtistRow {
      artist_id,
      name: artist_name,
      location: raw.artist_location,
      latitude: raw.artist_latitude,
      longitude: raw.artist_longitude,
    },
  })
}

/// A required string field must be present and non-empty.
fn required(value: Option<String>, field: &'static str) -> Result<String> {
  match value {
    Some(s) if !s.trim().is_empty() => Ok(s),
    _ => Err(Error::MissingField { record: 0, field }),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
