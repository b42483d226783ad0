//! Activity-log extractor.
//!
//! One input file holds a sequence of user-event records, one JSON object
//! per line. Only `page == "NextSong"` events describe a song play; all
//! other pages are dropped. Each retained event contributes one time row,
//! one user row, and one play row to the batch. Any per-record failure
//! fails the whole document, so a half-extracted file never reaches the
//! sink.

use playlog_core::{
  row::{PlayRow, TimeRow, UserRow},
  warehouse::EventBatch,
};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

const NEXT_SONG: &str = "NextSong";

// ─── Raw record shape ────────────────────────────────────────────────────────

/// One log line as found on disk. All fields optional; `page` and (for
/// retained records) `ts`, `userId`, `level`, `sessionId` are validated in
/// [`extract_events`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
  ts:   Option<i64>,
  page: Option<String>,

  #[serde(default, deserialize_with = "de_user_id")]
  user_id:    Option<i64>,
  first_name: Option<String>,
  last_name:  Option<String>,
  gender:     Option<String>,
  level:      Option<String>,

  song:   Option<String>,
  artist: Option<String>,
  length: Option<f64>,

  session_id: Option<i64>,
  location:   Option<String>,
  user_agent: Option<String>,
}

/// `userId` appears both as a JSON number and as a numeric string in real
/// log fixtures; logged-out events carry the empty string. Accept all
/// three, mapping the empty string to absent.
fn de_user_id<'de, D>(de: D) -> std::result::Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Int(i64),
    Str(String),
  }

  match Option::<Raw>::deserialize(de)? {
    None => Ok(None),
    Some(Raw::Int(n)) => Ok(Some(n)),
    Some(Raw::Str(s)) => {
      let s = s.trim();
      if s.is_empty() {
        Ok(None)
      } else {
        s.parse().map(Some).map_err(|_| {
          <D::Error as serde::de::Error>::custom(format!("non-numeric userId: {s:?}"))
        })
      }
    }
  }
}

// ─── Extraction ──────────────────────────────────────────────────────────────

/// Extract time, user, and play rows from a newline-delimited log document.
///
/// Blank lines are skipped. A record that fails to parse, lacks `page`, or
/// — once retained by the `NextSong` filter — lacks `ts`, `userId`,
/// `level`, or `sessionId` fails the whole extraction with its record
/// index. Duplicate timestamps and user ids across records are expected;
/// the sink's conflict rules resolve them.
pub fn extract_events(input: &str) -> Result<EventBatch> {
  let mut batch = EventBatch::default();

  for (record, line) in input.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }

    let raw: RawEvent = serde_json::from_str(line)
      .map_err(|source| Error::Json { record, source })?;

    let page = raw
      .page
      .as_deref()
      .ok_or(Error::MissingField { record, field: "page" })?;
    if page != NEXT_SONG {
      continue;
    }

    let ts = raw.ts.ok_or(Error::MissingField { record, field: "ts" })?;
    let time = TimeRow::from_epoch_ms(ts)
      .map_err(|_| Error::TimestampOutOfRange { record, ts })?;

    let user_id = raw
      .user_id
      .ok_or(Error::MissingField { record, field: "userId" })?;
    let level = raw
      .level
      .ok_or(Error::MissingField { record, field: "level" })?;
    let session_id = raw
      .session_id
      .ok_or(Error::MissingField { record, field: "sessionId" })?;

    batch.time.push(time);
    batch.users.push(UserRow {
      user_id,
      first_name: raw.first_name,
      last_name: raw.last_name,
      gender: raw.gender,
      level: level.clone(),
    });
    batch.plays.push(PlayRow {
      start_time: ts,
      user_id,
      level,
      session_id,
      location: raw.location,
      user_agent: raw.user_agent,
      song: raw.song,
      artist: raw.artist,
      length: raw.length,
    });
  }

  Ok(batch)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn next_song_line(ts: i64, user_id: &str, level: &str) -> String {
    format!(
      r#"{{"ts":{ts},"page":"NextSong","userId":{user_id},"firstName":"Lily","lastName":"Koch","gender":"F","level":"{level}","song":"Home","artist":"Edward Sharpe & The Magnetic Zeros","length":251.21914,"sessionId":182,"location":"Chicago-Naperville-Elgin, IL-IN-WI","userAgent":"Mozilla/5.0"}}"#
    )
  }

  // ── Filtering ──────────────────────────────────────────────────────────

  #[test]
  fn non_next_song_pages_produce_no_rows() {
    let input = [
      r#"{"ts":1541105830796,"page":"Home","userId":"39"}"#,
      r#"{"ts":1541106106796,"page":"Login","userId":""}"#,
      r#"{"ts":1541106352796,"page":"Logout","userId":"39"}"#,
    ]
    .join("\n");

    let batch = extract_events(&input).unwrap();
    assert!(batch.is_empty());
    assert!(batch.time.is_empty());
    assert!(batch.users.is_empty());
  }

  #[test]
  fn one_row_of_each_kind_per_retained_record() {
    let input = [
      next_song_line(1_541_105_830_796, "\"39\"", "free"),
      r#"{"ts":1541106106796,"page":"Home","userId":"39"}"#.to_string(),
      next_song_line(1_541_106_352_796, "\"39\"", "free"),
      next_song_line(1_541_107_053_796, "8", "free"),
    ]
    .join("\n");

    let batch = extract_events(&input).unwrap();
    assert_eq!(batch.time.len(), 3);
    assert_eq!(batch.users.len(), 3);
    assert_eq!(batch.plays.len(), 3);
  }

  #[test]
  fn empty_document_yields_empty_batch() {
    let batch = extract_events("").unwrap();
    assert!(batch.is_empty());
  }

  #[test]
  fn blank_lines_are_skipped() {
    let input = format!("\n{}\n\n", next_song_line(1_541_105_830_796, "39", "paid"));
    let batch = extract_events(&input).unwrap();
    assert_eq!(batch.plays.len(), 1);
  }

  // ── Field handling ─────────────────────────────────────────────────────

  #[test]
  fn rows_carry_the_logged_values() {
    let batch =
      extract_events(&next_song_line(1_542_298_745_796, "\"15\"", "paid")).unwrap();

    let time = &batch.time[0];
    assert_eq!(time.start_time, 1_542_298_745_796);
    assert_eq!(time.hour, 16);

    let user = &batch.users[0];
    assert_eq!(user.user_id, 15);
    assert_eq!(user.first_name.as_deref(), Some("Lily"));
    assert_eq!(user.level, "paid");

    let play = &batch.plays[0];
    assert_eq!(play.start_time, 1_542_298_745_796);
    assert_eq!(play.user_id, 15);
    assert_eq!(play.session_id, 182);
    assert_eq!(play.song.as_deref(), Some("Home"));
    assert_eq!(play.length, Some(251.21914));
  }

  #[test]
  fn user_id_accepts_number_and_numeric_string() {
    let input = [
      next_song_line(1, "26", "free"),
      next_song_line(2, "\"26\"", "free"),
    ]
    .join("\n");
    let batch = extract_events(&input).unwrap();
    assert!(batch.users.iter().all(|u| u.user_id == 26));
  }

  // ── Errors ─────────────────────────────────────────────────────────────

  #[test]
  fn malformed_line_reports_its_index() {
    let input = [
      next_song_line(1, "39", "free"),
      "{ definitely not json".to_string(),
    ]
    .join("\n");

    let err = extract_events(&input).unwrap_err();
    assert!(matches!(err, Error::Json { record: 1, .. }), "got {err:?}");
  }

  #[test]
  fn missing_page_is_an_error_even_when_not_retained() {
    let input = r#"{"ts":1541105830796,"userId":"39"}"#;
    let err = extract_events(input).unwrap_err();
    assert!(matches!(err, Error::MissingField { record: 0, field: "page" }));
  }

  #[test]
  fn retained_record_without_ts_errors() {
    let input = r#"{"page":"NextSong","userId":"39","level":"free","sessionId":1}"#;
    let err = extract_events(input).unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "ts", .. }));
  }

  #[test]
  fn retained_record_with_empty_user_id_errors() {
    let input = r#"{"ts":1541105830796,"page":"NextSong","userId":"","level":"free","sessionId":1}"#;
    let err = extract_events(input).unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "userId", .. }));
  }

  #[test]
  fn dropped_record_without_ts_is_fine() {
    // Only retained records need a timestamp.
    let input = r#"{"page":"Home","userId":"39"}"#;
    let batch = extract_events(input).unwrap();
    assert!(batch.is_empty());
  }

  #[test]
  fn failure_mid_file_discards_earlier_rows() {
    let input = [
      next_song_line(1, "39", "free"),
      r#"{"ts":2,"page":"NextSong","userId":"39","sessionId":7}"#.to_string(),
    ]
    .join("\n");

    // The first record was fine, but extraction is all-or-nothing.
    let err = extract_events(&input).unwrap_err();
    assert!(matches!(err, Error::MissingField { record: 1, field: "level" }));
  }
}
