//! Error types for the playlog extractors.
//!
//! Every variant carries the zero-based record index within the source
//! document, so a failure inside a multi-line log file is diagnosable.
//! Song-metadata files hold a single record; their errors report index 0.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record {record}: invalid JSON: {source}")]
  Json {
    record: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("record {record}: missing required field `{field}`")]
  MissingField { record: usize, field: &'static str },

  #[error("record {record}: timestamp {ts} ms is out of range")]
  TimestampOutOfRange { record: usize, ts: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
