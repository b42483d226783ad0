//! Error types for `playlog-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The epoch-millisecond timestamp cannot be represented as a calendar
  /// date (outside chrono's supported range).
  #[error("timestamp out of range: {0} ms")]
  TimestampOutOfRange(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
