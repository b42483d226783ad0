//! Record extractors for the playlog loader.
//!
//! Converts raw JSON documents into [`playlog_core`] row types. Pure and
//! synchronous; no file system or database dependencies. The sink's
//! conflict rules handle deduplication, so the extractors never filter
//! duplicates — only non-`NextSong` log records.
//!
//! # Quick start
//!
//! ```no_run
//! let doc = r#"{"song_id":"S1","title":"Home","artist_id":"A1",
//!              "duration":251.2,"artist_name":"Edward Sharpe"}"#;
//! let record = playlog_extract::extract_song(doc).unwrap();
//! println!("{} by {}", record.song.title, record.artist.name);
//! ```

pub mod error;
mod log;
mod song;

pub use error::{Error, Result};
pub use log::extract_events;
pub use song::extract_song;
