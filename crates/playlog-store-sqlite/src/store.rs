//! [`SqliteWarehouse`] — the SQLite implementation of [`Warehouse`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use playlog_core::warehouse::{
  EventBatch, LoadStats, SongArtistIds, SongRecord, TableCounts, Warehouse,
};

use crate::{
  Error, Result,
  schema::{
    DROP_SCHEMA, INSERT_ARTIST, INSERT_SONG, INSERT_SONGPLAY, INSERT_TIME,
    INSERT_USER, SCHEMA, SELECT_SONG_ARTIST,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A playlog warehouse backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteWarehouse {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteWarehouse {
  /// Open (or create) a warehouse at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.create_schema().await?;
    Ok(store)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.create_schema().await?;
    Ok(store)
  }
}

// ─── Warehouse impl ──────────────────────────────────────────────────────────

impl Warehouse for SqliteWarehouse {
  type Error = Error;

  // ── Schema ─────────────────────────────────────────────────────────────────

  async fn create_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn drop_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Loads ──────────────────────────────────────────────────────────────────

  async fn load_song_record(&self, record: SongRecord) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          INSERT_SONG,
          rusqlite::params![
            record.song.song_id,
            record.song.title,
            record.song.artist_id,
            record.song.year,
            record.song.duration,
          ],
        )?;

        tx.execute(
          INSERT_ARTIST,
          rusqlite::params![
            record.artist.artist_id,
            record.artist.name,
            record.artist.location,
            record.artist.latitude,
            record.artist.longitude,
          ],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn load_event_batch(&self, batch: EventBatch) -> Result<LoadStats> {
    let stats = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut stats = LoadStats::default();

        {
          let mut insert_time = tx.prepare(INSERT_TIME)?;
          for t in &batch.time {
            insert_time.execute(rusqlite::params![
              t.start_time,
              t.hour,
              t.day,
              t.week,
              t.month,
              t.year,
              t.weekday,
            ])?;
          }

          let mut insert_user = tx.prepare(INSERT_USER)?;
          for u in &batch.users {
            insert_user.execute(rusqlite::params![
              u.user_id,
              u.first_name,
              u.last_name,
              u.gender,
              u.level,
            ])?;
          }

          let mut lookup = tx.prepare(SELECT_SONG_ARTIST)?;
          let mut insert_play = tx.prepare(INSERT_SONGPLAY)?;
          for p in &batch.plays {
            // A play with an incomplete lookup triple is unmatched by
            // definition; only a complete triple hits the join.
            let ids: Option<(String, String)> =
              match (&p.song, &p.artist, p.length) {
                (Some(song), Some(artist), Some(length)) => lookup
                  .query_row(rusqlite::params![song, artist, length], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                  })
                  .optional()?,
                _ => None,
              };

            if ids.is_some() {
              stats.matched += 1;
            }
            let (song_id, artist_id) = match ids {
              Some((s, a)) => (Some(s), Some(a)),
              None => (None, None),
            };

            insert_play.execute(rusqlite::params![
              p.start_time,
              p.user_id,
              p.level,
              song_id,
              artist_id,
              p.session_id,
              p.location,
              p.user_agent,
            ])?;
            stats.plays += 1;
          }
        }

        tx.commit()?;
        Ok(stats)
      })
      .await?;
    Ok(stats)
  }

  // ── Reads ──────────────────────────────────────────────────────────────────

  async fn lookup_song_artist<'a>(
    &'a self,
    title: &'a str,
    artist_name: &'a str,
    duration: f64,
  ) -> Result<Option<SongArtistIds>> {
    let title = title.to_owned();
    let artist_name = artist_name.to_owned();

    let ids = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              SELECT_SONG_ARTIST,
              rusqlite::params![title, artist_name, duration],
              |row| {
                Ok(SongArtistIds {
                  song_id:   row.get(0)?,
                  artist_id: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(ids)
  }

  async fn table_counts(&self) -> Result<TableCounts> {
    let counts = self
      .conn
      .call(|conn| {
        let count = |table: &str| -> std::result::Result<u64, tokio_rusqlite::Error> {
          // Table names come from the fixed list below, never from input.
          let sql = format!("SELECT COUNT(*) FROM {table}");
          Ok(conn.query_row(&sql, [], |row| row.get(0))?)
        };

        Ok(TableCounts {
          songplays: count("songplays")?,
          users:     count("users")?,
          songs:     count("songs")?,
          artists:   count("artists")?,
          time:      count("time")?,
        })
      })
      .await?;

    Ok(counts)
  }
}
