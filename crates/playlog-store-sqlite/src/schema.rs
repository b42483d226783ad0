//! SQL for the playlog SQLite warehouse: the five-table schema, its drop
//! counterpart, and every prepared statement the store executes. All
//! INSERT/SELECT text is consolidated here so the conflict rules can be
//! read in one place.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Fact table: strictly append-only. The surrogate key is assigned by the
-- database; song_id/artist_id stay NULL when the dimension lookup misses.
CREATE TABLE IF NOT EXISTS songplays (
    songplay_id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time  INTEGER NOT NULL,
    user_id     INTEGER,
    level       TEXT,
    song_id     TEXT,
    artist_id   TEXT,
    session_id  INTEGER,
    location    TEXT,
    user_agent  TEXT
);

-- level is the one mutable column; see INSERT_USER.
CREATE TABLE IF NOT EXISTS users (
    user_id    INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name  TEXT,
    gender     TEXT,
    level      TEXT
);

-- Composite key: title and duration disambiguate re-used song ids.
CREATE TABLE IF NOT EXISTS songs (
    song_id   TEXT NOT NULL,
    title     TEXT NOT NULL,
    artist_id TEXT NOT NULL,
    year      INTEGER,
    duration  REAL NOT NULL,
    PRIMARY KEY (song_id, title, duration)
);

-- name is deliberately not UNIQUE: distinct artist_ids may share a name.
CREATE TABLE IF NOT EXISTS artists (
    artist_id TEXT PRIMARY KEY,
    name      TEXT NOT NULL,
    location  TEXT,
    latitude  REAL,
    longitude REAL
);

CREATE TABLE IF NOT EXISTS time (
    start_time INTEGER PRIMARY KEY,
    hour       INTEGER NOT NULL,
    day        INTEGER NOT NULL,
    week       INTEGER NOT NULL,
    month      INTEGER NOT NULL,
    year       INTEGER NOT NULL,
    weekday    INTEGER NOT NULL
);
";

/// Destructive reset: drops all five tables.
pub const DROP_SCHEMA: &str = "
DROP TABLE IF EXISTS songplays;
DROP TABLE IF EXISTS users;
DROP TABLE IF EXISTS songs;
DROP TABLE IF EXISTS artists;
DROP TABLE IF EXISTS time;
";

// ─── Upserts ─────────────────────────────────────────────────────────────────

/// First write wins; a later record for the same composite key (possibly
/// with a different year) is ignored.
pub const INSERT_SONG: &str = "
INSERT INTO songs (song_id, title, artist_id, year, duration)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (song_id, title, duration) DO NOTHING";

pub const INSERT_ARTIST: &str = "
INSERT INTO artists (artist_id, name, location, latitude, longitude)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (artist_id) DO NOTHING";

/// Last write wins for `level` only; all other columns keep their
/// first-inserted values.
pub const INSERT_USER: &str = "
INSERT INTO users (user_id, first_name, last_name, gender, level)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (user_id) DO UPDATE SET level = excluded.level";

pub const INSERT_TIME: &str = "
INSERT INTO time (start_time, hour, day, week, month, year, weekday)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT (start_time) DO NOTHING";

/// Unconditional append; songplay_id comes from the database.
pub const INSERT_SONGPLAY: &str = "
INSERT INTO songplays (start_time, user_id, level, song_id, artist_id,
                       session_id, location, user_agent)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// The dimension lookup behind songplay foreign-key resolution. Exact
/// match on all three of (title, artist name, duration).
pub const SELECT_SONG_ARTIST: &str = "
SELECT s.song_id, s.artist_id
FROM songs s
JOIN artists a ON s.artist_id = a.artist_id
WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3";
