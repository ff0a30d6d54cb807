use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the star schema.
/// Safe to call on every run: all statements are `IF NOT EXISTS`.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS songs (
            song_id   TEXT PRIMARY KEY,
            title     TEXT NOT NULL,
            artist_id TEXT NOT NULL,
            year      INTEGER,
            duration  REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS artists (
            artist_id TEXT PRIMARY KEY,
            name      TEXT NOT NULL,
            location  TEXT,
            latitude  REAL,
            longitude REAL
        );

        CREATE TABLE IF NOT EXISTS time (
            start_time TEXT PRIMARY KEY,  -- RFC 3339 UTC, millisecond precision
            hour       INTEGER NOT NULL,
            day        INTEGER NOT NULL,
            week       INTEGER NOT NULL,
            month      INTEGER NOT NULL,
            year       INTEGER NOT NULL,
            weekday    INTEGER NOT NULL   -- 0 = Monday .. 6 = Sunday
        );

        CREATE TABLE IF NOT EXISTS users (
            user_id    TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name  TEXT NOT NULL,
            gender     TEXT NOT NULL,
            level      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS songplays (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            play_id    INTEGER NOT NULL,  -- line position within the source file
            start_time TEXT NOT NULL,
            user_id    TEXT NOT NULL,
            level      TEXT NOT NULL,
            song_id    TEXT,
            artist_id  TEXT,
            session_id INTEGER NOT NULL,
            location   TEXT,
            user_agent TEXT
        );
        ",
    )?;
    Ok(())
}
