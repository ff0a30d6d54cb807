//! Parameterized inserts, one function per destination table.
//!
//! Conflict handling lives in the SQL, not in the callers: the catalog and
//! user dimensions replace on re-insert (re-runs and level changes), the time
//! dimension ignores duplicates (the derivation is pure, a duplicate row is
//! identical), and the fact table takes plain inserts.

use crate::core::lookup::SongKey;
use crate::core::time_dim::{self, TimeRow};
use crate::errors::AppResult;
use crate::models::play::PlayEvent;
use crate::models::song::SongRecord;
use rusqlite::{Connection, params};

pub fn insert_song(conn: &Connection, rec: &SongRecord) -> AppResult<()> {
    let (song_id, title, artist_id, year, duration) = rec.song_row();
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO songs (song_id, title, artist_id, year, duration)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![song_id, title, artist_id, year, duration])?;
    Ok(())
}

pub fn insert_artist(conn: &Connection, rec: &SongRecord) -> AppResult<()> {
    let (artist_id, name, location, latitude, longitude) = rec.artist_row();
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO artists (artist_id, name, location, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![artist_id, name, location, latitude, longitude])?;
    Ok(())
}

pub fn insert_time_row(conn: &Connection, row: &TimeRow) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO time (start_time, hour, day, week, month, year, weekday)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    stmt.execute(params![
        time_dim::format_ts(&row.start_time),
        row.hour,
        row.day,
        row.week,
        row.month,
        row.year,
        row.weekday,
    ])?;
    Ok(())
}

/// Last write wins: a later record for the same user carries the current
/// subscription level.
pub fn insert_user(conn: &Connection, ev: &PlayEvent) -> AppResult<()> {
    let (user_id, first_name, last_name, gender, level) = ev.user_row();
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO users (user_id, first_name, last_name, gender, level)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![user_id, first_name, last_name, gender, level])?;
    Ok(())
}

/// `play_id` is the record's line position within its source file, not a
/// global key. `key` is the resolved surrogate pair, or `None` when the
/// catalog lookup missed — both foreign keys go null together.
pub fn insert_songplay(
    conn: &Connection,
    play_id: i64,
    ev: &PlayEvent,
    key: Option<&SongKey>,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO songplays
             (play_id, start_time, user_id, level, song_id, artist_id,
              session_id, location, user_agent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    stmt.execute(params![
        play_id,
        time_dim::format_ts(&ev.ts),
        ev.user_id,
        ev.level,
        key.map(|k| k.song_id.as_str()),
        key.map(|k| k.artist_id.as_str()),
        ev.session_id,
        ev.location,
        ev.user_agent,
    ])?;
    Ok(())
}
