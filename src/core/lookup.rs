//! Catalog lookup: resolve a play record's natural key to surrogate keys.

use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

/// The surrogate key pair a successful lookup yields. The two ids travel
/// together: a fact row either gets both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongKey {
    pub song_id: String,
    pub artist_id: String,
}

/// Find the catalog entry matching `(title, artist name, duration)`.
///
/// Matching is exact: case-sensitive string equality and exact float
/// equality on duration, no tolerance window. The catalog and the logs are
/// assumed to share identical encodings; when they diverge the lookup misses
/// silently and the caller inserts a null pair. If more than one row matches,
/// any one of them is an acceptable answer.
pub fn resolve(
    conn: &Connection,
    title: &str,
    artist_name: &str,
    duration: f64,
) -> AppResult<Option<SongKey>> {
    let mut stmt = conn.prepare_cached(
        "SELECT s.song_id, s.artist_id
         FROM songs s
         JOIN artists a ON s.artist_id = a.artist_id
         WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
         LIMIT 1",
    )?;

    let key = stmt
        .query_row(params![title, artist_name, duration], |row| {
            Ok(SongKey {
                song_id: row.get(0)?,
                artist_id: row.get(1)?,
            })
        })
        .optional()?;

    Ok(key)
}
