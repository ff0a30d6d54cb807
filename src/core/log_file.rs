//! Log-file transformer: filter play actions, expand the time dimension,
//! upsert users, then write one fact row per play.

use crate::core::loader::FileTransformer;
use crate::core::lookup;
use crate::core::time_dim::TimeRow;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::play::{PlayEvent, RawPlayRecord};
use rusqlite::Transaction;
use std::fs;
use std::path::Path;

pub struct LogFileTransformer {
    /// Action-type marker a record must carry to count as a play.
    pub play_action: String,
}

impl LogFileTransformer {
    pub fn new(play_action: &str) -> Self {
        Self {
            play_action: play_action.to_string(),
        }
    }

    /// Parse and filter a log file into validated play events, keyed by their
    /// zero-based line position (which becomes `play_id`).
    fn read_plays(&self, path: &Path) -> AppResult<Vec<(usize, PlayEvent)>> {
        let content = fs::read_to_string(path)?;

        let mut plays = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let raw: RawPlayRecord = serde_json::from_str(line).map_err(|e| {
                AppError::MalformedRecord(format!("{}:{}: {}", path.display(), lineno + 1, e))
            })?;

            if !raw.is_play(&self.play_action) {
                continue;
            }

            let ev = raw.into_event().map_err(|reason| {
                AppError::MalformedRecord(format!("{}:{}: {}", path.display(), lineno + 1, reason))
            })?;
            plays.push((lineno, ev));
        }

        Ok(plays)
    }
}

impl FileTransformer for LogFileTransformer {
    fn label(&self) -> &'static str {
        "log"
    }

    /// Insert order within one file is a contract: every time row and every
    /// user row lands before the first fact row, so a committed fact always
    /// has its time dimension in place.
    fn process(&self, tx: &Transaction, path: &Path) -> AppResult<()> {
        let plays = self.read_plays(path)?;

        // 1) time dimension, one row per play timestamp, in file order
        for (_, ev) in &plays {
            queries::insert_time_row(tx, &TimeRow::derive(ev.ts))?;
        }

        // 2) user dimension, last write wins on duplicate user_id
        for (_, ev) in &plays {
            queries::insert_user(tx, ev)?;
        }

        // 3) fact rows, resolving the catalog lookup per record
        for (lineno, ev) in &plays {
            let key = lookup::resolve(tx, &ev.song, &ev.artist, ev.duration)?;
            queries::insert_songplay(tx, *lineno as i64, ev, key.as_ref())?;
        }

        Ok(())
    }
}
