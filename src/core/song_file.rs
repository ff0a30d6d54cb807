//! Catalog-file transformer: one source file becomes one song row and one
//! artist row.

use crate::core::loader::FileTransformer;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::song::SongRecord;
use rusqlite::Transaction;
use std::fs;
use std::path::Path;

pub struct SongFileTransformer;

impl FileTransformer for SongFileTransformer {
    fn label(&self) -> &'static str {
        "catalog"
    }

    fn process(&self, tx: &Transaction, path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)?;

        // A catalog file holds exactly one top-level record; trailing lines
        // are ignored.
        let line = content
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| AppError::MalformedRecord(format!("{}: empty file", path.display())))?;

        let rec: SongRecord = serde_json::from_str(line)
            .map_err(|e| AppError::MalformedRecord(format!("{}: {}", path.display(), e)))?;

        // Song first, then artist: the fixed insert order for this file kind.
        queries::insert_song(tx, &rec)?;
        queries::insert_artist(tx, &rec)?;

        Ok(())
    }
}
