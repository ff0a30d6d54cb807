//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! One logical connection, passed explicitly to every component that needs
//! it — never a module-level singleton.

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }
}
