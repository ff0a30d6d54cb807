//! Batch loader: apply a transformer to every file under a root path,
//! one transaction (and one commit) per file.

use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::fs::list_json_files;
use rusqlite::{Connection, Transaction};
use std::path::Path;

/// A per-file load unit. Implementations read one source file and issue its
/// inserts against the open transaction; the loader owns commit and rollback.
pub trait FileTransformer {
    /// Short label for progress output ("catalog", "log").
    fn label(&self) -> &'static str;

    fn process(&self, tx: &Transaction, path: &Path) -> AppResult<()>;
}

/// Explicit per-file result. A failed file never crashes the batch by
/// itself; the loader decides continue-vs-abort from this value and the
/// configured policy.
#[derive(Debug)]
pub enum FileOutcome {
    Loaded,
    /// Parse failure or missing required field. The file's transaction was
    /// rolled back; no partial rows remain.
    Malformed(String),
    /// The destination store rejected a write (or the file was unreadable).
    StoreError(String),
}

impl FileOutcome {
    fn from_error(err: &AppError) -> Self {
        match err {
            AppError::MalformedRecord(reason) => FileOutcome::Malformed(reason.clone()),
            other => FileOutcome::StoreError(other.to_string()),
        }
    }
}

/// Counters for one directory pass.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub found: usize,
    pub loaded: usize,
    pub malformed: usize,
    pub store_errors: usize,
}

impl LoadReport {
    pub fn failed(&self) -> usize {
        self.malformed + self.store_errors
    }
}

/// Process every `.json` file under `root` with `transformer`.
///
/// Each file runs inside its own transaction; the commit after a successful
/// file is the durability checkpoint. With `strict` set, the first failed
/// file aborts the batch; otherwise the failure is reported and the batch
/// moves on to the next file.
pub fn process_dir(
    conn: &mut Connection,
    root: &Path,
    transformer: &dyn FileTransformer,
    strict: bool,
) -> AppResult<LoadReport> {
    let files = list_json_files(root)?;

    let mut report = LoadReport {
        found: files.len(),
        ..LoadReport::default()
    };

    messages::info(format!(
        "{} {} files found in {}",
        report.found,
        transformer.label(),
        root.display()
    ));

    for (i, file) in files.iter().enumerate() {
        let result = load_one(conn, transformer, file);

        let outcome = match result {
            Ok(()) => FileOutcome::Loaded,
            Err(e) if strict => return Err(e),
            Err(e) => FileOutcome::from_error(&e),
        };

        match &outcome {
            FileOutcome::Loaded => report.loaded += 1,
            FileOutcome::Malformed(reason) => {
                report.malformed += 1;
                messages::warning(format!("skipped: {}", reason));
            }
            FileOutcome::StoreError(reason) => {
                report.store_errors += 1;
                messages::warning(format!("failed: {}", reason));
            }
        }

        println!("{}/{} files processed.", i + 1, report.found);
    }

    Ok(report)
}

/// Run one file inside its own transaction. On any error the transaction is
/// dropped uncommitted, so the file's rows are rolled back atomically.
fn load_one(
    conn: &mut Connection,
    transformer: &dyn FileTransformer,
    path: &Path,
) -> AppResult<()> {
    let tx = conn.transaction()?;
    transformer.process(&tx, path)?;
    tx.commit()?;
    Ok(())
}
