//! Source-file enumeration for the batch loader.

use crate::errors::AppResult;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List every `.json` file under `root`, recursing through subdirectories.
///
/// Paths come back sorted so a batch run is deterministic on every platform.
/// A missing root or a directory with no matching files yields an empty
/// vector, not an error: an empty dataset is a valid (if pointless) run.
pub fn list_json_files(root: &Path) -> AppResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
