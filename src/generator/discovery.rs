//! Notebook discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NbreqsError, Result};

/// List notebooks directly inside `dir`.
///
/// Only regular files whose extension equals `extension` are returned;
/// subdirectories are not traversed. The result is sorted so runs are
/// reproducible.
///
/// # Errors
///
/// Returns `NotebookDirNotFound` if `dir` is missing or not a directory.
pub fn discover_notebooks(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(NbreqsError::NotebookDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut notebooks = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        // is_file follows symlinks, so linked notebooks count too
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            notebooks.push(path);
        }
    }

    notebooks.sort();
    tracing::debug!(
        "Found {} notebook(s) in {}",
        notebooks.len(),
        dir.display()
    );
    Ok(notebooks)
}
