// src/delete.rs

use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::{Result, StalecheckError};
use crate::fs::FileSystem;
use crate::glob::matched_paths;

/// Files `delete_files` would remove for `globs`, without removing anything.
pub fn plan_deletion(fs: &dyn FileSystem, globs: &str) -> Result<Vec<PathBuf>> {
    matched_paths(fs, globs)
}

/// Remove every regular file matched by `globs`.
///
/// Stops at the first failed removal and returns it as
/// [`StalecheckError::FilesystemError`]. Files removed before the failure
/// stay removed.
pub fn delete_files(fs: &dyn FileSystem, globs: &str) -> Result<()> {
    let targets = matched_paths(fs, globs)?;

    for path in &targets {
        fs.remove_file(path)
            .map_err(|e| StalecheckError::filesystem(path, e))?;
        debug!(path = ?path, "removed");
    }

    if !targets.is_empty() {
        info!(count = targets.len(), "removed matched files");
    }
    Ok(())
}
