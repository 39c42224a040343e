// src/glob/resolve.rs

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::debug;

use crate::errors::{Result, StalecheckError};
use crate::fs::FileSystem;
use crate::glob::delim::split_glob_list;
use crate::glob::pattern::PathGlob;

/// A regular file matched by a glob list, with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Split and parse every pattern of a glob list.
///
/// Nothing touches the filesystem until the whole list is known to be valid.
pub fn parse_glob_list(list: &str) -> Result<Vec<PathGlob>> {
    split_glob_list(list)
        .iter()
        .map(|p| PathGlob::parse(p))
        .collect()
}

/// Resolve a glob list into the regular files it matches.
///
/// Patterns are expanded in order; within a pattern, matches are sorted by
/// path. A file matched by more than one pattern is reported once, at its
/// first position.
pub fn resolve(fs: &dyn FileSystem, list: &str) -> Result<Vec<MatchedFile>> {
    let globs = parse_glob_list(list)?;

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for glob in &globs {
        debug!(glob = %glob, "evaluating glob");
        for file in expand(fs, glob)? {
            if seen.insert(file.path.clone()) {
                matched.push(file);
            }
        }
    }

    Ok(matched)
}

/// Modification times of the files matched by `list`, in match order.
pub fn mod_times(fs: &dyn FileSystem, list: &str) -> Result<Vec<SystemTime>> {
    Ok(resolve(fs, list)?
        .into_iter()
        .map(|f| f.modified)
        .collect())
}

/// Paths of the files matched by `list`, in match order.
pub fn matched_paths(fs: &dyn FileSystem, list: &str) -> Result<Vec<PathBuf>> {
    Ok(resolve(fs, list)?.into_iter().map(|f| f.path).collect())
}

fn expand(fs: &dyn FileSystem, glob: &PathGlob) -> Result<Vec<MatchedFile>> {
    let mut entries = match fs.read_dir(glob.dir()) {
        Ok(entries) => entries,
        Err(e) if is_missing_dir(&e) => {
            debug!(dir = ?glob.dir(), "glob directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StalecheckError::filesystem(glob.dir(), e)),
    };
    entries.sort();

    let mut files = Vec::new();
    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        if !glob.matches_name(name) {
            continue;
        }

        let stat = match fs.stat(&path) {
            Ok(stat) => stat,
            // Dangling or looping symlink, or removed since the listing.
            Err(e) if is_unresolvable_entry(&e) => {
                debug!(path = ?path, error = %e, "ignoring unresolvable entry");
                continue;
            }
            Err(e) => return Err(StalecheckError::filesystem(&path, e)),
        };
        if !stat.is_file() {
            debug!(path = ?path, kind = ?stat.kind, "ignoring non-file");
            continue;
        }

        debug!(name = ?name, "  matched");
        files.push(MatchedFile {
            path,
            modified: stat.modified,
        });
    }

    Ok(files)
}

fn is_unresolvable_entry(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    ) || is_filesystem_loop(e)
}

// `io::ErrorKind::FilesystemLoop` is unstable (`io_error_more`), so match ELOOP directly.
fn is_filesystem_loop(e: &io::Error) -> bool {
    #[cfg(target_os = "linux")]
    const ELOOP: i32 = 40;
    #[cfg(all(unix, not(target_os = "linux")))]
    const ELOOP: i32 = 62;
    #[cfg(unix)]
    return e.raw_os_error() == Some(ELOOP);
    #[cfg(not(unix))]
    return false;
}

fn is_missing_dir(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
