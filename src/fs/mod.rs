// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// What kind of entry a path resolves to, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, FIFOs, devices.
    Other,
}

/// The subset of metadata the resolver needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: EntryKind,
    pub modified: SystemTime,
}

impl FileStat {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Abstract filesystem interface.
///
/// Errors are plain `io::Error`s so callers can branch on `ErrorKind`
/// (a missing glob directory is an empty match, not a failure).
pub trait FileSystem: Send + Sync + Debug {
    /// Return the entries of a directory as full paths, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Stat `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = fs::metadata(path)?;
        let kind = if meta.is_file() {
            EntryKind::File
        } else if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::Other
        };
        Ok(FileStat {
            kind,
            modified: meta.modified()?,
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
