// src/fs/mock.rs

use super::{EntryKind, FileStat, FileSystem};
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(SystemTime),
    Dir(Vec<String>), // List of child names
    /// Stand-in for a FIFO, socket or device node.
    Special,
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    /// Paths whose removal fails with `PermissionDenied`.
    locked: HashSet<PathBuf>,
}

/// In-memory filesystem with explicit modification times.
///
/// Paths are expected to be absolute; parents are created implicitly.
/// Directories report `UNIX_EPOCH` as their modification time.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.add_dir("/");
        fs
    }

    /// Add (or replace) a regular file with the given modification time.
    pub fn add_file(&self, path: impl AsRef<Path>, modified: SystemTime) {
        self.insert(path.as_ref(), MockEntry::File(modified));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        ensure_dir_entry(&mut state.entries, path.as_ref());
    }

    pub fn add_special(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Special);
    }

    /// Update the modification time of an existing file, like `touch`.
    pub fn touch(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let mut state = self.state.lock().unwrap();
        if let Some(MockEntry::File(t)) = state.entries.get_mut(path.as_ref()) {
            *t = modified;
        }
    }

    /// Make every later `remove_file` on `path` fail.
    pub fn lock_file(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.locked.insert(path.as_ref().to_path_buf());
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let state = self.state.lock().unwrap();
        state.entries.contains_key(path.as_ref())
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            ensure_dir_entry(&mut state.entries, parent);
            link_child(&mut state.entries, parent, path);
        }
        state.entries.insert(path.to_path_buf(), entry);
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    if let Some(parent) = path.parent() {
        ensure_dir_entry(entries, parent);
        link_child(entries, parent, path);
    }
}

fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {:?}", path))
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        match state.entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(_) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {:?}", path),
            )),
            None => Err(not_found(path)),
        }
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let state = self.state.lock().unwrap();
        match state.entries.get(path) {
            Some(MockEntry::File(modified)) => Ok(FileStat {
                kind: EntryKind::File,
                modified: *modified,
            }),
            Some(MockEntry::Dir(_)) => Ok(FileStat {
                kind: EntryKind::Dir,
                modified: SystemTime::UNIX_EPOCH,
            }),
            Some(MockEntry::Special) => Ok(FileStat {
                kind: EntryKind::Other,
                modified: SystemTime::UNIX_EPOCH,
            }),
            None => Err(not_found(path)),
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        match state.entries.get(path) {
            Some(MockEntry::Dir(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::IsADirectory,
                    format!("is a directory: {:?}", path),
                ));
            }
            Some(_) => {}
            None => return Err(not_found(path)),
        }
        state.entries.remove(path);
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(MockEntry::Dir(children)) = state.entries.get_mut(parent) {
                children.retain(|c| OsStr::new(c) != name);
            }
        }
        Ok(())
    }
}
