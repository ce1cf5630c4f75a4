//! In-memory filesystem

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{FileMode, FileSystem, Metadata, StatInfo};

/// Description of an entry to place in a [`MemoryFs`].
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    size: u64,
    mode: FileMode,
    modified: SystemTime,
    stat: Option<StatInfo>,
    children: Option<Vec<MemoryFile>>,
}

impl MemoryFile {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mode: FileMode::file(0o644),
            modified: SystemTime::UNIX_EPOCH,
            stat: None,
            children: None,
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<MemoryFile>) -> Self {
        Self {
            mode: FileMode::dir(0o755),
            children: Some(children),
            ..Self::file(name)
        }
    }

    pub fn symlink(name: impl Into<String>) -> Self {
        Self {
            mode: FileMode::symlink(),
            ..Self::file(name)
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Permission bits; the entry kind is kept.
    pub fn perm(mut self, bits: u32) -> Self {
        self.mode = FileMode::new(self.mode.kind(), bits);
        self
    }

    pub fn modified(mut self, modified: SystemTime) -> Self {
        self.modified = modified;
        self
    }

    pub fn stat(mut self, stat: StatInfo) -> Self {
        self.stat = Some(stat);
        self
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            size: self.size,
            mode: self.mode,
            modified: self.modified,
            stat: self.stat.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    metadata: Metadata,
    children: Option<Vec<String>>,
}

/// A filesystem held entirely in memory.
///
/// Listing order is the order children were given in, which makes
/// unsorted output deterministic. Stat and list failures can be injected
/// per path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: HashMap<PathBuf, MemoryEntry>,
    stat_failures: HashMap<PathBuf, String>,
    list_failures: HashMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `file` (and everything below it) at `path`.
    pub fn with(mut self, path: impl AsRef<Path>, file: MemoryFile) -> Self {
        self.insert(path.as_ref().to_path_buf(), file);
        self
    }

    /// Make `stat` fail for `path` with `message`.
    pub fn fail_stat(mut self, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        self.stat_failures
            .insert(path.as_ref().to_path_buf(), message.into());
        self
    }

    /// Make `list` fail for `path` with `message`.
    pub fn fail_list(mut self, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        self.list_failures
            .insert(path.as_ref().to_path_buf(), message.into());
        self
    }

    fn insert(&mut self, path: PathBuf, file: MemoryFile) {
        let metadata = file.metadata();
        let children = file.children.map(|children| {
            let names = children.iter().map(|c| c.name.clone()).collect();
            for child in children {
                let child_path = path.join(&child.name);
                self.insert(child_path, child);
            }
            names
        });
        self.entries.insert(path, MemoryEntry { metadata, children });
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("lstat {}: no such file or directory", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<Metadata> {
        if let Some(message) = self.stat_failures.get(path) {
            return Err(io::Error::other(message.clone()));
        }
        self.entries
            .get(path)
            .map(|e| e.metadata.clone())
            .ok_or_else(|| not_found(path))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        if let Some(message) = self.list_failures.get(path) {
            return Err(io::Error::other(message.clone()));
        }
        let entry = self.entries.get(path).ok_or_else(|| not_found(path))?;
        entry.children.clone().ok_or_else(|| {
            io::Error::other(format!("readdir {}: not a directory", path.display()))
        })
    }
}
