//! Filesystem access used by the walker
//!
//! The walker never touches `std::fs` directly for listing; it goes through the
//! [`FileSystem`] trait so that trees can be rendered from the real disk
//! ([`OsFs`]) or from an in-memory description ([`MemoryFs`]).
//!
//! # Module Structure
//!
//! - `mode` - File type and permission bits, rendered like `-rw-r--r--`
//! - `os` - Real filesystem (lstat semantics)
//! - `memory` - In-memory filesystem for tests and embedding

mod memory;
mod mode;
mod os;

use std::io;
use std::path::Path;
use std::time::SystemTime;

pub use memory::{MemoryFile, MemoryFs};
pub use mode::{FileKind, FileMode};
pub use os::OsFs;

/// Access to a directory hierarchy.
pub trait FileSystem {
    /// Metadata for `path` itself. Symbolic links are not followed.
    fn stat(&self, path: &Path) -> io::Result<Metadata>;

    /// Names of the entries in the directory at `path`, in no particular order.
    fn list(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Metadata for a single entry.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Base name of the entry
    pub name: String,
    pub size: u64,
    pub mode: FileMode,
    pub modified: SystemTime,
    /// Platform-specific details; `None` when the filesystem can't provide them
    pub stat: Option<StatInfo>,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    pub fn is_symlink(&self) -> bool {
        self.mode.is_symlink()
    }
}

/// Inode-level details used by the owner, inode, device and ctime annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatInfo {
    pub inode: u64,
    pub device: u64,
    pub uid: u32,
    pub gid: u32,
    /// Resolved user name for `uid`, if any
    pub owner: Option<String>,
    /// Status change time, seconds since the epoch
    pub ctime: i64,
}
