//! The real filesystem

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use super::{FileKind, FileMode, FileSystem, Metadata, StatInfo};

/// Filesystem backed by `std::fs`, using lstat semantics.
///
/// Errors are prefixed with the failing operation and path
/// (`lstat foo/bar: ...`), which the renderer strips back off.
#[derive(Debug, Default)]
pub struct OsFs {
    owners: RefCell<HashMap<u32, Option<String>>>,
}

impl OsFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// User name for `uid` through the system user database, memoized.
    #[cfg(unix)]
    fn owner_name(&self, uid: u32) -> Option<String> {
        self.owners
            .borrow_mut()
            .entry(uid)
            .or_insert_with(|| {
                uzers::get_user_by_uid(uid).map(|user| user.name().to_string_lossy().into_owned())
            })
            .clone()
    }
}

impl FileSystem for OsFs {
    fn stat(&self, path: &Path) -> io::Result<Metadata> {
        let meta = fs::symlink_metadata(path).map_err(|e| annotate("lstat", path, e))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Metadata {
            name,
            size: meta.len(),
            mode: file_mode(&meta),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            stat: self.stat_info(&meta),
        })
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let entries = fs::read_dir(path).map_err(|e| annotate("open", path, e))?;
        entries
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .map_err(|e| annotate("readdirent", path, e))
            })
            .collect()
    }
}

impl OsFs {
    #[cfg(unix)]
    fn stat_info(&self, meta: &fs::Metadata) -> Option<StatInfo> {
        use std::os::unix::fs::MetadataExt;

        Some(StatInfo {
            inode: meta.ino(),
            device: meta.dev(),
            uid: meta.uid(),
            gid: meta.gid(),
            owner: self.owner_name(meta.uid()),
            ctime: meta.ctime(),
        })
    }

    #[cfg(not(unix))]
    fn stat_info(&self, _meta: &fs::Metadata) -> Option<StatInfo> {
        None
    }
}

fn annotate(op: &str, path: &Path, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format!("{} {}: {}", op, path.display(), err))
}

#[cfg(unix)]
fn file_mode(meta: &fs::Metadata) -> FileMode {
    use std::os::unix::fs::{FileTypeExt, PermissionsExt};

    let ft = meta.file_type();
    let kind = if ft.is_dir() {
        FileKind::Dir
    } else if ft.is_symlink() {
        FileKind::Symlink
    } else if ft.is_fifo() {
        FileKind::NamedPipe
    } else if ft.is_socket() {
        FileKind::Socket
    } else if ft.is_block_device() {
        FileKind::BlockDevice
    } else if ft.is_char_device() {
        FileKind::CharDevice
    } else {
        FileKind::Regular
    };
    FileMode::new(kind, meta.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(meta: &fs::Metadata) -> FileMode {
    let ft = meta.file_type();
    let bits = if meta.permissions().readonly() { 0o444 } else { 0o666 };
    if ft.is_dir() {
        FileMode::dir(bits | 0o111)
    } else if ft.is_symlink() {
        FileMode::symlink()
    } else {
        FileMode::file(bits)
    }
}
