//! File type and permission bits

use std::fmt;

const SETUID: u32 = 0o4000;
const SETGID: u32 = 0o2000;
const STICKY: u32 = 0o1000;
const EXECUTE: u32 = 0o111;

/// The kind of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileKind {
    #[default]
    Regular,
    Dir,
    Symlink,
    NamedPipe,
    Socket,
    BlockDevice,
    CharDevice,
}

/// Entry kind plus permission bits (including setuid, setgid and sticky).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileMode {
    kind: FileKind,
    bits: u32,
}

impl FileMode {
    pub fn new(kind: FileKind, bits: u32) -> Self {
        Self {
            kind,
            bits: bits & 0o7777,
        }
    }

    pub fn file(bits: u32) -> Self {
        Self::new(FileKind::Regular, bits)
    }

    pub fn dir(bits: u32) -> Self {
        Self::new(FileKind::Dir, bits)
    }

    pub fn symlink() -> Self {
        Self::new(FileKind::Symlink, 0o777)
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }

    /// Any of the user, group or other execute bits is set.
    pub fn is_executable(&self) -> bool {
        self.bits & EXECUTE != 0
    }
}

impl fmt::Display for FileMode {
    /// Type letters followed by `rwxrwxrwx`, e.g. `drwxr-xr-x` or `-rw-r--r--`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(12);
        match self.kind {
            FileKind::Dir => out.push('d'),
            FileKind::Symlink => out.push('L'),
            FileKind::BlockDevice | FileKind::CharDevice => out.push('D'),
            FileKind::NamedPipe => out.push('p'),
            FileKind::Socket => out.push('S'),
            FileKind::Regular => {}
        }
        if self.bits & SETUID != 0 {
            out.push('u');
        }
        if self.bits & SETGID != 0 {
            out.push('g');
        }
        if self.kind == FileKind::CharDevice {
            out.push('c');
        }
        if self.bits & STICKY != 0 {
            out.push('t');
        }
        if out.is_empty() {
            out.push('-');
        }

        for (i, c) in "rwxrwxrwx".chars().enumerate() {
            if self.bits & (1 << (8 - i)) != 0 {
                out.push(c);
            } else {
                out.push('-');
            }
        }
        f.write_str(&out)
    }
}
