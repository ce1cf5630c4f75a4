//! Shared utility functions for tree walking and rendering

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::TreeError;

use super::config::WalkerConfig;
use super::node::Node;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;
const TB: u64 = 1 << 40;
const PB: u64 = 1 << 50;
const EB: u64 = 1 << 60;

/// Format a size in bytes to a short human-readable form: `999`, `1.0K`, `10K`, `2.3M`.
///
/// A unit is used only when the value is strictly greater than it, so 1024
/// stays `1024`. One decimal is shown until the scaled value reaches 10.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(u64, &str); 6] = [
        (EB, "E"),
        (PB, "P"),
        (TB, "T"),
        (GB, "G"),
        (MB, "M"),
        (KB, "K"),
    ];

    for (unit, suffix) in UNITS {
        if bytes > unit {
            let n = bytes as f64 / unit as f64;
            return if n >= 10.0 {
                format!("{:.0}{}", n, suffix)
            } else {
                format!("{:.1}{}", n, suffix)
            };
        }
    }
    bytes.to_string()
}

/// Sum the sizes of every file below a directory node.
///
/// Directories contribute the sum of their children, never their own size.
/// The error (if any) is reported alongside a best-effort sum: the depth
/// limit was reached, or some descendant failed during traversal.
pub fn dir_size(node: &Node, config: &WalkerConfig) -> (u64, Option<TreeError>) {
    let mut err = None;
    if config.at_max_depth(node.depth()) {
        err = Some(TreeError::DepthExceeded);
    }

    let mut size = 0;
    for child in node.children() {
        if let Some(e) = child.error() {
            err = Some(TreeError::entry(e));
            continue;
        }
        if child.is_dir() {
            let (child_size, child_err) = dir_size(child, config);
            size += child_size;
            if child_err.is_some() {
                err = child_err;
            }
        } else {
            size += child.size();
        }
    }
    (size, err)
}

/// Make `path` absolute and resolve `.` and `..` lexically (no symlink lookups).
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
