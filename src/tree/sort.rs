//! Ordering of sibling entries
//!
//! Exactly one [`SortKey`] is active at a time. Entries that failed to stat
//! have no metadata and sort after every other entry.

use std::cmp::Ordering;

use crate::fs::Metadata;

use super::node::Node;

/// The sort strategy applied to a directory's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lexicographic by name
    #[default]
    Name,
    /// Oldest modification first
    ModTime,
    /// Oldest status change first; falls back to modification time when
    /// the filesystem has no status information
    ChangeTime,
    /// Directories before everything else, otherwise arrival order
    DirsFirst,
    /// Numeric-aware name comparison (`file2` < `file10`)
    Version,
    /// Smallest first
    Size,
}

impl SortKey {
    /// Pick the active key from individual flags.
    ///
    /// Priority: mtime > ctime > dirs-first > version > size > name.
    pub fn from_flags(
        mod_time: bool,
        change_time: bool,
        dirs_first: bool,
        version: bool,
        size: bool,
    ) -> Self {
        if mod_time {
            SortKey::ModTime
        } else if change_time {
            SortKey::ChangeTime
        } else if dirs_first {
            SortKey::DirsFirst
        } else if version {
            SortKey::Version
        } else if size {
            SortKey::Size
        } else {
            SortKey::Name
        }
    }

    pub fn compare(self, a: &Metadata, b: &Metadata) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::ModTime => a.modified.cmp(&b.modified),
            SortKey::ChangeTime => match (&a.stat, &b.stat) {
                (Some(sa), Some(sb)) => sa.ctime.cmp(&sb.ctime),
                _ => a.modified.cmp(&b.modified),
            },
            SortKey::DirsFirst => match (a.is_dir(), b.is_dir()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            },
            SortKey::Version => natord::compare(&a.name, &b.name),
            SortKey::Size => a.size.cmp(&b.size),
        }
    }
}

fn compare_nodes(a: &Node, b: &Node, key: SortKey) -> Ordering {
    match (a.metadata(), b.metadata()) {
        (Some(a), Some(b)) => key.compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of siblings. `reverse` flips each comparison, so entries that
/// compare equal keep their arrival order in both directions.
pub fn sort_nodes(nodes: &mut [Node], key: SortKey, reverse: bool) {
    nodes.sort_by(|a, b| {
        let result = compare_nodes(a, b, key);
        if reverse { result.reverse() } else { result }
    });
}
