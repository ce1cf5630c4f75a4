//! The in-memory tree built by the walker

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::fs::{FileMode, Metadata};

/// Absolute paths seen during one traversal.
///
/// Cloning yields another handle to the same set: every node created by a
/// traversal shares one instance, which is what lets symlink following
/// detect cycles. Paths are only ever added.
#[derive(Debug, Clone, Default)]
pub struct VisitedPaths(Rc<RefCell<HashSet<PathBuf>>>);

impl VisitedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: PathBuf) {
        self.0.borrow_mut().insert(path);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.borrow().contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// One filesystem entry and, for directories, its kept children.
#[derive(Debug)]
pub struct Node {
    path: PathBuf,
    depth: usize,
    pub(crate) metadata: Option<Metadata>,
    pub(crate) error: Option<io::Error>,
    /// `None` for files and for directories that were not (or could not be) listed
    pub(crate) children: Option<Vec<Node>>,
    visited: VisitedPaths,
}

impl Node {
    /// A traversal root with a fresh visited set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::rooted(path.into(), VisitedPaths::new())
    }

    /// A depth-0 node that shares an existing visited set.
    pub(crate) fn rooted(path: PathBuf, visited: VisitedPaths) -> Self {
        Self {
            path,
            depth: 0,
            metadata: None,
            error: None,
            children: None,
            visited,
        }
    }

    /// A node that is not part of any traversal, carrying known metadata.
    pub(crate) fn detached(path: PathBuf, metadata: Metadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..Self::new(path)
        }
    }

    pub(crate) fn child(&self, name: &str) -> Self {
        Self {
            path: self.path.join(name),
            depth: self.depth + 1,
            metadata: None,
            error: None,
            children: None,
            visited: self.visited.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Kept children, in display order. Empty when the node has none.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether the node was listed (even if nothing survived filtering).
    pub fn is_listed(&self) -> bool {
        self.children.is_some()
    }

    pub fn visited(&self) -> &VisitedPaths {
        &self.visited
    }

    /// Base name from metadata, falling back to the last path component.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.metadata {
            Some(meta) => Cow::Borrowed(meta.name.as_str()),
            None => self
                .path
                .file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or_else(|| self.path.to_string_lossy()),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.as_ref().is_some_and(Metadata::is_dir)
    }

    pub fn mode(&self) -> Option<FileMode> {
        self.metadata.as_ref().map(|m| m.mode)
    }

    pub fn size(&self) -> u64 {
        self.metadata.as_ref().map_or(0, |m| m.size)
    }
}
