//! TreeWalker - builds the filtered, sorted tree in memory

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::fs::FileSystem;

use super::config::WalkerConfig;
use super::filter::Pattern;
use super::node::Node;
use super::sort::sort_nodes;
use super::utils::absolute_path;

const HIDDEN_PREFIX: char = '.';

/// Tree walker that builds the full tree in memory.
///
/// Filtering happens bottom-up: a directory's fate (pruned or kept) is only
/// decided after all of its children were visited, so the returned counts
/// always equal what ends up in the tree.
pub struct TreeWalker {
    config: WalkerConfig,
    fs: Box<dyn FileSystem>,
    pattern: Option<Pattern>,
    ignore: Option<Pattern>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig, fs: impl FileSystem + 'static) -> Self {
        let compile = |source: &Option<String>| {
            source
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| Pattern::new(s, config.ignore_case))
        };
        let pattern = compile(&config.pattern);
        let ignore = compile(&config.ignore_pattern);
        Self {
            config,
            fs: Box::new(fs),
            pattern,
            ignore,
        }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Walk from `root`, returning the tree and its (directories, files) counts.
    pub fn walk(&self, root: impl Into<PathBuf>) -> (Node, (usize, usize)) {
        let mut node = Node::new(root);
        let counts = self.visit(&mut node);
        (node, counts)
    }

    /// Populate `node` and everything below it.
    ///
    /// Returns (directories, files) below and including `node`; the
    /// depth-0 node itself is never counted as a directory.
    pub fn visit(&self, node: &mut Node) -> (usize, usize) {
        match absolute_path(node.path()) {
            Ok(path) => node.visited().insert(path),
            Err(err) => debug!(path = %node.path().display(), error = %err, "cannot resolve absolute path"),
        }

        let metadata = match self.fs.stat(node.path()) {
            Ok(m) => m,
            Err(err) => {
                debug!(path = %node.path().display(), error = %err, "stat failed");
                node.error = Some(err);
                return (0, 0);
            }
        };
        let is_dir = metadata.is_dir();
        node.metadata = Some(metadata);
        if !is_dir {
            return (0, 1);
        }

        let mut dirs = if node.depth() != 0 { 1 } else { 0 };
        let mut files = 0;

        if self.config.at_max_depth(node.depth()) {
            return (dirs, files);
        }

        // In match-dirs mode a matching directory lets its immediate children
        // skip the include pattern.
        let mut dir_match = false;
        if node.depth() != 0 && self.config.match_dirs {
            if let Some(pattern) = &self.pattern {
                dir_match = pattern.matches(node);
            } else if self.ignore.as_ref().is_some_and(|p| p.matches(node)) {
                trace!(path = %node.path().display(), "directory excluded");
                return (dirs, files);
            }
        }

        let names = match self.fs.list(node.path()) {
            Ok(names) => names,
            Err(err) => {
                debug!(path = %node.path().display(), error = %err, "list failed");
                node.error = Some(err);
                return (dirs, files);
            }
        };

        let mut children = Vec::with_capacity(names.len());
        for name in names {
            if !self.config.show_all && name.starts_with(HIDDEN_PREFIX) {
                continue;
            }
            let mut child = node.child(&name);
            let (d, f) = self.visit(&mut child);
            if !self.keep(&child, f, dir_match) {
                trace!(path = %child.path().display(), "filtered out");
                continue;
            }
            children.push(child);
            dirs += d;
            files += f;
        }

        if !self.config.no_sort {
            sort_nodes(&mut children, self.config.sort, self.config.reverse);
        }
        node.children = Some(children);
        (dirs, files)
    }

    /// Decide whether a visited child stays in the tree.
    ///
    /// Children that failed are always kept so their error is shown.
    fn keep(&self, child: &Node, files: usize, dir_match: bool) -> bool {
        if child.error().is_some() {
            return true;
        }

        let ignored = || self.ignore.as_ref().is_some_and(|p| p.matches(child));

        if child.is_dir() {
            if self.config.prune && files == 0 {
                return false;
            }
            if self.config.match_dirs && ignored() {
                return false;
            }
        } else {
            if self.config.dirs_only {
                return false;
            }
            if !dir_match && self.pattern.as_ref().is_some_and(|p| !p.matches(child)) {
                return false;
            }
            if ignored() {
                return false;
            }
        }
        true
    }
}
