//! Configuration types for tree walking

use super::sort::SortKey;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// List entries whose names start with `.`
    pub show_all: bool,
    pub dirs_only: bool,
    /// Display the accumulated path instead of the base name
    pub full_path: bool,
    pub ignore_case: bool,
    /// Descend into symbolic links that point at directories
    pub follow_links: bool,
    /// Descend only this many levels; `None` or `Some(0)` means unlimited
    pub max_depth: Option<usize>,
    /// List only files matching this regular expression
    pub pattern: Option<String>,
    /// Do not list entries matching this regular expression
    pub ignore_pattern: Option<String>,
    /// Apply the patterns to directories as well as files
    pub match_dirs: bool,
    /// Drop directories that end up with no files
    pub prune: bool,
    pub sort: SortKey,
    /// Keep children in listing order
    pub no_sort: bool,
    pub reverse: bool,
}

impl WalkerConfig {
    /// Whether a node at `depth` sits at (or below) the depth limit.
    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| max > 0 && depth >= max)
    }
}
