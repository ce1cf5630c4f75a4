//! Directory tree walking logic
//!
//! `TreeWalker` visits a directory hierarchy through a [`FileSystem`](crate::fs::FileSystem)
//! and builds a [`Node`] tree, applying hidden-entry, pattern, depth and
//! pruning rules, then sorting each directory's children.

mod config;
mod filter;
mod node;
mod sort;
mod utils;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use filter::{Pattern, matches};
pub use node::{Node, VisitedPaths};
pub use sort::{SortKey, sort_nodes};
pub use utils::{absolute_path, dir_size, format_size};
pub use walker::TreeWalker;
