//! Canopy - list directory contents as an indented tree

pub mod error;
pub mod fs;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::TreeError;
pub use fs::{FileSystem, MemoryFile, MemoryFs, Metadata, OsFs};
pub use output::{AnsiColor, Colorize, NoColor, OutputConfig, TreeFormatter};
pub use tree::{Node, SortKey, TreeWalker, WalkerConfig};
