//! Error types shared by the walker, the size aggregator and the CLI

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced outside of a single node.
///
/// Per-entry filesystem failures are stored on the [`Node`](crate::Node)
/// itself as an `io::Error`; this type covers what is reported *about*
/// a subtree or by the binary.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Size aggregation reached the configured depth limit, so the sum is partial.
    #[error("Depth too high")]
    DepthExceeded,

    /// An entry below the directory being summed failed during traversal.
    #[error("{0}")]
    Entry(String),

    /// The output file could not be created.
    #[error("{}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the rendered tree failed.
    #[error("write error: {0}")]
    Write(#[from] io::Error),
}

impl TreeError {
    /// Build an `Entry` error from a node's recorded failure.
    pub fn entry(err: &io::Error) -> Self {
        TreeError::Entry(err.to_string())
    }
}

/// Shorten an error message to the part after the first `": "`.
///
/// Filesystem errors read like `lstat some/path: No such file or directory`;
/// only the tail is shown next to the entry name.
pub fn short_message(message: &str) -> &str {
    match message.split_once(": ") {
        Some((_, tail)) => tail,
        None => message,
    }
}
