//! Tree formatting and display
//!
//! This module renders a walked tree as text. Each entry gets one line: an
//! optional `[...]` annotation block, the (quoted, colorized) name, the
//! symlink target and an optional first-line preview.
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared utility functions (glyphs, prefix calculation, padding)
//! - `tree` - The tree formatter
//! - `color` - Pluggable name colorization
//! - `preview` - First-line previews of plain-text files

mod color;
mod config;
mod preview;
mod tree;
mod utils;

// Re-export public types and functions
pub use color::{AnsiColor, Colorize, NoColor};
pub use config::OutputConfig;
pub use preview::{FileCommand, PREVIEW_BYTES, SniffMime, first_line, write_preview};
pub use tree::TreeFormatter;
pub use utils::{branch_glyph, continuation_prefix};
