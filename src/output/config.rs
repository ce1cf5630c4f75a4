//! Output configuration types

use chrono::{DateTime, FixedOffset};

/// Configuration for output formatting.
///
/// Every annotation is off by default, which renders a bare tree.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Show the first line of plain-text files after the name
    pub contents: bool,
    /// Size in bytes
    pub byte_size: bool,
    /// Size in human-readable units (takes precedence over `byte_size`)
    pub human_size: bool,
    /// Permission string such as `-rw-r--r--`
    pub mode: bool,
    /// Owner name, or uid when it can't be resolved
    pub uid: bool,
    pub gid: bool,
    pub last_modified: bool,
    /// Wrap names in double quotes
    pub quotes: bool,
    pub inodes: bool,
    pub device: bool,
    /// Print every entry flush left, without tree glyphs
    pub no_indent: bool,
    pub colorize: bool,
    /// Reference time for date formatting; the current local time when unset
    pub now: Option<DateTime<FixedOffset>>,
}

impl OutputConfig {
    pub fn show_size(&self) -> bool {
        self.byte_size || self.human_size
    }
}
