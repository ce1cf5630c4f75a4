//! Shared utility functions for output formatting

pub const BRANCH: &str = "├── ";
pub const CORNER: &str = "└── ";

/// Glyph placed before a child's line.
pub fn branch_glyph(is_last: bool) -> &'static str {
    if is_last { CORNER } else { BRANCH }
}

/// Calculate the prefix for the children of an entry.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

/// Right-justify `text` in a field of `width` characters (never truncates).
pub fn pad_left(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Left-justify `text` in a field of `width` characters (never truncates).
pub fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
