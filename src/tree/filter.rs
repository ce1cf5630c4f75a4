//! Name pattern matching for tree walking

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::node::Node;

/// A compiled include or exclude pattern.
///
/// Patterns are regular expressions. When the source contains a literal
/// `*` the pattern is matched against the entry's full path instead of its
/// base name. An invalid expression never matches anything.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
    full_path: bool,
}

impl Pattern {
    pub fn new(source: &str, ignore_case: bool) -> Self {
        let regex = match RegexBuilder::new(source)
            .case_insensitive(ignore_case)
            .build()
        {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(pattern = source, error = %err, "invalid pattern, nothing will match");
                None
            }
        };
        Self {
            regex,
            full_path: source.contains('*'),
        }
    }

    /// Check the pattern against a node's name (or full path).
    pub fn matches(&self, node: &Node) -> bool {
        if self.full_path {
            self.is_match(&node.path().to_string_lossy())
        } else {
            self.is_match(&node.name())
        }
    }

    /// An empty match does not count.
    fn is_match(&self, text: &str) -> bool {
        self.regex
            .as_ref()
            .and_then(|re| re.find(text))
            .is_some_and(|m| !m.as_str().is_empty())
    }
}

/// Match `candidate` against `pattern` without keeping the compiled form.
pub fn matches(pattern: &str, candidate: &str, ignore_case: bool) -> bool {
    Pattern::new(pattern, ignore_case).is_match(candidate)
}
