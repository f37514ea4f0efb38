//! Workflow name filtering

use regex::Regex;

use crate::error::Result;

/// Compiled exclusion filter for workflow names.
///
/// Matching is unanchored: the pattern only needs to match somewhere
/// inside the name. Anchor with `^`/`$` to require a full match.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: Regex,
}

impl NameFilter {
    /// Compile an exclusion pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        Ok(NameFilter { pattern })
    }

    /// True when the workflow name should be left out of the report.
    #[inline]
    pub fn omits(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}
