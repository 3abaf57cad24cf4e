//! Truncation heuristic for the remarks field.
//!
//! The export cuts remarks at 1000 characters. A long remarks value that
//! cites a wallet and does not end like a sentence is assumed to have lost
//! its tail.

use crate::extract::{is_blank, CITATION_MARKER};

/// Length limit the export applies to text fields.
pub const EXPORT_FIELD_LIMIT: usize = 1000;

/// Remarks at or above this many characters are candidates for truncation.
/// Sits just under the field limit, since cleaning strips a few characters.
pub const TRUNCATION_THRESHOLD: usize = EXPORT_FIELD_LIMIT - 10;

/// Characters a complete remarks value ends with.
pub const TERMINAL_MARKS: [char; 2] = ['.', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationRule {
    /// Minimum length in characters (not bytes).
    pub threshold: usize,
    pub terminals: &'static [char],
}

impl Default for TruncationRule {
    fn default() -> Self {
        Self { threshold: TRUNCATION_THRESHOLD, terminals: &TERMINAL_MARKS }
    }
}

impl TruncationRule {
    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold, ..Self::default() }
    }

    pub fn is_truncated(&self, text: &str) -> bool {
        if is_blank(text) || !text.contains(CITATION_MARKER) {
            return false;
        }
        if text.chars().count() < self.threshold {
            return false;
        }
        !text.trim().ends_with(self.terminals)
    }
}

/// [`TruncationRule::is_truncated`] with the export's default constants.
pub fn is_truncated(text: &str) -> bool {
    TruncationRule::default().is_truncated(text)
}
