//! Layout engine — one global description column for the whole report.
//!
//! Stage 4 of the state pipeline. The column is derived from the longest
//! raw input line (the branch heading included), so descriptions line up
//! across every section.

use super::splitter::VirtualEntry;

/// Spaces between the longest `code path` text and its description.
pub const DEFAULT_MARGIN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Character column at which every description starts.
    pub width: usize,
}

impl Layout {
    pub fn new(max_line_len: usize, margin: usize) -> Self {
        Self {
            width: max_line_len + margin,
        }
    }

    /// Spaces needed after `entry`'s `code path` text.
    pub fn padding(&self, entry: &VirtualEntry) -> usize {
        self.width.saturating_sub(prefix_len(entry))
    }
}

/// Character length of the row's code and remaining text, which is the
/// length of the raw line it came from.
pub fn prefix_len(entry: &VirtualEntry) -> usize {
    entry.code_text().chars().count() + entry.rest.chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
