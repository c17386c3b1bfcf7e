//! Mixed-code splitter — turns status entries into rendered rows.
//!
//! Stage 3 of the state pipeline. Most entries map to one [`VirtualEntry`];
//! a Mixed entry (independent staged and unstaged changes) yields two, one
//! per aspect, each reclassified from its half-code.

use super::classifier::{self, Category, StatusCode};
use super::parser::{self, StatusEntry};

/// Report section a row is bucketed into. Declaration order is render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Conflicts,
    Unstaged,
    Staged,
    Uncategorized,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Conflicts,
        Section::Unstaged,
        Section::Staged,
        Section::Uncategorized,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Conflicts => "Conflicts:",
            Self::Unstaged => "Unstaged:",
            Self::Staged => "Staged:",
            Self::Uncategorized => "Uncategorized:",
        }
    }
}

/// A row as rendered in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    pub code: StatusCode,
    /// Line text after the code, exactly as read.
    pub rest: String,
    /// Carried from a line too short to hold a code.
    pub malformed: bool,
    pub description: &'static str,
    pub section: Section,
}

impl VirtualEntry {
    /// The code as it appears in the row; empty for malformed lines.
    pub fn code_text(&self) -> String {
        if self.malformed {
            String::new()
        } else {
            self.code.to_string()
        }
    }

    pub fn path(&self) -> &str {
        parser::path_of(&self.rest)
    }
}

/// Split every entry into its rows, preserving input order.
pub fn split_all(entries: &[StatusEntry]) -> Vec<VirtualEntry> {
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        split(entry, &mut rows);
    }
    rows
}

/// Append the row(s) for one entry.
pub fn split(entry: &StatusEntry, out: &mut Vec<VirtualEntry>) {
    let classification = classifier::classify(entry.code);

    let section = match classification.category {
        Category::Mixed => {
            out.push(half(entry, entry.code.unstaged_half(), Category::Unstaged));
            out.push(half(entry, entry.code.staged_half(), Category::Staged));
            return;
        }
        Category::Unstaged => Section::Unstaged,
        Category::Staged => Section::Staged,
        Category::Conflicted => Section::Conflicts,
        // A `##` line that was not the leading heading has no section of its own.
        Category::Heading | Category::Uncategorized => Section::Uncategorized,
    };

    out.push(VirtualEntry {
        code: entry.code,
        rest: entry.rest.clone(),
        malformed: entry.malformed,
        description: classification.description,
        section,
    });
}

fn half(entry: &StatusEntry, code: StatusCode, expected: Category) -> VirtualEntry {
    let classification = classifier::classify(code);
    debug_assert_eq!(
        classification.category, expected,
        "mixed code {} splits into {code}, which is not a {expected:?} table entry",
        entry.code
    );

    let section = if expected == Category::Unstaged {
        Section::Unstaged
    } else {
        Section::Staged
    };

    VirtualEntry {
        code,
        rest: entry.rest.clone(),
        malformed: false,
        description: classification.description,
        section,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
