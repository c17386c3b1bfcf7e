//! Classifier — maps a two-character status code to a category.
//!
//! Stage 2 of the state pipeline. The lookup is total: any code outside the
//! table resolves to [`Category::Uncategorized`] with a generic description.

use std::fmt;

// ---------------------------------------------------------------------------
// Status code
// ---------------------------------------------------------------------------

/// A fixed-width, two-character `XY` status code from `git status --short`.
///
/// `X` is the index (staged) aspect and `Y` the working-tree (unstaged)
/// aspect. A space in either position means "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode([char; 2]);

impl StatusCode {
    pub const BLANK_CHAR: char = ' ';

    /// Code given to lines too short to carry one.
    pub const BLANK: StatusCode = StatusCode([' ', ' ']);

    /// Sentinel code of the branch heading line.
    pub const HEADING: StatusCode = StatusCode(['#', '#']);

    pub const fn new(staged: char, unstaged: char) -> Self {
        Self([staged, unstaged])
    }

    /// Take the first two characters of `s`, or `None` if there are fewer.
    pub fn from_prefix(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let x = chars.next()?;
        let y = chars.next()?;
        Some(Self([x, y]))
    }

    /// The index (staged) character.
    pub fn staged(self) -> char {
        self.0[0]
    }

    /// The working-tree (unstaged) character.
    pub fn unstaged(self) -> char {
        self.0[1]
    }

    /// Keep the working-tree character, blank the index one.
    pub fn unstaged_half(self) -> Self {
        Self([Self::BLANK_CHAR, self.0[1]])
    }

    /// Keep the index character, blank the working-tree one.
    pub fn staged_half(self) -> Self {
        Self([self.0[0], Self::BLANK_CHAR])
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Classification bucket of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Heading,
    Unstaged,
    Staged,
    /// Independent staged and unstaged changes on the same path.
    Mixed,
    Conflicted,
    Uncategorized,
}

/// Category plus the human-readable description shown in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub description: &'static str,
}

pub const UNRECOGNIZED_DESCRIPTION: &str = "unrecognized status code";

/// Every Mixed code in the table. Each must split into an Unstaged half and
/// a Staged half that are themselves table entries.
pub const MIXED_CODES: &[StatusCode] = &[
    StatusCode::new('M', 'M'),
    StatusCode::new('A', 'M'),
    StatusCode::new('M', 'D'),
    StatusCode::new('A', 'D'),
    StatusCode::new('R', 'D'),
    StatusCode::new('R', 'M'),
    StatusCode::new('C', 'M'),
    StatusCode::new('C', 'D'),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Classify a status code. Never fails.
pub fn classify(code: StatusCode) -> Classification {
    use Category::*;

    let (category, description) = match (code.staged(), code.unstaged()) {
        ('#', '#') => (Heading, "branch heading"),

        (' ', 'M') => (Unstaged, "modified file"),
        (' ', 'D') => (Unstaged, "deleted file"),
        ('?', '?') => (Unstaged, "untracked file"),
        (' ', 'A') => (Unstaged, "intent-to-add file"),
        (' ', 'R') => (Unstaged, "renamed file"),
        (' ', 'C') => (Unstaged, "copied file"),

        ('M', 'M') => (Mixed, "staged modifications plus unstaged modifications"),
        ('A', 'M') => (Mixed, "staged new file plus unstaged modifications"),
        ('M', 'D') => (Mixed, "staged modifications plus unstaged deletion"),
        ('A', 'D') => (Mixed, "staged new file plus unstaged deletion"),
        ('R', 'D') => (Mixed, "staged rename plus unstaged deletion"),
        ('R', 'M') => (Mixed, "staged rename plus unstaged modifications"),
        ('C', 'M') => (Mixed, "staged copy plus unstaged modifications"),
        ('C', 'D') => (Mixed, "staged copy plus unstaged deletion"),

        ('A', ' ') => (Staged, "added new file"),
        ('M', ' ') => (Staged, "modified file"),
        ('D', ' ') => (Staged, "deleted file"),
        ('R', ' ') => (Staged, "renamed file"),
        ('C', ' ') => (Staged, "copied file"),

        ('U', 'U') => (Conflicted, "both modified"),
        ('D', 'D') => (Conflicted, "both deleted"),
        ('A', 'A') => (Conflicted, "both added"),
        ('A', 'U') => (Conflicted, "our new file conflicts with their path"),
        ('U', 'A') => (Conflicted, "their new file conflicts with our path"),
        ('D', 'U') => (Conflicted, "deleted by us, modified by them"),
        ('U', 'D') => (Conflicted, "modified by us, deleted by them"),

        _ => (Uncategorized, UNRECOGNIZED_DESCRIPTION),
    };

    Classification {
        category,
        description,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
