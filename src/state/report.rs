//! Report builder — buckets rows into sections and renders the text block.
//!
//! Stage 5 (final) of the state pipeline. Sections always appear in
//! [`Section::ALL`] order and are skipped when empty.

use std::fmt::Write;

use colored::Colorize;

use super::layout::Layout;
use super::parser::BranchHeading;
use super::splitter::{Section, VirtualEntry};

pub const BRANCH_LABEL: &str = "Branch:";

/// How labels, codes, and descriptions are emphasized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Plain,
    /// Bold yellow, the same treatment for every emphasized token.
    Highlight,
}

impl Emphasis {
    fn apply(self, text: &str) -> String {
        match self {
            Self::Plain => text.to_string(),
            Self::Highlight if text.is_empty() => String::new(),
            Self::Highlight => text.yellow().bold().to_string(),
        }
    }
}

/// Rows grouped into non-empty sections, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub heading: Option<BranchHeading>,
    pub sections: Vec<(Section, Vec<VirtualEntry>)>,
}

impl Report {
    /// Stable partition of `rows` by section.
    pub fn build(heading: Option<BranchHeading>, rows: Vec<VirtualEntry>) -> Self {
        let mut buckets: [Vec<VirtualEntry>; 4] = Default::default();
        for row in rows {
            buckets[row.section as usize].push(row);
        }

        let sections = Section::ALL
            .into_iter()
            .zip(buckets)
            .filter(|(_, rows)| !rows.is_empty())
            .collect();

        Self { heading, sections }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|(_, rows)| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.sections.is_empty()
    }

    pub fn render(&self, layout: &Layout, emphasis: Emphasis) -> String {
        let mut out = String::new();

        if let Some(heading) = &self.heading {
            let _ = writeln!(
                out,
                "{} {}",
                emphasis.apply(BRANCH_LABEL),
                heading.descriptor
            );
        }

        for (section, rows) in &self.sections {
            out.push('\n');
            out.push_str(&emphasis.apply(section.label()));
            out.push('\n');

            for row in rows {
                let _ = writeln!(
                    out,
                    "{}{}{}{}",
                    emphasis.apply(&row.code_text()),
                    row.rest,
                    " ".repeat(layout.padding(row)),
                    emphasis.apply(row.description),
                );
            }
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
