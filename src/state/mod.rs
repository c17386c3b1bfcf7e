//! Working-tree status report engine.
//!
//! Turns the short listing of `git status --short --branch` into a grouped,
//! column-aligned report. The engine is pure: it never touches the
//! repository and never fails on malformed input.
//!
//! # Pipeline Stages
//!
//! 1. **Parser** — split each line into a two-character code and a path;
//!    recognize the leading `##` branch heading.
//! 2. **Classifier** — total lookup from code to category and description.
//! 3. **Splitter** — one row per entry, two for Mixed codes (an unstaged
//!    half and a staged half).
//! 4. **Layout** — one description column for every row, derived from the
//!    longest raw line.
//! 5. **Report** — bucket rows into `Conflicts`, `Unstaged`, `Staged`,
//!    `Uncategorized` and render the non-empty ones.

pub mod classifier;
pub mod layout;
pub mod parser;
pub mod report;
pub mod splitter;

pub use classifier::{Category, Classification, StatusCode, classify};
pub use layout::{DEFAULT_MARGIN, Layout};
pub use parser::{BranchHeading, ParsedStatus, StatusEntry};
pub use report::{Emphasis, Report};
pub use splitter::{Section, VirtualEntry};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Rendering knobs. The default is plain text; emphasis is opt-in because
/// library callers may not be writing to a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces between the longest raw line and the description column.
    pub margin: usize,
    pub emphasis: Emphasis,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            emphasis: Emphasis::Plain,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Output of one pass: the grouped report and its column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateReport {
    pub report: Report,
    pub layout: Layout,
}

impl StateReport {
    pub fn render(&self, emphasis: Emphasis) -> String {
        self.report.render(&self.layout, emphasis)
    }
}

/// Run stages 1–4 and group the rows, without rendering.
pub fn build<S: AsRef<str>>(lines: &[S], margin: usize) -> StateReport {
    let parsed = parser::parse(lines);
    let layout = Layout::new(parsed.max_line_len, margin);
    let rows = splitter::split_all(&parsed.entries);

    StateReport {
        report: Report::build(parsed.heading, rows),
        layout,
    }
}

/// Render status lines with default options: margin 4 and
/// [`Emphasis::Plain`], so the result carries no ANSI escapes whatever the
/// colour settings. Use [`render_with`] and [`Emphasis::Highlight`] for the
/// emphasized codes, descriptions, and labels the CLI prints.
pub fn render<S: AsRef<str>>(lines: &[S]) -> String {
    render_with(lines, &RenderOptions::default())
}

pub fn render_with<S: AsRef<str>>(lines: &[S], options: &RenderOptions) -> String {
    build(lines, options.margin).render(options.emphasis)
}

/// Render a captured snapshot, e.g. the stdout of `git status --short`.
pub fn render_text(raw: &str, options: &RenderOptions) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    render_with(&lines, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
