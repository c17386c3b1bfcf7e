//! Parser — splits raw `git status --short --branch` lines into entries.
//!
//! Stage 1 of the state pipeline. Every input line becomes exactly one
//! [`StatusEntry`] or the single [`BranchHeading`]; nothing is dropped.

use super::classifier::StatusCode;

/// One raw status line: a two-character code and the text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: StatusCode,
    /// Everything after the code, separator space included, so `code` then
    /// `rest` reproduces the line. Holds the whole line when `malformed`.
    pub rest: String,
    /// The line was too short to carry a code. `code` is blank and is not
    /// part of the line's text.
    pub malformed: bool,
}

impl StatusEntry {
    /// `rest` minus its separator space. Not tokenized, so rename arrows
    /// and spaces stay intact.
    pub fn path(&self) -> &str {
        path_of(&self.rest)
    }
}

pub(crate) fn path_of(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// The `## <branch>` line printed first by `git status --branch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchHeading {
    pub descriptor: String,
}

/// Parsed snapshot plus the raw line widths the layout engine needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatus {
    pub heading: Option<BranchHeading>,
    pub entries: Vec<StatusEntry>,
    /// Character length of the longest raw line, heading included.
    pub max_line_len: usize,
}

/// Parse an ordered sequence of status lines.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> ParsedStatus {
    let mut parsed = ParsedStatus::default();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let line = line.strip_suffix('\r').unwrap_or(line);
        parsed.max_line_len = parsed.max_line_len.max(line.chars().count());

        let Some(code) = StatusCode::from_prefix(line) else {
            parsed.entries.push(StatusEntry {
                code: StatusCode::BLANK,
                rest: line.to_string(),
                malformed: true,
            });
            continue;
        };

        let rest = split_rest(line);

        if index == 0 && code == StatusCode::HEADING {
            parsed.heading = Some(BranchHeading {
                descriptor: path_of(rest).to_string(),
            });
        } else {
            parsed.entries.push(StatusEntry {
                code,
                rest: rest.to_string(),
                malformed: false,
            });
        }
    }

    parsed
}

/// Text after the two code characters.
fn split_rest(line: &str) -> &str {
    line.char_indices()
        .nth(2)
        .map_or("", |(offset, _)| &line[offset..])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
