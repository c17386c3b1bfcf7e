//! Parsing of `git stash list` output.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::run_git_checked;

static STASH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^stash@\{(\d+)\}: (?:On|WIP on) [^:]*: (.*)$").expect("valid stash regex")
});

/// One line of `git stash list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub index: usize,
    pub message: String,
    /// The line exactly as git printed it.
    pub line: String,
}

impl StashEntry {
    /// The `stash@{N}` revision naming this entry.
    pub fn reference(&self) -> String {
        format!("stash@{{{}}}", self.index)
    }
}

/// Parse `git stash list` output, skipping lines that do not look like
/// stash entries.
pub fn parse_stash_list(raw: &str) -> Vec<StashEntry> {
    raw.lines()
        .filter_map(|line| {
            let caps = STASH_LINE.captures(line)?;
            Some(StashEntry {
                index: caps[1].parse().ok()?,
                message: caps[2].to_string(),
                line: line.to_string(),
            })
        })
        .collect()
}

pub fn list(dir: &Path) -> Result<Vec<StashEntry>> {
    let output = run_git_checked(dir, &["stash", "list"])?;
    Ok(parse_stash_list(&output.stdout))
}

/// Newest stash whose message is exactly `name`.
pub fn find_named<'a>(stashes: &'a [StashEntry], name: &str) -> Option<&'a StashEntry> {
    stashes.iter().find(|s| s.message == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
