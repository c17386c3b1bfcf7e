//! History helpers: `last` and `uncommit`.

use anyhow::{Context, Result};
use colored::Colorize;

use super::{CommandContext, Outcome, emit, lines_block};
use crate::git;

/// Width used when neither a flag, config, nor a terminal supplies one.
const FALLBACK_WIDTH: usize = 80;

const ELLIPSIS: &str = "...";

const ONELINE_FORMAT: &str = "--format=%h %s";

// ---------------------------------------------------------------------------
// gitstate last
// ---------------------------------------------------------------------------

/// Print recent commits, one line each, cut to fit the terminal.
pub fn run_last(
    ctx: &CommandContext,
    count: Option<usize>,
    width: Option<usize>,
) -> Result<Outcome> {
    let count = count.unwrap_or(ctx.config.last.count).to_string();
    let width = width
        .or(ctx.config.last.width)
        .or_else(terminal_width)
        .unwrap_or(FALLBACK_WIDTH);

    let output = git::run_git_checked(ctx.dir(), &["log", "-n", &count, ONELINE_FORMAT])?;
    let lines: Vec<String> = output
        .stdout
        .lines()
        .map(|line| highlight_hash(&truncate_line(line, width)))
        .collect();

    emit(&lines_block(&lines))?;
    Ok(Outcome::default())
}

fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
}

/// Cut `line` to at most `width` characters, marking the cut with `...`.
pub fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }

    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Colour the leading abbreviated hash of a `%h %s` line.
fn highlight_hash(line: &str) -> String {
    match line.split_once(' ') {
        Some((hash, subject)) => format!("{} {subject}", hash.yellow()),
        None => line.yellow().to_string(),
    }
}

// ---------------------------------------------------------------------------
// gitstate uncommit
// ---------------------------------------------------------------------------

/// Undo the last commit, keeping its changes staged.
pub fn run_uncommit(ctx: &CommandContext) -> Result<Outcome> {
    let head = git::run_git_checked(ctx.dir(), &["log", "-1", ONELINE_FORMAT])?;
    let summary = head
        .stdout
        .lines()
        .next()
        .context("repository has no commits")?
        .to_string();

    git::run_git_checked(ctx.dir(), &["reset", "--soft", "HEAD~1"])
        .context("cannot uncommit the root commit")?;

    emit(&format!("Uncommitted: {}\n", highlight_hash(&summary)))?;
    Ok(Outcome::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
