//! Stash helpers: `hide`, `hidden`, `unhide`, and `pluck`.
//!
//! `hide` parks unstaged changes in a stash with a well-known message so
//! they can be listed and restored by name instead of by index.

use anyhow::{Result, bail};
use colored::Colorize;

use super::{CommandContext, Outcome, emit, lines_block};
use crate::git::{self, stash};

// ---------------------------------------------------------------------------
// gitstate hidden
// ---------------------------------------------------------------------------

/// Files stored in the newest stash named `stash_name`, if there is one.
fn hidden_files(ctx: &CommandContext) -> Result<Option<(stash::StashEntry, Vec<String>)>> {
    let stashes = stash::list(ctx.dir())?;
    let Some(entry) = stash::find_named(&stashes, &ctx.config.hide.stash_name).cloned() else {
        return Ok(None);
    };

    let reference = entry.reference();
    let output = git::run_git_checked(
        ctx.dir(),
        &["stash", "show", "--name-only", &reference],
    )?;
    let files = output
        .stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    Ok(Some((entry, files)))
}

/// `  <label>: <file>` lines, files coloured with `paint`.
fn format_file_list(label: &str, files: &[String], paint: fn(&str) -> String) -> String {
    let lines: Vec<String> = files
        .iter()
        .map(|file| format!("  {label}: {}", paint(file)))
        .collect();
    lines_block(&lines)
}

fn red(text: &str) -> String {
    text.red().to_string()
}

fn green(text: &str) -> String {
    text.green().to_string()
}

pub fn run_hidden(ctx: &CommandContext) -> Result<Outcome> {
    if let Some((_, files)) = hidden_files(ctx)? {
        emit(&format_file_list("Hidden", &files, red))?;
    }
    Ok(Outcome::default())
}

// ---------------------------------------------------------------------------
// gitstate hide / unhide
// ---------------------------------------------------------------------------

/// Stash unstaged changes under the hide name, folding in anything hidden
/// earlier, then list what is hidden.
pub fn run_hide(ctx: &CommandContext) -> Result<Outcome> {
    // A failed merge leaves the older hidden stash in place; `hidden` then
    // lists the newest one.
    if let Err(err) = restore_hidden(ctx) {
        eprintln!("[gitstate] could not fold in earlier hidden changes: {err:#}");
    }

    let name = ctx.config.hide.stash_name.as_str();
    git::run_git_checked(ctx.dir(), &["stash", "push", "--keep-index", "-m", name])?;

    run_hidden(ctx)
}

pub fn run_unhide(ctx: &CommandContext) -> Result<Outcome> {
    if let Some(files) = restore_hidden(ctx)? {
        emit(&format_file_list("Unhidden", &files, green))?;
    }
    Ok(Outcome::default())
}

/// Pop the hidden stash. Returns the restored files, or `None` when nothing
/// is hidden.
fn restore_hidden(ctx: &CommandContext) -> Result<Option<Vec<String>>> {
    let Some((entry, files)) = hidden_files(ctx)? else {
        return Ok(None);
    };

    git::run_git_checked(ctx.dir(), &["stash", "pop", &entry.reference()])?;
    Ok(Some(files))
}

// ---------------------------------------------------------------------------
// gitstate pluck
// ---------------------------------------------------------------------------

/// Pop a stash by index, or list the stashes when no index is given.
pub fn run_pluck(ctx: &CommandContext, index: Option<usize>) -> Result<Outcome> {
    let stashes = stash::list(ctx.dir())?;

    let Some(index) = index else {
        emit(&format_pluck_usage(&stashes))?;
        return Ok(Outcome::default());
    };

    let Some(target) = stashes.iter().find(|s| s.index == index) else {
        bail!("no stash at index {index} (see `gitstate pluck` for the list)");
    };

    let mut out = format!("Plucking: {}\n", target.line);

    let popped = git::run_git(ctx.dir(), &["stash", "pop", &target.reference()])?;
    if !popped.success {
        out.push_str(&format_pop_error(&popped.stderr));
    }

    let remaining = stash::list(ctx.dir())?;
    if !remaining.is_empty() {
        out.push_str("\nRemaining stashes:\n");
        let lines: Vec<&str> = remaining.iter().map(|s| s.line.as_str()).collect();
        out.push_str(&lines_block(&lines));
    }

    emit(&out)?;
    Ok(Outcome::default())
}

fn format_pluck_usage(stashes: &[stash::StashEntry]) -> String {
    let mut out = String::new();
    if !stashes.is_empty() {
        out.push_str("Available stashes:\n");
        let lines: Vec<&str> = stashes.iter().map(|s| s.line.as_str()).collect();
        out.push_str(&lines_block(&lines));
        out.push('\n');
    }
    out.push_str("Usage: gitstate pluck <index>\n");
    out
}

/// The part of a failed `git stash pop` worth showing: from the first
/// `error:` line through the line mentioning `merge.`, with a blank line
/// before the `Please ...` advice. Falls back to all of stderr.
fn format_pop_error(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();

    let block = lines
        .iter()
        .position(|line| line.starts_with("error:"))
        .and_then(|start| {
            let end = lines[start..]
                .iter()
                .position(|line| line.contains("merge."))?;
            Some(&lines[start..=start + end])
        });

    let Some(block) = block else {
        let trimmed = stderr.trim_end();
        return if trimmed.is_empty() {
            String::new()
        } else {
            format!("\n{trimmed}\n")
        };
    };

    let mut out = String::from("\n");
    for line in block {
        if line.starts_with("Please") {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
