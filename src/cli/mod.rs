//! Subcommand implementations for gitstate.
//!
//! Provides handlers for:
//! - `gitstate render` / `gitstate state` — grouped working-tree report
//! - `gitstate feature` — branch off into a throwaway feature branch
//! - `gitstate hide|hidden|unhide|pluck` — stash helpers ([`stash`])
//! - `gitstate last|uncommit` — history helpers ([`history`])
//! - `gitstate config show|init|set|reset` — configuration management

pub mod branch;
pub mod history;
pub mod stash;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::events;
use crate::config::{self, GitstateConfig};
use crate::git;
use crate::state::{self, Emphasis};

/// Everything a handler needs: where the repository is and how to behave.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub dir: PathBuf,
    pub config: GitstateConfig,
}

impl CommandContext {
    pub fn new(dir: impl Into<PathBuf>, config: GitstateConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// What a handler reports back for the events log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub rows: Option<usize>,
}

/// Write `text` to stdout as-is.
pub fn emit(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed writing output to stdout")?;
    stdout.flush().context("failed flushing stdout")
}

// ---------------------------------------------------------------------------
// gitstate render / state
// ---------------------------------------------------------------------------

/// Codes, descriptions, and labels are always highlighted; `colored`
/// drops the escapes when colour is off.
const EMPHASIS: Emphasis = Emphasis::Highlight;

/// Render a status snapshot read from stdin.
pub fn run_render(ctx: &CommandContext) -> Result<Outcome> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed reading status lines from stdin")?;

    let lines: Vec<&str> = raw.lines().collect();
    let report = state::build(&lines, ctx.config.state.margin);
    emit(&report.render(EMPHASIS))?;

    Ok(Outcome {
        rows: Some(report.report.row_count()),
    })
}

/// Run `git status --short` and print the grouped report.
pub fn run_state(ctx: &CommandContext, no_branch: bool) -> Result<Outcome> {
    let settings = &ctx.config.state;
    let mut args = vec!["status", "--short", settings.untracked_files.as_arg()];
    if settings.show_branch && !no_branch {
        args.push("--branch");
    }

    let output = git::run_git_checked(ctx.dir(), &args)?;
    let lines: Vec<&str> = output.stdout.lines().collect();
    let report = state::build(&lines, settings.margin);
    emit(&report.render(EMPHASIS))?;

    Ok(Outcome {
        rows: Some(report.report.row_count()),
    })
}

// ---------------------------------------------------------------------------
// gitstate config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(ctx: &CommandContext) -> Result<()> {
    let toml_str = config::show_effective_config(ctx.dir())?;
    println!("{}", "Effective gitstate Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file(ctx.dir()).exists();

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.gitstate/config.toml");
    print_source(project_exists, ".gitstate.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "GITSTATE_* environment variables".dimmed()
    );

    let cfg = &ctx.config;
    if let Some(path) = events::events_log_path(&cfg.logging) {
        let state = if cfg.logging.enabled { "on" } else { "off" };
        println!();
        println!("{} {} ({state})", "Events log:".dimmed(), path.display());
    }

    Ok(())
}

fn print_source(exists: bool, name: &str) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.gitstate/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Join lines with a trailing newline after each, or nothing when empty.
pub(crate) fn lines_block<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
