pub mod stash;

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl GitOutput {
    /// stdout followed by stderr, the way a terminal would interleave them
    /// for short commands.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}{}", self.stdout, self.stderr),
        }
    }
}

/// Run `git <args>` in `dir` and capture its output, whatever the exit code.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed executing git {}", args.join(" ")))?;

    Ok(GitOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
        success: output.status.success(),
    })
}

/// Like [`run_git`], but a non-zero exit is an error carrying git's stderr.
pub fn run_git_checked(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    let output = run_git(dir, args)?;
    if !output.success {
        bail!(
            "git {} failed ({}): {}",
            args.join(" "),
            output
                .exit_code
                .map_or_else(|| "signal".to_string(), |code| format!("exit {code}")),
            output.stderr.trim()
        );
    }
    Ok(output)
}

/// Name of the checked-out branch (empty when HEAD is detached).
pub fn current_branch(dir: &Path) -> Result<String> {
    let output = run_git_checked(dir, &["branch", "--show-current"])?;
    Ok(output.stdout.trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
