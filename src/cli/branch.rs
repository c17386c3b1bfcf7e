//! `gitstate feature` — branch off into a throwaway feature branch.
//!
//! Branch names are `<prefix>-<current branch>-<8 hex digits>`, so the
//! original branch can be read back by splitting on dashes.

use anyhow::{Result, bail};

use super::{CommandContext, Outcome, emit};
use crate::git;

pub fn run_feature(ctx: &CommandContext) -> Result<Outcome> {
    let current = git::current_branch(ctx.dir())?;
    if current.is_empty() {
        bail!("HEAD is detached; check out a branch before starting a feature");
    }

    let status = git::run_git_checked(ctx.dir(), &["status", "--short"])?;
    let name = feature_branch_name(&ctx.config.feature.prefix, &current, &random_suffix());
    let checkout = git::run_git_checked(ctx.dir(), &["checkout", "-b", &name])?;

    emit(&format!("{}{}", status.stdout, checkout.combined()))?;
    Ok(Outcome::default())
}

pub fn feature_branch_name(prefix: &str, current: &str, suffix: &str) -> String {
    format!("{prefix}-{current}-{suffix}")
}

fn random_suffix() -> String {
    format!("{:08x}", rand::random::<u32>())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
