use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gitstate::analytics::events::{self, CommandEvent};
use gitstate::cli::{self, CommandContext, Outcome, branch, history, stash};
use gitstate::config::{self, schema::ColorMode};

#[derive(Debug, Parser)]
#[command(name = "gitstate")]
#[command(about = "Readable working-tree status and everyday git shortcuts")]
struct App {
    /// Run as if started in <DIR>
    #[arg(short = 'C', global = true, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Colour output: auto (default), always, never
    #[arg(long, global = true)]
    color: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show staged, unstaged, and conflicted changes grouped into sections
    State {
        /// Leave out the branch heading
        #[arg(long)]
        no_branch: bool,
    },
    /// Render `git status --short [--branch]` output read from stdin
    Render,
    /// Create and switch to feature-<branch>-<random> from the current branch
    Feature,
    /// Stash unstaged changes under the "hidden" name
    Hide,
    /// List the files in the hidden stash
    Hidden,
    /// Restore the hidden stash
    Unhide,
    /// Pop a stash by index, or list stashes when no index is given
    Pluck {
        index: Option<usize>,
    },
    /// Show recent commits truncated to the terminal width
    Last {
        /// Number of commits to show
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Output width (defaults to the terminal width)
        #[arg(long)]
        width: Option<usize>,
    },
    /// Undo the last commit, keeping its changes staged
    Uncommit,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default config to ~/.gitstate/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `state.margin 2`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::State { .. } => "state",
            Self::Render => "render",
            Self::Feature => "feature",
            Self::Hide => "hide",
            Self::Hidden => "hidden",
            Self::Unhide => "unhide",
            Self::Pluck { .. } => "pluck",
            Self::Last { .. } => "last",
            Self::Uncommit => "uncommit",
            Self::Config { .. } => "config",
        }
    }
}

fn main() -> Result<()> {
    let app = App::parse();

    let dir = match app.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let mut cfg = config::load(&dir);
    if let Some(mode) = app.color.as_deref() {
        cfg.general.color = config::parse_color(mode)
            .with_context(|| format!("invalid --color value '{mode}'"))?;
    }
    apply_color_mode(cfg.general.color);
    let logging = cfg.logging.clone();
    let ctx = CommandContext::new(dir, cfg);

    let name = app.command.name();
    let started = Instant::now();
    let result = dispatch(&ctx, app.command);

    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut event = CommandEvent::new(name, result.is_ok(), elapsed);
    match &result {
        Ok(outcome) => event.rows = outcome.rows,
        Err(err) => event.error = Some(format!("{err:#}")),
    }
    events::log_event(&logging, &event);

    result.map(|_| ())
}

fn dispatch(ctx: &CommandContext, command: Commands) -> Result<Outcome> {
    match command {
        Commands::State { no_branch } => cli::run_state(ctx, no_branch),
        Commands::Render => cli::run_render(ctx),
        Commands::Feature => branch::run_feature(ctx),
        Commands::Hide => stash::run_hide(ctx),
        Commands::Hidden => stash::run_hidden(ctx),
        Commands::Unhide => stash::run_unhide(ctx),
        Commands::Pluck { index } => stash::run_pluck(ctx, index),
        Commands::Last { count, width } => history::run_last(ctx, count, width),
        Commands::Uncommit => history::run_uncommit(ctx),
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show(ctx),
                ConfigAction::Init { force } => cli::run_config_init(force),
                ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
                ConfigAction::Reset => cli::run_config_reset(),
            }?;
            Ok(Outcome::default())
        }
    }
}

/// `colored` honours `NO_COLOR` and `CLICOLOR*` itself; auto mode adds the
/// terminal check.
fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {
            if !std::io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}
