//! Configuration schema and defaults for gitstate.
//!
//! Defines the TOML-serializable configuration structure with the sections
//! `[general]`, `[state]`, `[last]`, `[hide]`, `[feature]`, and `[logging]`.
//!
//! Every field has a built-in default. Users only need to set the values
//! they want to override.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level gitstate configuration.
///
/// Maps directly to `~/.gitstate/config.toml` and `.gitstate.toml`. All
/// sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitstateConfig {
    pub general: GeneralConfig,
    pub state: StateConfig,
    pub last: LastConfig,
    pub hide: HideConfig,
    pub feature: FeatureConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// When to emit ANSI colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub color: ColorMode,
}

// ---------------------------------------------------------------------------
// [state]
// ---------------------------------------------------------------------------

/// Which untracked files `git status` reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UntrackedFiles {
    No,
    Normal,
    #[default]
    All,
}

impl UntrackedFiles {
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::No => "--untracked-files=no",
            Self::Normal => "--untracked-files=normal",
            Self::All => "--untracked-files=all",
        }
    }
}

impl std::fmt::Display for UntrackedFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Normal => write!(f, "normal"),
            Self::All => write!(f, "all"),
        }
    }
}

/// `gitstate state` report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Spaces between the longest status line and the description column.
    pub margin: usize,
    pub untracked_files: UntrackedFiles,
    /// Print the `Branch:` heading.
    pub show_branch: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            margin: 4,
            untracked_files: UntrackedFiles::default(),
            show_branch: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [last]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LastConfig {
    /// Number of commits shown.
    pub count: usize,
    /// Fixed output width. Unset means the detected terminal width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

impl Default for LastConfig {
    fn default() -> Self {
        Self {
            count: 20,
            width: None,
        }
    }
}

// ---------------------------------------------------------------------------
// [hide] / [feature]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HideConfig {
    /// Stash message used by `hide`, `hidden`, and `unhide`.
    pub stash_name: String,
}

impl Default for HideConfig {
    fn default() -> Self {
        Self {
            stash_name: "hidden".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// First dash-separated component of feature branch names.
    pub prefix: String,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            prefix: "feature".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether invocations are appended to the events log.
    pub enabled: bool,
    /// Path to the events log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.gitstate/events.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl GitstateConfig {
    /// Annotated default config, written by `gitstate config init`.
    pub fn default_toml() -> String {
        r#"# gitstate Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (GITSTATE_*)
#   2. Project config (.gitstate.toml in current directory)
#   3. User global config (~/.gitstate/config.toml)
#   4. Built-in defaults

[general]
color = "auto"              # auto | always | never

[state]
margin = 4                  # Spaces before the description column
untracked_files = "all"     # no | normal | all
show_branch = true

[last]
count = 20
# width = 100               # Fixed width instead of the terminal width

[hide]
stash_name = "hidden"

[feature]
prefix = "feature"

[logging]
enabled = true
path = "~/.gitstate/events.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
