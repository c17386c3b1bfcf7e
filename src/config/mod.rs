/// Configuration system for gitstate.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::GitstateConfig::default()`]
/// 2. **User global config** — `~/.gitstate/config.toml`
/// 3. **Project local config** — `.gitstate.toml` in the directory gitstate runs in
/// 4. **Environment variables** — `GITSTATE_*` overrides (highest precedence)
///
/// A TOML layer replaces the one before it; missing sections in a file fall
/// back to built-in defaults.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::GitstateConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration for commands run in `dir`.
///
/// Merges defaults → global TOML → project TOML → env vars.
pub fn load(dir: &Path) -> GitstateConfig {
    let mut config = GitstateConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(Some(project_config_path(dir))) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Malformed files are ignored so a typo never blocks a status check.
fn load_toml_file(path: Option<PathBuf>) -> Option<GitstateConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gitstate").join("config.toml"))
}

fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(".gitstate.toml")
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file(dir: &Path) -> PathBuf {
    project_config_path(dir)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(Path::new(path).to_path_buf()),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `GITSTATE_COLOR` — `auto`, `always`, `never`
/// - `GITSTATE_MARGIN` — description column margin
/// - `GITSTATE_WIDTH` — fixed width for `gitstate last`
/// - `GITSTATE_LOGGING` — events log enabled (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut GitstateConfig) {
    if let Ok(val) = std::env::var("GITSTATE_COLOR")
        && let Some(mode) = parse_color(&val)
    {
        config.general.color = mode;
    }
    if let Ok(val) = std::env::var("GITSTATE_MARGIN")
        && let Ok(margin) = val.parse::<usize>()
    {
        config.state.margin = margin;
    }
    if let Ok(val) = std::env::var("GITSTATE_WIDTH")
        && let Ok(width) = val.parse::<usize>()
    {
        config.last.width = Some(width);
    }
    if let Ok(val) = std::env::var("GITSTATE_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn parse_color(val: &str) -> Option<schema::ColorMode> {
    match val.to_ascii_lowercase().as_str() {
        "auto" => Some(schema::ColorMode::Auto),
        "always" => Some(schema::ColorMode::Always),
        "never" => Some(schema::ColorMode::Never),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.gitstate/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.gitstate/ directory")?;
    }

    fs::write(&path, GitstateConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (e.g. `state.margin`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&GitstateConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path, keeping the
/// type of the value it replaces.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. state.margin: '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        // Unset optional keys such as `last.width` take the type the value reads as.
        _ => infer_toml_value(raw_value),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

fn infer_toml_value(raw_value: &str) -> toml::Value {
    if let Ok(n) = raw_value.parse::<i64>() {
        toml::Value::Integer(n)
    } else if let Ok(b) = raw_value.parse::<bool>() {
        toml::Value::Boolean(b)
    } else {
        toml::Value::String(raw_value.to_string())
    }
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config(dir: &Path) -> Result<String> {
    let config = load(dir);
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
