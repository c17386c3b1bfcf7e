//! Invocation event log — one JSON line per `gitstate` command.
//!
//! Log file: `~/.gitstate/events.jsonl` (configurable under `[logging]`).

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{self, schema::LoggingConfig};

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    pub timestamp: String,
    /// Subcommand name, e.g. `"state"` or `"pluck"`.
    pub command: String,
    pub success: bool,
    pub duration_ms: u64,
    /// Rendered row count (`state` and `render` only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl CommandEvent {
    pub fn new(command: &str, success: bool, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            success,
            duration_ms,
            rows: None,
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an event to the configured log.
///
/// Best-effort: failures are silently ignored.
pub fn log_event(settings: &LoggingConfig, event: &CommandEvent) {
    if !settings.enabled {
        return;
    }
    if let Some(path) = config::expand_home(&settings.path) {
        let _ = append_event(&path, event);
    }
}

fn append_event(path: &Path, event: &CommandEvent) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Resolved path of the events log, if logging has one.
pub fn events_log_path(settings: &LoggingConfig) -> Option<PathBuf> {
    config::expand_home(&settings.path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
