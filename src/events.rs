//! Audit log for stackgen runs.
//!
//! Each command appends one event to `<root>/.stackgen/events.ndjson`
//! (one JSON object per line) recording what was regenerated, repaired,
//! or indexed. The log is append-only and best-effort: a failure to
//! record an event warns on stderr and never fails the command itself.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: the command that ran (generate, update_demos, repair, manifest)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `details`: freeform object with run-specific counts

use crate::error::{Result, StackgenError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Full rebuild of all stacks from the specification table.
    Generate,
    /// Demo pages overwritten with the conversational template.
    UpdateDemos,
    /// Repair pass over generated demo pages.
    Repair,
    /// Manifest rebuilt from the output tree.
    Manifest,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Generate => write!(f, "generate"),
            EventAction::UpdateDemos => write!(f, "update_demos"),
            EventAction::Repair => write!(f, "repair"),
            EventAction::Manifest => write!(f, "manifest"),
        }
    }
}

/// An event record for the audit log, serialized as one JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific counts.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action, stamped now and
    /// attributed to USER@HOSTNAME.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            details: Value::Null,
        }
    }

    /// Attach a details object to the event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// Path of the events log under an output root.
pub fn events_file(root: &Path) -> PathBuf {
    root.join(".stackgen").join("events.ndjson")
}

/// Append an event to the log under `root`.
///
/// Creates the `.stackgen` directory on first use. The file is opened in
/// append mode so repeated runs accumulate history.
pub fn append_event(root: &Path, event: &Event) -> Result<()> {
    let path = events_file(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StackgenError::io(parent, e))?;
    }

    let line = serde_json::to_string(event)
        .map_err(|e| StackgenError::Schema(format!("failed to serialize event: {}", e)))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| StackgenError::io(&path, e))?;

    writeln!(file, "{}", line).map_err(|e| StackgenError::io(&path, e))?;

    Ok(())
}

/// Append an event, downgrading failure to a stderr warning.
///
/// Commands call this after their real work succeeded; a broken audit
/// log must not turn a successful run into a failure.
pub fn log_event_best_effort(root: &Path, event: Event) {
    if let Err(e) = append_event(root, &event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

/// Owner string in `user@host` form.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}@{}", user, host)
}
