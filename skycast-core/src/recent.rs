//! Bounded recent-search history, persisted as a JSON list.
//!
//! The list holds at most [`RECENT_CAPACITY`] entries, most recent first.
//! Persistence failures are logged and swallowed; history is a convenience,
//! never a reason to fail a search.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use crate::model::CURRENT_LOCATION_LABEL;

/// Maximum number of remembered searches.
pub const RECENT_CAPACITY: usize = 5;

const RECENT_FILE: &str = "recent_searches.json";

/// File-backed store for the recent-search list.
#[derive(Debug, Clone)]
pub struct RecentSearchStore {
    path: PathBuf,
}

impl RecentSearchStore {
    /// Store rooted in the platform data directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .context("could not determine data directory")?;
        Ok(Self { path: dirs.data_dir().join(RECENT_FILE) })
    }

    /// Store rooted at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted list. An absent or unreadable file reads as empty.
    pub fn load(&self) -> Vec<String> {
        if !self.path.exists() {
            return Vec::new();
        }
        match self.try_load() {
            Ok(list) => list,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read recent searches");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    /// Push a query onto the persisted list. Returns the updated list; a
    /// failed write keeps the in-memory result and logs the failure.
    pub fn record(&self, query: &str) -> Vec<String> {
        let mut list = self.load();
        if push_recent(&mut list, query) {
            if let Err(err) = self.persist(&list) {
                warn!(path = %self.path.display(), error = %err, "could not save recent searches");
            }
        }
        list
    }

    fn persist(&self, list: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string(list).context("failed to encode recent searches")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// Insert a query at the front of the list, dropping any case-insensitive
/// duplicate and trimming to capacity. Returns whether the list changed.
pub fn push_recent(list: &mut Vec<String>, query: &str) -> bool {
    let trimmed = query.trim();
    if trimmed.is_empty() || trimmed == CURRENT_LOCATION_LABEL {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    list.retain(|entry| entry.to_lowercase() != lowered);
    list.insert(0, trimmed.to_string());
    list.truncate(RECENT_CAPACITY);
    true
}
