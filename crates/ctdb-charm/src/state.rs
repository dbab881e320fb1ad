//! Durable unit state.
//!
//! A single-field record persisted as JSON: the last leader address this
//! unit accepted from the peer relation. Loaded at startup, flushed on
//! every accepted update. Once non-empty it only ever changes to a
//! different non-empty value; there is no path back to "no leader".

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use ctdb_common::CharmError;
use serde::{Deserialize, Serialize};

/// The on-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateRecord {
    /// Last accepted leader address; empty until one is observed
    #[serde(default)]
    pub leader_ip: String,
}

/// Persisted state for this unit
#[derive(Debug)]
pub struct StoredState {
    path: PathBuf,
    record: StateRecord,
}

impl StoredState {
    /// Load state from `path`. A missing file is a fresh unit; an
    /// unreadable one is logged and treated the same rather than
    /// blocking event handling.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt state file");
                    StateRecord::default()
                }
            },
            Err(_) => StateRecord::default(),
        };
        Self { path, record }
    }

    /// Currently cached leader address, empty if none seen yet
    pub fn leader_ip(&self) -> &str {
        &self.record.leader_ip
    }

    /// Apply an observed `leader-ip` value. Only a non-empty value that
    /// differs from the cached one is accepted; an accepted value is
    /// flushed to disk immediately. Returns whether the observation was
    /// accepted.
    pub fn accept_leader_ip(&mut self, observed: &str) -> Result<bool> {
        if observed.is_empty() || observed == self.record.leader_ip {
            return Ok(false);
        }
        self.record.leader_ip = observed.to_string();
        self.flush()?;
        Ok(true)
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CharmError::State(format!("{}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(&self.record)
            .map_err(|e| CharmError::State(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| CharmError::State(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), "flushed unit state");
        Ok(())
    }
}
