//! Charm options delivered by the platform.
//!
//! These are the operator-facing knobs from `config-get`, as opposed to
//! the local agent settings in [`crate::settings`].

use serde::Deserialize;

/// Typed view of the charm's `config-get` output
#[derive(Debug, Clone, Deserialize)]
pub struct CharmOptions {
    /// CTDB log level; validated against the allow-list before use
    #[serde(rename = "ctdb-log-level")]
    pub log_level: String,

    /// Recovery lock path; empty when the operator has not set one
    #[serde(rename = "ctdb-recovery-lock", default)]
    pub recovery_lock: String,

    /// Whether smbd share checks are skipped by the event scripts
    #[serde(rename = "ctdb-samba-skip-share-check", default)]
    pub skip_share_check: bool,
}

impl Default for CharmOptions {
    fn default() -> Self {
        Self {
            log_level: "NOTICE".to_string(),
            recovery_lock: String::new(),
            skip_share_check: false,
        }
    }
}
