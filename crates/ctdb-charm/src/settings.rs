//! Local agent settings.
//!
//! Filesystem knobs for the charm itself (template directory, rendered
//! file paths, state path, package list). Not to be confused with the
//! operator-facing charm options in [`crate::options`], which come from
//! the platform.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ctdb_common::constants::{
    CONTAINER_MARKER, CTDB_CONF_PATH, CTDB_NODES_PATH, CTDB_PACKAGES, SCRIPT_OPTIONS_PATH,
    STATE_PATH, TEMPLATE_DIR,
};

/// Agent settings, loaded from a TOML file with per-field defaults
#[derive(Debug, Clone, Deserialize)]
pub struct CharmSettings {
    /// Directory holding the handlebars templates
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Where the rendered ctdb.conf is written
    #[serde(default = "default_ctdb_conf_path")]
    pub ctdb_conf_path: PathBuf,

    /// Where the rendered script.options is written
    #[serde(default = "default_script_options_path")]
    pub script_options_path: PathBuf,

    /// CTDB nodes file, bootstrapped with our own address when absent
    #[serde(default = "default_nodes_path")]
    pub nodes_path: PathBuf,

    /// Persisted unit state record
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Path whose existence marks a container environment
    #[serde(default = "default_container_marker")]
    pub container_marker: PathBuf,

    /// Packages managed on install/remove
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
}

// Default value functions
fn default_template_dir() -> PathBuf {
    PathBuf::from(TEMPLATE_DIR)
}
fn default_ctdb_conf_path() -> PathBuf {
    PathBuf::from(CTDB_CONF_PATH)
}
fn default_script_options_path() -> PathBuf {
    PathBuf::from(SCRIPT_OPTIONS_PATH)
}
fn default_nodes_path() -> PathBuf {
    PathBuf::from(CTDB_NODES_PATH)
}
fn default_state_path() -> PathBuf {
    PathBuf::from(STATE_PATH)
}
fn default_container_marker() -> PathBuf {
    PathBuf::from(CONTAINER_MARKER)
}
fn default_packages() -> Vec<String> {
    CTDB_PACKAGES.iter().map(|p| p.to_string()).collect()
}

impl CharmSettings {
    /// Load settings from file, falling back to defaults when absent
    pub fn load(config_path: &str) -> Result<Self> {
        if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load settings file")?;

            settings
                .try_deserialize()
                .context("Failed to parse settings")
        } else {
            tracing::warn!(path = config_path, "settings file not found, using defaults");
            Ok(Self::default())
        }
    }
}

impl Default for CharmSettings {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            ctdb_conf_path: default_ctdb_conf_path(),
            script_options_path: default_script_options_path(),
            nodes_path: default_nodes_path(),
            state_path: default_state_path(),
            container_marker: default_container_marker(),
            packages: default_packages(),
        }
    }
}
