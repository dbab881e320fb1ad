//! Samba/CTDB service and package management.
//!
//! Works independently from the platform so it can be exercised without
//! a live hook context. Failure policy follows the charm's contract:
//! service control failures are logged and swallowed, package operations
//! are fatal to the event.

use anyhow::{Context, Result};
use ctdb_common::constants::CTDB_SERVICE;

use crate::exec::{CommandRunner, SystemRunner};

/// Manages the CTDB service and its packages
pub struct CtdbManager {
    runner: Box<dyn CommandRunner>,
    packages: Vec<String>,
}

impl CtdbManager {
    pub fn new(packages: Vec<String>) -> Self {
        Self::with_runner(Box::new(SystemRunner), packages)
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>, packages: Vec<String>) -> Self {
        Self { runner, packages }
    }

    /// Start ctdb; failure is logged, not propagated
    pub fn start(&self) {
        self.control("start");
    }

    /// Stop ctdb; failure is logged, not propagated
    pub fn stop(&self) {
        self.control("stop");
    }

    /// Restart ctdb; failure is logged, not propagated
    #[allow(dead_code)]
    pub fn restart(&self) {
        self.control("restart");
    }

    fn control(&self, verb: &str) {
        match self.runner.run("systemctl", &[verb, CTDB_SERVICE]) {
            Ok(_) => tracing::info!(verb, service = CTDB_SERVICE, "service control succeeded"),
            Err(e) => tracing::warn!(verb, service = CTDB_SERVICE, error = %e, "service control failed"),
        }
    }

    /// Install the managed packages; failure aborts the event
    pub fn install(&self) -> Result<()> {
        let mut args = vec!["install", "-y", "-q"];
        args.extend(self.packages.iter().map(String::as_str));
        self.runner
            .run("apt-get", &args)
            .context("Failed to install samba/ctdb packages")?;
        tracing::info!(packages = ?self.packages, "packages installed");
        Ok(())
    }

    /// Remove the managed packages; failure aborts the event
    pub fn remove(&self) -> Result<()> {
        let mut args = vec!["remove", "-y", "-q"];
        args.extend(self.packages.iter().map(String::as_str));
        self.runner
            .run("apt-get", &args)
            .context("Failed to remove samba/ctdb packages")?;
        tracing::info!(packages = ?self.packages, "packages removed");
        Ok(())
    }

    /// Installed ctdb version, or None if it cannot be queried
    pub fn version(&self) -> Option<String> {
        match self.runner.run("ctdb", &["version"]) {
            Ok(out) => out.lines().next().map(|line| line.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "could not query ctdb version");
                None
            }
        }
    }
}
