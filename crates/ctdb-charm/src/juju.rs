//! Platform (Juju) hook tool integration.
//!
//! Models the platform primitives the charm depends on: the leadership
//! oracle, the scoped peer relation store, the network binding resolver,
//! charm options, and unit status. The production backend shells out to
//! the hook tools available in a hook context and parses their
//! `--format=json` output.

use std::env;

use anyhow::{Context, Result};
use ctdb_common::constants::{PEER_RELATION, env_vars};
use ctdb_common::{CharmError, UnitName, UnitStatus};

use crate::exec::{CommandRunner, SystemRunner};
use crate::options::CharmOptions;

/// Platform primitives available to event handlers
pub trait HookBackend {
    /// This unit's name, from the hook context
    fn unit_name(&self) -> Result<UnitName>;

    /// Remote unit for relation hooks, if any
    fn remote_unit(&self) -> Option<UnitName>;

    /// Leadership oracle: is this unit the current leader?
    fn is_leader(&self) -> Result<bool>;

    /// Read a key from the application-scoped bucket of the peer relation
    fn relation_get_app(&self, key: &str) -> Result<Option<String>>;

    /// Write a key into our application-scoped bucket (leader only)
    fn relation_set_app(&mut self, key: &str, value: &str) -> Result<()>;

    /// Write a key into our own unit-scoped bucket
    fn relation_set_unit(&mut self, key: &str, value: &str) -> Result<()>;

    /// Local address to advertise for the peer relation
    fn bind_address(&self) -> Result<String>;

    /// Operator-set charm options
    fn charm_config(&self) -> Result<CharmOptions>;

    /// Report workload status to the platform
    fn set_status(&mut self, status: &UnitStatus) -> Result<()>;

    /// Surface the workload version in the platform's status output
    fn application_version_set(&mut self, version: &str) -> Result<()>;
}

/// Hook tool backend used in a real hook context
pub struct JujuBackend {
    relation_name: &'static str,
    runner: Box<dyn CommandRunner>,
}

impl JujuBackend {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            relation_name: PEER_RELATION,
            runner,
        }
    }

    /// Peer relation id: the hook context provides it for relation
    /// hooks, otherwise ask `relation-ids` for the established one.
    fn relation_id(&self) -> Result<String> {
        if let Ok(id) = env::var(env_vars::RELATION_ID) {
            return Ok(id);
        }

        let out = self
            .runner
            .run("relation-ids", &["--format=json", self.relation_name])?;
        let ids: Vec<String> =
            serde_json::from_str(&out).context("Failed to parse relation-ids output")?;
        ids.into_iter().next().ok_or_else(|| {
            CharmError::Relation(format!("no {} relation established", self.relation_name)).into()
        })
    }
}

impl HookBackend for JujuBackend {
    fn unit_name(&self) -> Result<UnitName> {
        let name = env::var(env_vars::UNIT_NAME)
            .with_context(|| format!("{} not set; not in a hook context?", env_vars::UNIT_NAME))?;
        Ok(UnitName::new(name))
    }

    fn remote_unit(&self) -> Option<UnitName> {
        env::var(env_vars::REMOTE_UNIT).ok().map(UnitName::new)
    }

    fn is_leader(&self) -> Result<bool> {
        let out = self.runner.run("is-leader", &["--format=json"])?;
        serde_json::from_str(&out).context("Failed to parse is-leader output")
    }

    fn relation_get_app(&self, key: &str) -> Result<Option<String>> {
        let rid = self.relation_id()?;
        let unit = self.unit_name()?;
        let out = self.runner.run(
            "relation-get",
            &["--format=json", "-r", &rid, "--app", key, unit.as_str()],
        )?;
        if out.is_empty() {
            return Ok(None);
        }
        let value: Option<String> =
            serde_json::from_str(&out).context("Failed to parse relation-get output")?;
        Ok(value)
    }

    fn relation_set_app(&mut self, key: &str, value: &str) -> Result<()> {
        let rid = self.relation_id()?;
        let pair = format!("{key}={value}");
        self.runner
            .run("relation-set", &["-r", &rid, "--app", &pair])?;
        Ok(())
    }

    fn relation_set_unit(&mut self, key: &str, value: &str) -> Result<()> {
        let rid = self.relation_id()?;
        let pair = format!("{key}={value}");
        self.runner.run("relation-set", &["-r", &rid, &pair])?;
        Ok(())
    }

    fn bind_address(&self) -> Result<String> {
        let out = self.runner.run(
            "network-get",
            &["--format=json", "--bind-address", self.relation_name],
        )?;
        serde_json::from_str(&out).context("Failed to parse network-get output")
    }

    fn charm_config(&self) -> Result<CharmOptions> {
        let out = self.runner.run("config-get", &["--format=json"])?;
        serde_json::from_str(&out).context("Failed to parse config-get output")
    }

    fn set_status(&mut self, status: &UnitStatus) -> Result<()> {
        self.runner
            .run("status-set", &[status.name(), status.message()])?;
        Ok(())
    }

    fn application_version_set(&mut self, version: &str) -> Result<()> {
        self.runner.run("application-version-set", &[version])?;
        Ok(())
    }
}

impl Default for JujuBackend {
    fn default() -> Self {
        Self::new()
    }
}
