//! In-memory platform fakes for handler tests.
//!
//! `FakeBackend` replaces the hook tools with a shared in-memory
//! relation store, and `FakeRunner` replaces subprocess execution.
//! Multiple `TestCharm` fixtures can share one `SharedRelation` to play
//! out multi-unit scenarios in a single test.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, bail};
use ctdb_common::{UnitName, UnitStatus};
use tempfile::TempDir;

use crate::exec::CommandRunner;
use crate::hooks::Charm;
use crate::juju::HookBackend;
use crate::manager::CtdbManager;
use crate::options::CharmOptions;
use crate::settings::CharmSettings;
use crate::state::StoredState;

/// The relation store as all participants see it
#[derive(Debug, Default)]
pub struct SharedRelation {
    /// Application-scoped bucket (leader-writable)
    pub app: HashMap<String, String>,
    /// Unit-scoped buckets, keyed by unit name
    pub units: HashMap<String, HashMap<String, String>>,
}

/// Hook backend over the in-memory relation store
pub struct FakeBackend {
    pub unit: UnitName,
    pub leader: bool,
    pub address: String,
    pub options: CharmOptions,
    pub remote: Option<UnitName>,
    pub relation: Rc<RefCell<SharedRelation>>,
    pub statuses: Rc<RefCell<Vec<UnitStatus>>>,
    pub app_version: Rc<RefCell<Option<String>>>,
}

impl HookBackend for FakeBackend {
    fn unit_name(&self) -> Result<UnitName> {
        Ok(self.unit.clone())
    }

    fn remote_unit(&self) -> Option<UnitName> {
        self.remote.clone()
    }

    fn is_leader(&self) -> Result<bool> {
        Ok(self.leader)
    }

    fn relation_get_app(&self, key: &str) -> Result<Option<String>> {
        Ok(self.relation.borrow().app.get(key).cloned())
    }

    fn relation_set_app(&mut self, key: &str, value: &str) -> Result<()> {
        self.relation
            .borrow_mut()
            .app
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn relation_set_unit(&mut self, key: &str, value: &str) -> Result<()> {
        self.relation
            .borrow_mut()
            .units
            .entry(self.unit.as_str().to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn bind_address(&self) -> Result<String> {
        Ok(self.address.clone())
    }

    fn charm_config(&self) -> Result<CharmOptions> {
        Ok(self.options.clone())
    }

    fn set_status(&mut self, status: &UnitStatus) -> Result<()> {
        self.statuses.borrow_mut().push(status.clone());
        Ok(())
    }

    fn application_version_set(&mut self, version: &str) -> Result<()> {
        *self.app_version.borrow_mut() = Some(version.to_string());
        Ok(())
    }
}

/// Subprocess fake for the service manager
pub struct FakeRunner {
    fail: bool,
    ctdb_version: Option<String>,
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, _args: &[&str]) -> Result<String> {
        if self.fail {
            bail!("fake command failure: {program}");
        }
        if program == "ctdb" {
            if let Some(version) = &self.ctdb_version {
                return Ok(version.clone());
            }
        }
        Ok(String::new())
    }
}

/// Builder for a charm wired to fakes and a temp directory
pub struct TestCharm {
    dir: TempDir,
    unit: UnitName,
    leader: bool,
    address: String,
    options: CharmOptions,
    remote: Option<UnitName>,
    fail_commands: bool,
    ctdb_version: Option<String>,
    pub relation: Rc<RefCell<SharedRelation>>,
    pub statuses: Rc<RefCell<Vec<UnitStatus>>>,
    pub app_version: Rc<RefCell<Option<String>>>,
}

impl TestCharm {
    pub fn new(unit: &str) -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            unit: UnitName::new(unit),
            leader: false,
            address: "10.0.0.1".to_string(),
            options: CharmOptions::default(),
            remote: None,
            fail_commands: false,
            ctdb_version: None,
            relation: Rc::new(RefCell::new(SharedRelation::default())),
            statuses: Rc::new(RefCell::new(Vec::new())),
            app_version: Rc::new(RefCell::new(None)),
        }
    }

    pub fn leader(mut self, leader: bool) -> Self {
        self.leader = leader;
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn options(mut self, options: CharmOptions) -> Self {
        self.options = options;
        self
    }

    pub fn remote(mut self, unit: &str) -> Self {
        self.remote = Some(UnitName::new(unit));
        self
    }

    pub fn failing_commands(mut self) -> Self {
        self.fail_commands = true;
        self
    }

    pub fn ctdb_version(mut self, version: &str) -> Self {
        self.ctdb_version = Some(version.to_string());
        self
    }

    /// Share a relation store with other fixtures (multi-unit tests)
    pub fn shared_relation(mut self, relation: Rc<RefCell<SharedRelation>>) -> Self {
        self.relation = relation;
        self
    }

    /// Build a charm against the fakes. Calling this again simulates a
    /// fresh hook invocation: durable state is reloaded from disk while
    /// the relation store and status history persist.
    pub fn charm(&self) -> Charm {
        let settings = CharmSettings {
            template_dir: std::path::PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../templates"
            )),
            ctdb_conf_path: self.dir.path().join("etc/ctdb/ctdb.conf"),
            script_options_path: self.dir.path().join("etc/ctdb/script.options"),
            nodes_path: self.dir.path().join("etc/ctdb/nodes"),
            state_path: self.dir.path().join("state.json"),
            container_marker: self.dir.path().join("lxd-marker"),
            packages: vec!["ctdb".to_string(), "samba".to_string()],
        };

        let backend = FakeBackend {
            unit: self.unit.clone(),
            leader: self.leader,
            address: self.address.clone(),
            options: self.options.clone(),
            remote: self.remote.clone(),
            relation: self.relation.clone(),
            statuses: self.statuses.clone(),
            app_version: self.app_version.clone(),
        };

        let manager = CtdbManager::with_runner(
            Box::new(FakeRunner {
                fail: self.fail_commands,
                ctdb_version: self.ctdb_version.clone(),
            }),
            settings.packages.clone(),
        );

        let state = StoredState::load(&settings.state_path);

        Charm {
            settings,
            backend: Box::new(backend),
            manager,
            state,
        }
    }

    /// Most recently reported unit status
    pub fn last_status(&self) -> UnitStatus {
        self.statuses
            .borrow()
            .last()
            .cloned()
            .expect("no status was set")
    }

    /// Current value of a key in a unit-scoped bucket
    pub fn unit_data(&self, unit: &str, key: &str) -> Option<String> {
        self.relation
            .borrow()
            .units
            .get(unit)
            .and_then(|bucket| bucket.get(key).cloned())
    }
}
