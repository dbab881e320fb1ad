//! Event handlers.
//!
//! - `lifecycle` - install/remove/config/start/stop/update-status
//! - `peers` - leader election and peer relation events

pub mod lifecycle;
pub mod peers;

use crate::juju::{HookBackend, JujuBackend};
use crate::manager::CtdbManager;
use crate::settings::CharmSettings;
use crate::state::StoredState;

/// Everything an event handler works with: local settings, the platform
/// backend, the service manager, and the unit's durable state.
pub struct Charm {
    pub settings: CharmSettings,
    pub backend: Box<dyn HookBackend>,
    pub manager: CtdbManager,
    pub state: StoredState,
}

impl Charm {
    /// Build the charm for a real hook invocation
    pub fn new(settings: CharmSettings) -> Self {
        let manager = CtdbManager::new(settings.packages.clone());
        let state = StoredState::load(&settings.state_path);
        Self {
            settings,
            backend: Box::new(JujuBackend::new()),
            manager,
            state,
        }
    }
}
