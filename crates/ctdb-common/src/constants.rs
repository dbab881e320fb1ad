//! Shared constants for the Samba CTDB charm.

/// Name of the peer relation defined in the charm metadata
pub const PEER_RELATION: &str = "ctdbpeers";

/// Rendered CTDB daemon configuration
pub const CTDB_CONF_PATH: &str = "/etc/ctdb/ctdb.conf";

/// Rendered CTDB event-script options
pub const SCRIPT_OPTIONS_PATH: &str = "/etc/ctdb/script.options";

/// CTDB cluster nodes file (one address per line)
pub const CTDB_NODES_PATH: &str = "/etc/ctdb/nodes";

/// Persisted unit state record
pub const STATE_PATH: &str = "/var/lib/ctdb-charm/state.json";

/// Directory holding the charm's handlebars templates
pub const TEMPLATE_DIR: &str = "templates";

/// Marker present when the unit runs inside an LXD container
pub const CONTAINER_MARKER: &str = "/dev/lxd";

/// systemd unit managed by the charm
pub const CTDB_SERVICE: &str = "ctdb";

/// Packages installed on the install event, removed on remove
pub const CTDB_PACKAGES: &[&str] = &["ctdb", "samba"];

/// Keys exchanged through the peer relation store
pub mod data_keys {
    /// Application-scoped: address published by the elected leader
    pub const LEADER_IP: &str = "leader-ip";

    /// Unit-scoped: the owning unit's name
    pub const UNIT_DATA: &str = "unit-data";
}

/// Environment variables supplied by the platform's hook context
pub mod env_vars {
    /// Name of the hook being run
    pub const HOOK_NAME: &str = "JUJU_HOOK_NAME";

    /// This unit's name
    pub const UNIT_NAME: &str = "JUJU_UNIT_NAME";

    /// Remote unit for relation hooks
    pub const REMOTE_UNIT: &str = "JUJU_REMOTE_UNIT";

    /// Relation id for relation hooks
    pub const RELATION_ID: &str = "JUJU_RELATION_ID";
}
