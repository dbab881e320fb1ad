//! Event kinds and dispatch.
//!
//! The platform delivers lifecycle and relation events by hook name;
//! here they become a closed enum with an explicit dispatch table, so
//! there is exactly one place listing everything this charm reacts to.

use anyhow::Result;
use ctdb_common::CharmError;

use crate::hooks::{Charm, lifecycle, peers};

/// Every event this charm handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Install,
    Remove,
    ConfigChanged,
    Start,
    Stop,
    UpdateStatus,
    LeaderElected,
    PeersJoined,
    PeersDeparted,
    PeersChanged,
}

impl EventKind {
    /// Map a platform hook name onto an event kind
    pub fn from_hook_name(name: &str) -> Option<Self> {
        let kind = match name {
            "install" => Self::Install,
            "remove" => Self::Remove,
            "config-changed" => Self::ConfigChanged,
            "start" => Self::Start,
            "stop" => Self::Stop,
            "update-status" => Self::UpdateStatus,
            "leader-elected" => Self::LeaderElected,
            "ctdbpeers-relation-joined" => Self::PeersJoined,
            "ctdbpeers-relation-departed" => Self::PeersDeparted,
            "ctdbpeers-relation-changed" => Self::PeersChanged,
            _ => return None,
        };
        Some(kind)
    }

    pub fn hook_name(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Remove => "remove",
            Self::ConfigChanged => "config-changed",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::UpdateStatus => "update-status",
            Self::LeaderElected => "leader-elected",
            Self::PeersJoined => "ctdbpeers-relation-joined",
            Self::PeersDeparted => "ctdbpeers-relation-departed",
            Self::PeersChanged => "ctdbpeers-relation-changed",
        }
    }
}

/// One handler per event kind
pub type Handler = fn(&mut Charm) -> Result<()>;

/// The dispatch table: kind to handler, one row per event
pub const DISPATCH: &[(EventKind, Handler)] = &[
    (EventKind::Install, lifecycle::install),
    (EventKind::Remove, lifecycle::remove),
    (EventKind::ConfigChanged, lifecycle::config_changed),
    (EventKind::Start, lifecycle::start),
    (EventKind::Stop, lifecycle::stop),
    (EventKind::UpdateStatus, lifecycle::update_status),
    (EventKind::LeaderElected, peers::leader_elected),
    (EventKind::PeersJoined, peers::joined),
    (EventKind::PeersDeparted, peers::departed),
    (EventKind::PeersChanged, peers::changed),
];

/// Run the handler for `kind` against the charm
pub fn dispatch(kind: EventKind, charm: &mut Charm) -> Result<()> {
    let handler = DISPATCH
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, handler)| *handler)
        .ok_or_else(|| CharmError::UnknownHook(kind.hook_name().to_string()))?;

    tracing::info!(hook = kind.hook_name(), "handling event");
    handler(charm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_name_round_trip() {
        for (kind, _) in DISPATCH {
            assert_eq!(EventKind::from_hook_name(kind.hook_name()), Some(*kind));
        }
    }

    #[test]
    fn test_unknown_hook_name() {
        assert_eq!(EventKind::from_hook_name("upgrade-charm"), None);
    }

    #[test]
    fn test_every_kind_has_a_dispatch_row() {
        use EventKind::*;
        for kind in [
            Install,
            Remove,
            ConfigChanged,
            Start,
            Stop,
            UpdateStatus,
            LeaderElected,
            PeersJoined,
            PeersDeparted,
            PeersChanged,
        ] {
            assert!(
                DISPATCH.iter().any(|(k, _)| *k == kind),
                "no handler for {kind:?}"
            );
        }
    }
}
