//! Peer relation handlers: the peer-address propagator.
//!
//! The elected leader publishes its bind address into the
//! application-scoped bucket of the peer relation; every unit observes
//! the change and caches the address locally. Units also announce their
//! own name in their unit-scoped bucket on join. The platform's
//! leadership guarantee is trusted outright; there is no local
//! consensus, retry, or reconciliation beyond the changed-value check.

use anyhow::Result;
use ctdb_common::CharmError;
use ctdb_common::constants::data_keys;
use tracing::{debug, info};

use crate::hooks::Charm;

/// Leadership address publisher. Resolves our bind address and writes
/// it under `leader-ip` for all peers to pick up. Publishing without
/// holding leadership is rejected.
pub fn leader_elected(charm: &mut Charm) -> Result<()> {
    let unit = charm.backend.unit_name()?;
    if !charm.backend.is_leader()? {
        return Err(CharmError::NotLeader(unit.to_string()).into());
    }

    let ip = charm.backend.bind_address()?;
    debug!(unit = %unit, ip = %ip, "leader publishing its address");
    charm.backend.relation_set_app(data_keys::LEADER_IP, &ip)?;
    Ok(())
}

/// Peer membership announcer. Our unit-scoped bucket is ours alone, so
/// this needs no coordination and redelivery stores the same value.
pub fn joined(charm: &mut Charm) -> Result<()> {
    info!("peer relation joined");
    let unit = charm.backend.unit_name()?;
    if let Some(remote) = charm.backend.remote_unit() {
        debug!(from = %unit, to = %remote, "hello");
    }
    charm
        .backend
        .relation_set_unit(data_keys::UNIT_DATA, unit.as_str())?;
    Ok(())
}

/// Peer departure observer. Informational only: departed peers keep
/// their relation data and the node list is not recomputed here.
pub fn departed(charm: &mut Charm) -> Result<()> {
    info!("peer relation departed");
    if let Some(remote) = charm.backend.remote_unit() {
        let unit = charm.backend.unit_name()?;
        debug!(from = %unit, to = %remote, "goodbye");
    }
    Ok(())
}

/// Leader-address subscriber. Reads `leader-ip` from the app bucket and
/// updates the durable cache only on a non-empty, changed value, so
/// redelivered notifications are no-ops.
pub fn changed(charm: &mut Charm) -> Result<()> {
    info!("peer relation changed");
    let observed = charm
        .backend
        .relation_get_app(data_keys::LEADER_IP)?
        .unwrap_or_default();

    if charm.state.accept_leader_ip(&observed)? {
        info!(leader_ip = %observed, "cached new leader address");
    } else {
        debug!(leader_ip = %observed, "leader address unchanged, skipping");
    }
    Ok(())
}
