//! Lifecycle event handlers: packages, configuration, services.

use anyhow::{Context, Result};
use ctdb_common::{CtdbLogLevel, UnitStatus};
use tracing::{info, warn};

use crate::hooks::Charm;
use crate::render::{CtdbConfParams, Renderer, write_file};

pub fn install(charm: &mut Charm) -> Result<()> {
    charm
        .backend
        .set_status(&UnitStatus::maintenance("installing samba/ctdb packages"))?;
    info!("installing samba/ctdb packages");
    charm.manager.install().context("install hook failed")?;
    charm
        .backend
        .set_status(&UnitStatus::active("samba/ctdb packages installed"))?;
    Ok(())
}

pub fn remove(charm: &mut Charm) -> Result<()> {
    charm
        .backend
        .set_status(&UnitStatus::maintenance("removing samba/ctdb packages"))?;
    info!("removing samba/ctdb packages");
    charm.manager.remove().context("remove hook failed")?;
    charm
        .backend
        .set_status(&UnitStatus::active("samba/ctdb packages removed"))?;
    Ok(())
}

/// Validate options, render both config files, and bootstrap the nodes
/// file for a single-unit deployment. An invalid log level blocks the
/// unit without touching any file.
pub fn config_changed(charm: &mut Charm) -> Result<()> {
    let options = charm.backend.charm_config()?;

    let requested = options.log_level.to_ascii_uppercase();
    let level: CtdbLogLevel = match requested.parse() {
        Ok(level) => level,
        Err(_) => {
            warn!(log_level = %requested, "rejecting unknown ctdb log level");
            charm
                .backend
                .set_status(&UnitStatus::blocked(format!(
                    "invalid log level: '{requested}'"
                )))?;
            return Ok(());
        }
    };

    charm
        .backend
        .set_status(&UnitStatus::maintenance("applying ctdb configuration"))?;
    info!(level = %level, "configured ctdb log level");

    // Realtime scheduling must be disabled when running inside a container
    let realtime_scheduling = !charm.settings.container_marker.exists();

    let renderer = Renderer::new(&charm.settings.template_dir)?;
    let ctdb_conf = renderer.render_ctdb_conf(&CtdbConfParams {
        log_level: level.to_string(),
        recovery_lock: options.recovery_lock.clone(),
        realtime_scheduling,
    })?;
    let script_options = renderer.render_script_options(options.skip_share_check)?;

    write_file(&charm.settings.ctdb_conf_path, &ctdb_conf)?;
    write_file(&charm.settings.script_options_path, &script_options)?;

    // No nodes file means no peers have joined yet; ctdb cannot start
    // without one, so seed it with our own address.
    if !charm.settings.nodes_path.exists() {
        let ip = charm.backend.bind_address()?;
        info!(ip = %ip, "bootstrapping nodes file for single-unit deployment");
        write_file(&charm.settings.nodes_path, &format!("{ip}\n"))?;
    }

    charm
        .backend
        .set_status(&UnitStatus::active("ctdb configuration applied"))?;
    Ok(())
}

pub fn start(charm: &mut Charm) -> Result<()> {
    charm.manager.start();
    charm
        .backend
        .set_status(&UnitStatus::active("samba/ctdb services started"))?;
    info!("samba/ctdb services started");
    Ok(())
}

pub fn stop(charm: &mut Charm) -> Result<()> {
    charm.manager.stop();
    charm
        .backend
        .set_status(&UnitStatus::active("samba/ctdb services stopped"))?;
    info!("samba/ctdb services stopped");
    Ok(())
}

pub fn update_status(charm: &mut Charm) -> Result<()> {
    if let Some(version) = charm.manager.version() {
        charm.backend.application_version_set(&version)?;
    }
    let now = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    charm
        .backend
        .set_status(&UnitStatus::active(format!("charm updated at {now}")))?;
    Ok(())
}
