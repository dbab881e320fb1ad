//! # ctdb-charm - Samba CTDB cluster charm
//!
//! One-shot hook binary: the orchestration platform invokes it once per
//! lifecycle or relation event, it dispatches on the event kind,
//! performs the event's work synchronously, and exits.
//!
//! ## Architecture
//! ```text
//! Platform (hooks) → ctdb-charm → hook tools (relation store, status)
//!                        ↓
//!            apt / systemctl / rendered /etc/ctdb files
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod events;
mod exec;
mod hooks;
mod juju;
mod manager;
mod options;
mod render;
mod settings;
mod state;
#[cfg(test)]
mod testing;

use ctdb_common::CharmError;
use ctdb_common::constants::env_vars;
use events::EventKind;
use hooks::Charm;
use settings::CharmSettings;

/// Samba CTDB cluster charm hook runner
#[derive(Parser, Debug)]
#[command(name = "ctdb-charm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hook to run (falls back to $JUJU_HOOK_NAME)
    hook: Option<String>,

    /// Agent settings file path
    #[arg(short, long, default_value = "config/ctdb-charm.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    let hook = args
        .hook
        .or_else(|| std::env::var(env_vars::HOOK_NAME).ok())
        .context("no hook name given and JUJU_HOOK_NAME is not set")?;
    let kind = EventKind::from_hook_name(&hook)
        .ok_or_else(|| CharmError::UnknownHook(hook.clone()))?;

    info!(
        hook = %hook,
        version = env!("CARGO_PKG_VERSION"),
        "ctdb-charm dispatching"
    );

    // Load local agent settings
    let settings = CharmSettings::load(&args.config)?;

    let mut charm = Charm::new(settings);
    events::dispatch(kind, &mut charm)
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}
