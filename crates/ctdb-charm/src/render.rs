//! Configuration file rendering.
//!
//! Two handlebars templates, registered from the charm's template
//! directory and rendered in strict mode so a missing parameter fails
//! loudly instead of producing a silently-broken ctdb.conf.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Template names, matching the files in the template directory
pub const CTDB_CONF_TEMPLATE: &str = "ctdb.conf";
pub const SCRIPT_OPTIONS_TEMPLATE: &str = "script.options";

/// Parameters for the ctdb.conf template
#[derive(Debug, Clone, Serialize)]
pub struct CtdbConfParams {
    /// Validated log level, uppercase spelling
    pub log_level: String,
    /// Recovery lock path; the cluster section is omitted when empty
    pub recovery_lock: String,
    /// Realtime scheduling must be off inside containers
    pub realtime_scheduling: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ScriptOptionsParams {
    /// Rendered as the literal yes/no the event scripts expect
    skip_share_check: &'static str,
}

/// Template registry for the charm's configuration files
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Build the registry from the template directory
    pub fn new(template_dir: &Path) -> Result<Self> {
        let mut registry = Handlebars::new();
        // Strict mode fails rendering if a template key has no value
        registry.set_strict_mode(true);

        for name in [CTDB_CONF_TEMPLATE, SCRIPT_OPTIONS_TEMPLATE] {
            let path = template_dir.join(name);
            registry
                .register_template_file(name, &path)
                .with_context(|| format!("Failed to register template {}", path.display()))?;
        }

        Ok(Self { registry })
    }

    pub fn render_ctdb_conf(&self, params: &CtdbConfParams) -> Result<String> {
        self.registry
            .render(CTDB_CONF_TEMPLATE, params)
            .context("Failed to render ctdb.conf")
    }

    pub fn render_script_options(&self, skip_share_check: bool) -> Result<String> {
        let params = ScriptOptionsParams {
            skip_share_check: if skip_share_check { "yes" } else { "no" },
        };
        self.registry
            .render(SCRIPT_OPTIONS_TEMPLATE, &params)
            .context("Failed to render script.options")
    }
}

/// Write a rendered file, creating parent directories as needed
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote rendered file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn renderer() -> Renderer {
        let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"));
        Renderer::new(&dir).unwrap()
    }

    #[test]
    fn test_ctdb_conf_with_recovery_lock() {
        let rendered = renderer()
            .render_ctdb_conf(&CtdbConfParams {
                log_level: "NOTICE".to_string(),
                recovery_lock: "/clusterfs/.ctdb-lock".to_string(),
                realtime_scheduling: true,
            })
            .unwrap();

        assert!(rendered.contains("log level = NOTICE"));
        assert!(rendered.contains("recovery lock = /clusterfs/.ctdb-lock"));
        assert!(rendered.contains("realtime scheduling = true"));
    }

    #[test]
    fn test_ctdb_conf_omits_empty_recovery_lock() {
        let rendered = renderer()
            .render_ctdb_conf(&CtdbConfParams {
                log_level: "ERROR".to_string(),
                recovery_lock: String::new(),
                realtime_scheduling: false,
            })
            .unwrap();

        assert!(!rendered.contains("[cluster]"));
        assert!(!rendered.contains("recovery lock"));
        assert!(rendered.contains("realtime scheduling = false"));
    }

    #[test]
    fn test_script_options_yes_no() {
        let r = renderer();
        assert!(
            r.render_script_options(true)
                .unwrap()
                .contains("CTDB_SAMBA_SKIP_SHARE_CHECK=yes")
        );
        assert!(
            r.render_script_options(false)
                .unwrap()
                .contains("CTDB_SAMBA_SKIP_SHARE_CHECK=no")
        );
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etc/ctdb/ctdb.conf");
        write_file(&path, "contents\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "contents\n");
    }
}
