//! External command execution.
//!
//! Everything the charm does to the outside world goes through a
//! subprocess: platform hook tools, systemctl, apt-get, ctdb. The
//! `CommandRunner` trait is the seam that lets handlers run against a
//! recording fake in tests.

use std::process::Command;

use anyhow::Result;
use ctdb_common::CharmError;

/// Runs an external command and returns its stdout
pub trait CommandRunner {
    /// Run `program` with `args`; non-zero exit is an error carrying stderr
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Production runner backed by `std::process::Command`
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let rendered = render_command(program, args);
        tracing::trace!(command = %rendered, "running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| CharmError::Command {
                command: rendered.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CharmError::Command {
                command: rendered,
                message: format!("exited with {}: {}", output.status, stderr.trim()),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
