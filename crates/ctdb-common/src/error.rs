//! Common error types for the charm.

use thiserror::Error;

/// Errors raised while handling a lifecycle or relation event
#[derive(Debug, Error)]
pub enum CharmError {
    /// Configuration error (bad option value, unreadable settings file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external command exited non-zero or could not be spawned
    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    /// Relation store access error
    #[error("Relation error: {0}")]
    Relation(String),

    /// App-scoped relation data may only be written by the leader
    #[error("Unit {0} is not the leader")]
    NotLeader(String),

    /// Persisted state could not be written
    #[error("State store error: {0}")]
    State(String),

    /// The platform delivered a hook this charm does not define
    #[error("Unknown hook: {0}")]
    UnknownHook(String),
}

impl CharmError {
    /// Returns true if the platform may resolve this error by
    /// redelivering the event
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Command { .. } | Self::Relation(_))
    }
}
