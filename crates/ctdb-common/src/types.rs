//! Core types shared across the charm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CharmError;

/// CTDB daemon log level.
///
/// The `ctdb-log-level` charm option is uppercased and then parsed
/// against this closed allow-list; anything else blocks the unit
/// instead of being written into `ctdb.conf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CtdbLogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
}

impl CtdbLogLevel {
    /// All accepted levels, in increasing severity
    pub const ALL: [CtdbLogLevel; 5] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
    ];

    /// The spelling written into `ctdb.conf`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for CtdbLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CtdbLogLevel {
    type Err = CharmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| CharmError::Config(format!("invalid log level: '{s}'")))
    }
}

/// Opaque unit name assigned by the platform (e.g. `samba-ctdb/0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workload status reported back to the platform via `status-set`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// Unit is up and serving
    Active(String),
    /// Operator intervention required (e.g. bad config option)
    Blocked(String),
    /// Unit is busy installing or configuring
    Maintenance(String),
    /// Unit is waiting on an external resource
    Waiting(String),
}

impl UnitStatus {
    pub fn active(message: impl Into<String>) -> Self {
        Self::Active(message.into())
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self::Blocked(message.into())
    }

    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::Maintenance(message.into())
    }

    pub fn waiting(message: impl Into<String>) -> Self {
        Self::Waiting(message.into())
    }

    /// Status name as expected by `status-set`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active(_) => "active",
            Self::Blocked(_) => "blocked",
            Self::Maintenance(_) => "maintenance",
            Self::Waiting(_) => "waiting",
        }
    }

    /// Operator-visible status message
    pub fn message(&self) -> &str {
        match self {
            Self::Active(m) | Self::Blocked(m) | Self::Maintenance(m) | Self::Waiting(m) => m,
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message())
    }
}
