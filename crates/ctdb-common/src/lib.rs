//! # CTDB Common
//!
//! Shared types, errors, and constants used across the Samba CTDB charm.
//!
//! ## Modules
//! - `types` - Core data structures (CtdbLogLevel, UnitName, UnitStatus)
//! - `error` - Common error types
//! - `constants` - Shared paths, relation names, and data keys

pub mod constants;
pub mod error;
pub mod types;

pub use error::CharmError;
pub use types::*;
