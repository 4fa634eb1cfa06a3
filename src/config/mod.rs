//! Configuration model for txlock.
//!
//! This module defines the Config struct read from a YAML file. It supports
//! forward-compatible parsing (unknown fields are ignored), defaults for every
//! field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::SemaphoreKind;
