//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a lock service.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Scheduler identity
    // =========================================================================
    /// Name of the scheduler instance the locks belong to.
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// Id of the scheduler instance (default: "NON_CLUSTERED").
    #[serde(default = "default_instance_id")]
    pub instance_id: String,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Which semaphore to build.
    #[serde(default)]
    pub semaphore: SemaphoreKind,

    /// Milliseconds a waiter may block before a warning is logged (0 disables).
    #[serde(default = "default_contention_warn_ms")]
    pub contention_warn_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
            instance_id: default_instance_id(),
            semaphore: SemaphoreKind::default(),
            contention_warn_ms: default_contention_warn_ms(),
        }
    }
}
