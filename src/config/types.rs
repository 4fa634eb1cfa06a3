//! Configuration types and defaults for txlock.

use serde::{Deserialize, Serialize};

/// Which semaphore the lock service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SemaphoreKind {
    /// Plain in-memory locks (default).
    #[default]
    Simple,
    /// In-memory locks whose release waits for the owner's transaction to end.
    Transactional,
}

impl SemaphoreKind {
    /// Parse a semaphore kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "transactional" => Some(Self::Transactional),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemaphoreKind::Simple => "simple",
            SemaphoreKind::Transactional => "transactional",
        }
    }
}

// Default value functions for serde
pub(crate) fn default_instance_name() -> String {
    "DefaultScheduler".to_string()
}
pub(crate) fn default_instance_id() -> String {
    "NON_CLUSTERED".to_string()
}
pub(crate) fn default_contention_warn_ms() -> u64 {
    10_000
}
