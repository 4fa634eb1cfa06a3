//! Lock information structures.

use super::name::ResourceName;
use super::owner::LockOwner;
use chrono::{DateTime, Duration, Utc};

/// Snapshot of a currently held lock.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// The resource name.
    pub name: ResourceName,

    /// The owner holding the lock.
    pub owner: LockOwner,

    /// When the lock was granted.
    pub acquired_at: DateTime<Utc>,
}

impl LockInfo {
    /// How long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();

        if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds % 60)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (owner: {}, held: {})",
            self.name,
            self.owner,
            self.age_string()
        )
    }
}
