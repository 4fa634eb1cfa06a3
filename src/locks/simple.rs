//! In-memory semaphore.

use super::name::ResourceName;
use super::owner::LockOwner;
use super::semaphore::Semaphore;
use super::table::{Acquired, LockTable};
use super::types::LockInfo;
use crate::config::SemaphoreKind;
use crate::details::SchedulerDetails;
use crate::error::Result;
use std::time::Duration;
use tracing::debug;

/// Plain in-memory locking for a single, non-clustered scheduler.
#[derive(Debug)]
pub struct SimpleSemaphore {
    table: LockTable,
    instance: String,
}

impl SimpleSemaphore {
    pub fn new() -> Self {
        Self::with_contention_warning(None)
    }

    /// Like [`SimpleSemaphore::new`], but waiters blocked longer than
    /// `threshold` log a warning.
    pub fn with_contention_warning(threshold: Option<Duration>) -> Self {
        Self {
            table: LockTable::new(threshold),
            instance: String::new(),
        }
    }
}

impl Default for SimpleSemaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerDetails for SimpleSemaphore {
    fn set_instance_name(&mut self, name: &str) -> Result<()> {
        self.instance = name.to_string();
        Ok(())
    }
}

impl Semaphore for SimpleSemaphore {
    fn acquire(&self, owner: &LockOwner, name: &str) -> Result<()> {
        let name = ResourceName::new(name);
        debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock is desired");

        match self.table.acquire(owner, &name) {
            Acquired::Granted => {
                debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock given");
            }
            Acquired::AlreadyOwned => {
                debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock already owned");
            }
        }
        Ok(())
    }

    fn release(&self, owner: &LockOwner, name: &str) -> Result<()> {
        if self.table.release(owner, name) {
            debug!(instance = %self.instance, lock = name, owner = %owner, "Lock returned");
        } else {
            debug!(
                instance = %self.instance,
                lock = name,
                owner = %owner,
                "Lock return attempted by non-owner"
            );
        }
        Ok(())
    }

    fn is_owner(&self, owner: &LockOwner, name: &str) -> bool {
        self.table.is_owner(owner, name)
    }

    fn held_locks(&self) -> Vec<LockInfo> {
        self.table.held_locks()
    }

    fn owned_by(&self, owner: &LockOwner) -> Vec<ResourceName> {
        self.table.owned_by(owner)
    }

    fn kind(&self) -> SemaphoreKind {
        SemaphoreKind::Simple
    }
}
