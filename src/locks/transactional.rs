//! Transaction-aware in-memory semaphore.

use super::name::ResourceName;
use super::owner::LockOwner;
use super::semaphore::Semaphore;
use super::table::{Acquired, LockTable};
use super::types::LockInfo;
use crate::config::SemaphoreKind;
use crate::details::SchedulerDetails;
use crate::error::Result;
use crate::transaction::{TransactionCoordinator, TransactionOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// In-memory locking that holds locks until the owner's transaction ends.
///
/// When a lock is granted while the owner is inside a transaction, a
/// completion callback is registered with the coordinator and the lock is only
/// returned when that transaction commits or rolls back. Explicit
/// [`release`](Semaphore::release) calls made inside the transaction are
/// ignored. Outside a transaction this behaves exactly like
/// [`SimpleSemaphore`](super::SimpleSemaphore).
///
/// Not safe across processes or cluster nodes.
pub struct TransactionalSemaphore {
    table: Arc<LockTable>,
    coordinator: Arc<dyn TransactionCoordinator>,
    instance: String,
}

impl TransactionalSemaphore {
    pub fn new(coordinator: Arc<dyn TransactionCoordinator>) -> Self {
        Self::with_contention_warning(coordinator, None)
    }

    pub fn with_contention_warning(
        coordinator: Arc<dyn TransactionCoordinator>,
        threshold: Option<Duration>,
    ) -> Self {
        Self {
            table: Arc::new(LockTable::new(threshold)),
            coordinator,
            instance: String::new(),
        }
    }

    /// Register a release callback if `owner` is inside a transaction.
    fn defer_to_transaction(&self, owner: &LockOwner, name: &ResourceName) -> Result<()> {
        let Some(tx) = self.coordinator.current_transaction(owner)? else {
            return Ok(());
        };

        let table = Arc::clone(&self.table);
        let callback_owner = owner.clone();
        let callback_name = name.clone();
        let instance = self.instance.clone();
        self.coordinator.register_completion(
            &tx,
            Box::new(move |outcome| {
                release_on_completion(&table, &callback_owner, &callback_name, &instance, outcome)
            }),
        )?;

        debug!(
            instance = %self.instance,
            lock = %name,
            owner = %owner,
            tx = %tx,
            "Lock release bound to transaction"
        );
        Ok(())
    }
}

/// The deferred release. Runs once the transaction is finished, so there is no
/// active-transaction check; a name that is no longer held is left alone.
fn release_on_completion(
    table: &LockTable,
    owner: &LockOwner,
    name: &ResourceName,
    instance: &str,
    outcome: TransactionOutcome,
) {
    if table.release(owner, name.as_str()) {
        debug!(instance, lock = %name, owner = %owner, outcome = %outcome, "Lock returned at transaction completion");
    } else {
        debug!(instance, lock = %name, owner = %owner, outcome = %outcome, "Lock already returned before transaction completion");
    }
}

impl SchedulerDetails for TransactionalSemaphore {
    fn set_instance_name(&mut self, name: &str) -> Result<()> {
        self.instance = name.to_string();
        Ok(())
    }
}

impl Semaphore for TransactionalSemaphore {
    fn acquire(&self, owner: &LockOwner, name: &str) -> Result<()> {
        let name = ResourceName::new(name);
        debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock is desired");

        if self.table.acquire(owner, &name) == Acquired::AlreadyOwned {
            debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock already owned");
            return Ok(());
        }

        if let Err(err) = self.defer_to_transaction(owner, &name) {
            self.table.release(owner, name.as_str());
            warn!(
                instance = %self.instance,
                lock = %name,
                owner = %owner,
                error = %err,
                "Lock withdrawn: could not bind it to the transaction"
            );
            return Err(err);
        }

        debug!(instance = %self.instance, lock = %name, owner = %owner, "Lock given");
        Ok(())
    }

    fn release(&self, owner: &LockOwner, name: &str) -> Result<()> {
        if !self.table.is_owner(owner, name) {
            debug!(
                instance = %self.instance,
                lock = name,
                owner = %owner,
                "Lock return attempted by non-owner"
            );
            return Ok(());
        }

        if let Some(tx) = self.coordinator.current_transaction(owner)? {
            debug!(
                instance = %self.instance,
                lock = name,
                owner = %owner,
                tx = %tx,
                "Lock is in a transaction, return deferred"
            );
            return Ok(());
        }

        if self.table.release(owner, name) {
            debug!(instance = %self.instance, lock = name, owner = %owner, "Lock returned");
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
        SemaphoreKind::Transactional
    }
}
