//! In-process transaction manager.

use super::coordinator::{
    CompletionCallback, TransactionCoordinator, TransactionHandle, TransactionOutcome,
};
use crate::error::TransactionError;
use crate::locks::LockOwner;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

struct ActiveTransaction {
    handle: TransactionHandle,
    callbacks: Vec<CompletionCallback>,
}

/// A [`TransactionCoordinator`] that keeps at most one active transaction per
/// owner in memory.
///
/// Completion callbacks run on the thread that calls [`commit`] or
/// [`rollback`], after the transaction has left the active set and without any
/// manager lock held, so callbacks may freely call back into the manager.
///
/// [`commit`]: LocalTransactionManager::commit
/// [`rollback`]: LocalTransactionManager::rollback
#[derive(Default)]
pub struct LocalTransactionManager {
    active: Mutex<HashMap<LockOwner, ActiveTransaction>>,
    next_id: AtomicU64,
}

impl LocalTransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_active(&self) -> MutexGuard<'_, HashMap<LockOwner, ActiveTransaction>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a transaction for `owner`.
    pub fn begin(&self, owner: &LockOwner) -> Result<TransactionHandle, TransactionError> {
        let mut active = self.lock_active();
        if active.contains_key(owner) {
            return Err(TransactionError::AlreadyActive(owner.to_string()));
        }

        let handle = TransactionHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        active.insert(
            owner.clone(),
            ActiveTransaction {
                handle: handle.clone(),
                callbacks: Vec::new(),
            },
        );
        debug!(owner = %owner, tx = %handle, "Transaction started");
        Ok(handle)
    }

    /// Commit the owner's transaction and run its completion callbacks.
    pub fn commit(&self, owner: &LockOwner) -> Result<(), TransactionError> {
        self.complete(owner, TransactionOutcome::Committed)
    }

    /// Roll back the owner's transaction and run its completion callbacks.
    pub fn rollback(&self, owner: &LockOwner) -> Result<(), TransactionError> {
        self.complete(owner, TransactionOutcome::RolledBack)
    }

    /// Whether `owner` is inside a transaction.
    pub fn is_active(&self, owner: &LockOwner) -> bool {
        self.lock_active().contains_key(owner)
    }

    fn complete(
        &self,
        owner: &LockOwner,
        outcome: TransactionOutcome,
    ) -> Result<(), TransactionError> {
        let finished = self
            .lock_active()
            .remove(owner)
            .ok_or_else(|| TransactionError::NoTransaction(owner.to_string()))?;

        debug!(
            owner = %owner,
            tx = %finished.handle,
            outcome = %outcome,
            callbacks = finished.callbacks.len(),
            "Transaction completed"
        );

        for callback in finished.callbacks {
            if panic::catch_unwind(AssertUnwindSafe(move || callback(outcome))).is_err() {
                warn!(
                    owner = %owner,
                    tx = %finished.handle,
                    "Transaction completion callback panicked"
                );
            }
        }
        Ok(())
    }
}

impl TransactionCoordinator for LocalTransactionManager {
    fn current_transaction(
        &self,
        owner: &LockOwner,
    ) -> Result<Option<TransactionHandle>, TransactionError> {
        Ok(self.lock_active().get(owner).map(|tx| tx.handle.clone()))
    }

    fn register_completion(
        &self,
        tx: &TransactionHandle,
        callback: CompletionCallback,
    ) -> Result<(), TransactionError> {
        let mut active = self.lock_active();
        match active.values_mut().find(|active| active.handle == *tx) {
            Some(active) => {
                active.callbacks.push(callback);
                Ok(())
            }
            None => Err(TransactionError::Registration(format!(
                "{} is not active",
                tx
            ))),
        }
    }
}
