//! The transaction coordinator boundary.

use crate::error::TransactionError;
use crate::locks::LockOwner;
use std::fmt;

/// Opaque handle to a unit of work managed by a coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionHandle {
    id: u64,
}

impl TransactionHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.id)
    }
}

/// How a transaction finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    Committed,
    RolledBack,
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Committed => write!(f, "committed"),
            TransactionOutcome::RolledBack => write!(f, "rolled_back"),
        }
    }
}

/// One-shot callback run when a transaction reaches a terminal state.
pub type CompletionCallback = Box<dyn FnOnce(TransactionOutcome) + Send + 'static>;

/// Source of ambient transactions for lock owners.
///
/// A coordinator must run each registered callback exactly once, after the
/// transaction has committed or rolled back, and never from two contexts at
/// the same time.
pub trait TransactionCoordinator: Send + Sync {
    /// The transaction `owner` is currently running inside, if any.
    fn current_transaction(
        &self,
        owner: &LockOwner,
    ) -> Result<Option<TransactionHandle>, TransactionError>;

    /// Run `callback` when `tx` completes.
    fn register_completion(
        &self,
        tx: &TransactionHandle,
        callback: CompletionCallback,
    ) -> Result<(), TransactionError>;
}
