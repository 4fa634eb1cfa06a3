//! Transaction coordination for deferred lock release.
//!
//! The lock service never looks a coordinator up from global state: a
//! [`TransactionCoordinator`] is handed to the transactional semaphore when it
//! is built. [`LocalTransactionManager`] is an in-process coordinator suitable
//! for embedding and for tests.

mod coordinator;
mod local;

#[cfg(test)]
mod tests;

pub use coordinator::{
    CompletionCallback, TransactionCoordinator, TransactionHandle, TransactionOutcome,
};
pub use local::LocalTransactionManager;
