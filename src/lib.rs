//! txlock: in-process named resource locks with transaction-deferred release.
//!
//! Threads (or logical tasks) serialize access to named resources such as a
//! scheduler's trigger table through a [`locks::Semaphore`]. The
//! [`locks::TransactionalSemaphore`] additionally keeps every lock granted
//! inside a transaction until a [`transaction::TransactionCoordinator`]
//! reports that the transaction committed or rolled back.
//!
//! ```
//! use std::sync::Arc;
//! use txlock::locks::{LockOwner, Semaphore, TransactionalSemaphore};
//! use txlock::transaction::LocalTransactionManager;
//!
//! let tm = Arc::new(LocalTransactionManager::new());
//! let locks = TransactionalSemaphore::new(tm.clone());
//! let me = LockOwner::current();
//!
//! tm.begin(&me)?;
//! locks.acquire(&me, "TRIGGER_ACCESS")?;
//! locks.release(&me, "TRIGGER_ACCESS")?;
//! assert!(locks.is_owner(&me, "TRIGGER_ACCESS"));
//!
//! tm.commit(&me)?;
//! assert!(!locks.is_owner(&me, "TRIGGER_ACCESS"));
//! # Ok::<(), txlock::error::LockError>(())
//! ```

pub mod config;
pub mod details;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod transaction;
