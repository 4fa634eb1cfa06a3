//! Locking subsystem for txlock.
//!
//! Named-resource mutual exclusion between threads of one process:
//! - [`SimpleSemaphore`]: blocking, reentrant, in-memory locks
//! - [`TransactionalSemaphore`]: the same locks, but a lock granted inside a
//!   transaction is only returned when that transaction completes
//!
//! # Ownership
//!
//! Every call names its [`LockOwner`]. `LockOwner::current()` gives the
//! calling thread's token; `LockOwner::new` mints tokens for logical tasks.
//!
//! # Waiting
//!
//! All names of one semaphore share one mutex and one condition variable.
//! Release wakes every waiter and each waiter re-checks its own name, so a
//! freed name is never left with a sleeping waiter.
//!
//! # RAII Guards
//!
//! [`LockGuard`] releases its lock when dropped. If the release fails during
//! drop, a warning is logged but the program does not crash.

mod factory;
mod guard;
mod name;
mod owner;
mod semaphore;
mod simple;
mod table;
mod transactional;
mod types;


// Re-export public API
pub use factory::build_semaphore;
pub use guard::LockGuard;
pub use name::ResourceName;
pub use owner::LockOwner;
pub use semaphore::Semaphore;
pub use simple::SimpleSemaphore;
pub use transactional::TransactionalSemaphore;
pub use types::LockInfo;
