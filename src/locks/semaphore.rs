//! The lock service interface.

use super::name::ResourceName;
use super::owner::LockOwner;
use super::types::LockInfo;
use crate::config::SemaphoreKind;
use crate::error::Result;

/// Named-resource locks for threads of one process.
///
/// A name is held by at most one [`LockOwner`] at a time. Locks are reentrant
/// per owner: acquiring a name the owner already holds returns immediately and
/// changes nothing.
pub trait Semaphore: Send + Sync {
    /// Grant `name` to `owner`, blocking until no other owner holds it.
    ///
    /// There is no timeout. Spurious wakeups are absorbed by re-checking the
    /// wait condition, so the call only returns once the lock is granted or an
    /// error is reported.
    fn acquire(&self, owner: &LockOwner, name: &str) -> Result<()>;

    /// Release `name` if `owner` holds it.
    ///
    /// Releasing a name the owner does not hold is a no-op, not an error.
    fn release(&self, owner: &LockOwner, name: &str) -> Result<()>;

    /// Whether `owner` currently holds `name`.
    fn is_owner(&self, owner: &LockOwner, name: &str) -> bool;

    /// Whether callers must hand a database connection to the lock calls.
    /// In-memory semaphores never need one.
    fn requires_external_connection(&self) -> bool {
        false
    }

    /// Every held lock, sorted by name.
    fn held_locks(&self) -> Vec<LockInfo>;

    /// Names held by `owner`, sorted.
    fn owned_by(&self, owner: &LockOwner) -> Vec<ResourceName>;

    fn kind(&self) -> SemaphoreKind;
}
