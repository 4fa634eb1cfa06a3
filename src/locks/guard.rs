//! RAII lock guard implementation.

use super::name::ResourceName;
use super::owner::LockOwner;
use super::semaphore::Semaphore;
use crate::error::Result;
use tracing::warn;

/// RAII guard for a named lock.
///
/// When dropped, the lock is released through the semaphore, so a
/// transactional semaphore still defers the release to transaction end.
/// If the owner already held the name when the guard was taken, the guard
/// leaves it held; the outer acquisition stays responsible for it.
pub struct LockGuard<'a> {
    semaphore: &'a dyn Semaphore,
    owner: LockOwner,
    name: ResourceName,

    /// Whether there is nothing left for this guard to release.
    released: bool,
}

impl<'a> LockGuard<'a> {
    /// Acquire `name` for `owner` and wrap it in a guard.
    pub fn acquire(semaphore: &'a dyn Semaphore, owner: &LockOwner, name: &str) -> Result<Self> {
        let reentrant = semaphore.is_owner(owner, name);
        semaphore.acquire(owner, name)?;
        Ok(Self {
            semaphore,
            owner: owner.clone(),
            name: ResourceName::new(name),
            released: reentrant,
        })
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn owner(&self) -> &LockOwner {
        &self.owner
    }

    /// Release the lock now and report any error.
    pub fn release(mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.semaphore.release(&self.owner, self.name.as_str())
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.semaphore.release(&self.owner, self.name.as_str())
        {
            warn!(lock = %self.name, owner = %self.owner, error = %e, "Failed to release lock");
        }
    }
}

impl std::fmt::Debug for LockGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("released", &self.released)
            .finish()
    }
}
