//! The shared lock table.
//!
//! One table exists per semaphore instance. A single mutex guards both the
//! held map and the per-owner owned sets, and a single condition variable is
//! shared by every waiter regardless of the name it waits for. Because of that
//! sharing, release always wakes every waiter and each waiter re-checks its own
//! name; waking one arbitrary sleeper could pick a thread whose name is still
//! held while the thread waiting on the freed name keeps sleeping.

use super::name::ResourceName;
use super::owner::LockOwner;
use super::types::LockInfo;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::warn;

/// Outcome of a table acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquired {
    /// The name was free (possibly after waiting) and is now held.
    Granted,
    /// The owner already held the name; nothing changed.
    AlreadyOwned,
}

#[derive(Debug)]
struct Holder {
    owner: LockOwner,
    acquired_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct TableState {
    held: HashMap<ResourceName, Holder>,
    owned: HashMap<LockOwner, HashSet<ResourceName>>,
}

impl TableState {
    fn is_owner(&self, owner: &LockOwner, name: &str) -> bool {
        self.held.get(name).is_some_and(|h| h.owner == *owner)
    }
}

#[derive(Debug)]
pub(crate) struct LockTable {
    state: Mutex<TableState>,
    released: Condvar,
    contention_warn: Option<Duration>,
}

impl LockTable {
    /// Create an empty table. Waiters blocked longer than `contention_warn`
    /// log a single warning and keep waiting.
    pub(crate) fn new(contention_warn: Option<Duration>) -> Self {
        Self {
            state: Mutex::new(TableState::default()),
            released: Condvar::new(),
            contention_warn,
        }
    }

    // Every critical section finishes its mutation before anything that could
    // panic, so a poisoned table is still consistent.
    fn lock_state(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until `owner` holds `name`.
    pub(crate) fn acquire(&self, owner: &LockOwner, name: &ResourceName) -> Acquired {
        let mut state = self.lock_state();
        let started = Instant::now();
        let mut warned = false;

        loop {
            match state.held.get(name) {
                None => break,
                Some(holder) if holder.owner == *owner => return Acquired::AlreadyOwned,
                Some(holder) => match self.contention_warn {
                    Some(threshold) if !warned => {
                        let remaining = threshold.saturating_sub(started.elapsed());
                        if remaining.is_zero() {
                            warn!(
                                lock = %name,
                                owner = %owner,
                                holder = %holder.owner,
                                waited_ms = started.elapsed().as_millis() as u64,
                                "Lock is still held by another owner"
                            );
                            warned = true;
                            continue;
                        }
                        state = self
                            .released
                            .wait_timeout(state, remaining)
                            .unwrap_or_else(PoisonError::into_inner)
                            .0;
                    }
                    _ => {
                        state = self
                            .released
                            .wait(state)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                },
            }
        }

        state.held.insert(
            name.clone(),
            Holder {
                owner: owner.clone(),
                acquired_at: Utc::now(),
            },
        );
        state
            .owned
            .entry(owner.clone())
            .or_default()
            .insert(name.clone());
        Acquired::Granted
    }

    /// Release `name` if `owner` holds it. Returns whether anything changed.
    pub(crate) fn release(&self, owner: &LockOwner, name: &str) -> bool {
        let mut state = self.lock_state();
        if !state.is_owner(owner, name) {
            return false;
        }

        state.held.remove(name);
        if let Some(names) = state.owned.get_mut(owner) {
            names.remove(name);
            if names.is_empty() {
                state.owned.remove(owner);
            }
        }
        drop(state);

        self.released.notify_all();
        true
    }

    pub(crate) fn is_owner(&self, owner: &LockOwner, name: &str) -> bool {
        self.lock_state().is_owner(owner, name)
    }

    #[cfg(test)]
    pub(crate) fn is_held(&self, name: &str) -> bool {
        self.lock_state().held.contains_key(name)
    }

    /// Snapshot of every held lock, sorted by name.
    pub(crate) fn held_locks(&self) -> Vec<LockInfo> {
        let state = self.lock_state();
        let mut locks: Vec<LockInfo> = state
            .held
            .iter()
            .map(|(name, holder)| LockInfo {
                name: name.clone(),
                owner: holder.owner.clone(),
                acquired_at: holder.acquired_at,
            })
            .collect();
        locks.sort_by(|a, b| a.name.cmp(&b.name));
        locks
    }

    /// Names held by `owner`, sorted.
    pub(crate) fn owned_by(&self, owner: &LockOwner) -> Vec<ResourceName> {
        let state = self.lock_state();
        let mut names: Vec<ResourceName> = state
            .owned
            .get(owner)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
