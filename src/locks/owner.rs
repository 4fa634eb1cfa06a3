//! Lock owner identity tokens.
//!
//! Ownership is tracked per [`LockOwner`] rather than through thread-local
//! state hidden inside the semaphore. Callers pass the token explicitly, which
//! lets tests simulate many logical tasks from one thread and lets a
//! completion callback release on behalf of the owner from any thread.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT: LockOwner = LockOwner::for_current_thread();
}

/// Identity of a lock holder.
///
/// Two tokens are equal iff they were minted by the same call (or cloned from
/// one another). The label is for diagnostics only.
#[derive(Debug, Clone)]
pub struct LockOwner {
    id: u64,
    label: Arc<str>,
}

impl LockOwner {
    /// Mint a fresh owner with a diagnostic label.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            id: NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed),
            label: Arc::from(label.as_ref()),
        }
    }

    /// The owner token of the calling OS thread.
    ///
    /// Allocated lazily on first use and stable for the thread's lifetime.
    pub fn current() -> Self {
        CURRENT.with(Clone::clone)
    }

    fn for_current_thread() -> Self {
        let thread = std::thread::current();
        match thread.name() {
            Some(name) => Self::new(name),
            None => Self::new(format!("{:?}", thread.id())),
        }
    }

    /// Process-unique numeric id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Diagnostic label (thread name or the label given to [`LockOwner::new`]).
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for LockOwner {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LockOwner {}

impl Hash for LockOwner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LockOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}
