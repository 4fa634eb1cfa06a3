//! The contention drill.
//!
//! Worker threads lock, touch and unlock resource names round-robin while an
//! occupancy counter per name records whether two workers were ever inside
//! the same resource at once. In transactional mode each round runs in its own
//! transaction: the explicit release is deferred and the commit frees the lock.

use crate::cli::ContendArgs;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{info, warn};
use txlock::config::{Config, SemaphoreKind};
use txlock::error::{LockError, Result};
use txlock::locks::{LockOwner, Semaphore, build_semaphore};
use txlock::transaction::{LocalTransactionManager, TransactionCoordinator};

/// Outcome of a drill, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct DrillReport {
    pub semaphore: SemaphoreKind,
    pub threads: usize,
    pub names: Vec<String>,
    pub iterations: usize,
    pub acquisitions: usize,
    /// Releases that were still held after the explicit release call and only
    /// returned at commit.
    pub deferred_releases: usize,
    pub violations: usize,
    pub elapsed_ms: u64,
}

struct Drill<'a> {
    semaphore: &'a dyn Semaphore,
    tm: Option<&'a LocalTransactionManager>,
    names: &'a [String],
    iterations: usize,
    inside: Vec<AtomicUsize>,
    acquisitions: AtomicUsize,
    deferred: AtomicUsize,
    violations: AtomicUsize,
}

impl Drill<'_> {
    fn worker(&self, index: usize) -> Result<()> {
        let me = LockOwner::new(format!("drill-worker-{}", index));

        for round in 0..self.iterations {
            let slot = (index + round) % self.names.len();
            if let Err(e) = self.round(&me, slot) {
                if let Some(tm) = self.tm {
                    // Rolling back returns whatever the round still holds.
                    let _ = tm.rollback(&me);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn round(&self, me: &LockOwner, slot: usize) -> Result<()> {
        let name = self.names[slot].as_str();

        if let Some(tm) = self.tm {
            tm.begin(me)?;
        }

        self.semaphore.acquire(me, name)?;
        self.acquisitions.fetch_add(1, Ordering::Relaxed);

        if self.inside[slot].fetch_add(1, Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
            warn!(lock = name, owner = %me, "Two owners inside the same resource");
        }
        thread::yield_now();
        self.inside[slot].fetch_sub(1, Ordering::SeqCst);

        self.semaphore.release(me, name)?;

        if let Some(tm) = self.tm {
            if self.semaphore.is_owner(me, name) {
                self.deferred.fetch_add(1, Ordering::Relaxed);
            }
            tm.commit(me)?;
        }
        Ok(())
    }
}

/// Run a drill against the semaphore described by `config` and `args`.
pub fn run_drill(config: &Config, args: &ContendArgs) -> Result<DrillReport> {
    if args.threads == 0 {
        return Err(LockError::Config("--threads must be at least 1".to_string()));
    }
    if args.iterations == 0 {
        return Err(LockError::Config(
            "--iterations must be at least 1".to_string(),
        ));
    }
    if args.names.is_empty() || args.names.iter().any(|n| n.trim().is_empty()) {
        return Err(LockError::Config(
            "--names must list at least one non-empty name".to_string(),
        ));
    }

    // One occupancy counter per resource, however often it was listed.
    let mut names: Vec<String> = Vec::with_capacity(args.names.len());
    for name in &args.names {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    let mut config = config.clone();
    if args.transactional {
        config.semaphore = SemaphoreKind::Transactional;
    }

    let tm = Arc::new(LocalTransactionManager::new());
    let coordinator: Option<Arc<dyn TransactionCoordinator>> = match config.semaphore {
        SemaphoreKind::Simple => None,
        SemaphoreKind::Transactional => Some(tm.clone()),
    };
    let in_transactions = coordinator.is_some();
    let semaphore = build_semaphore(&config, coordinator)?;

    let drill = Drill {
        semaphore: semaphore.as_ref(),
        tm: in_transactions.then_some(tm.as_ref()),
        names: &names,
        iterations: args.iterations,
        inside: names.iter().map(|_| AtomicUsize::new(0)).collect(),
        acquisitions: AtomicUsize::new(0),
        deferred: AtomicUsize::new(0),
        violations: AtomicUsize::new(0),
    };

    let started = Instant::now();
    let outcomes: Vec<Result<()>> = thread::scope(|s| {
        let drill = &drill;
        let handles: Vec<_> = (0..args.threads)
            .map(|index| s.spawn(move || drill.worker(index)))
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(LockError::Violation("drill worker panicked".to_string())))
            })
            .collect()
    });
    let elapsed_ms = started.elapsed().as_millis() as u64;

    for outcome in outcomes {
        outcome?;
    }

    let report = DrillReport {
        semaphore: config.semaphore,
        threads: args.threads,
        names: names.clone(),
        iterations: args.iterations,
        acquisitions: drill.acquisitions.load(Ordering::SeqCst),
        deferred_releases: drill.deferred.load(Ordering::SeqCst),
        violations: drill.violations.load(Ordering::SeqCst),
        elapsed_ms,
    };

    info!(
        semaphore = report.semaphore.as_str(),
        acquisitions = report.acquisitions,
        violations = report.violations,
        elapsed_ms = report.elapsed_ms,
        "Contention drill finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(threads: usize, names: &[&str], iterations: usize, transactional: bool) -> ContendArgs {
        ContendArgs {
            threads,
            names: names.iter().map(|n| n.to_string()).collect(),
            iterations,
            transactional,
        }
    }

    #[test]
    fn simple_drill_has_no_violations() {
        let report = run_drill(&Config::default(), &args(4, &["a", "b"], 50, false)).unwrap();

        assert_eq!(report.semaphore, SemaphoreKind::Simple);
        assert_eq!(report.acquisitions, 200);
        assert_eq!(report.deferred_releases, 0);
        assert_eq!(report.violations, 0);
    }

    #[test]
    fn transactional_drill_defers_every_release() {
        let report = run_drill(&Config::default(), &args(3, &["a", "b"], 20, true)).unwrap();

        assert_eq!(report.semaphore, SemaphoreKind::Transactional);
        assert_eq!(report.acquisitions, 60);
        assert_eq!(report.deferred_releases, 60);
        assert_eq!(report.violations, 0);
    }

    #[test]
    fn transactional_config_is_honored_without_flag() {
        let config = Config {
            semaphore: SemaphoreKind::Transactional,
            ..Config::default()
        };
        let report = run_drill(&config, &args(2, &["a"], 5, false)).unwrap();
        assert_eq!(report.semaphore, SemaphoreKind::Transactional);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let config = Config::default();

        let err = run_drill(&config, &args(0, &["a"], 1, false)).unwrap_err();
        assert!(err.to_string().contains("--threads"));

        let err = run_drill(&config, &args(1, &["a"], 0, false)).unwrap_err();
        assert!(err.to_string().contains("--iterations"));

        let err = run_drill(&config, &args(1, &[], 1, false)).unwrap_err();
        assert!(err.to_string().contains("--names"));
    }

    #[test]
    fn repeated_names_share_one_resource() {
        let report =
            run_drill(&Config::default(), &args(4, &["a", "a", "b", "a"], 25, false)).unwrap();

        assert_eq!(report.names, vec!["a", "b"]);
        assert_eq!(report.acquisitions, 100);
        assert_eq!(report.violations, 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = run_drill(&Config::default(), &args(1, &["a"], 1, false)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["semaphore"], "simple");
        assert_eq!(json["acquisitions"], 1);
        assert_eq!(json["names"][0], "a");
    }
}
