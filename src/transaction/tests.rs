//! Tests for the local transaction manager.

use super::*;
use crate::error::TransactionError;
use crate::locks::LockOwner;
use std::sync::{Arc, Mutex};

fn recorder() -> (Arc<Mutex<Vec<TransactionOutcome>>>, impl Fn() -> CompletionCallback) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let make = {
        let seen = seen.clone();
        move || -> CompletionCallback {
            let seen = seen.clone();
            Box::new(move |outcome| seen.lock().unwrap().push(outcome))
        }
    };
    (seen, make)
}

#[test]
fn test_no_transaction_by_default() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");

    assert_eq!(tm.current_transaction(&owner).unwrap(), None);
    assert!(!tm.is_active(&owner));
}

#[test]
fn test_begin_sets_current_transaction_per_owner() {
    let tm = LocalTransactionManager::new();
    let a = LockOwner::new("a");
    let b = LockOwner::new("b");

    let tx = tm.begin(&a).unwrap();

    assert_eq!(tm.current_transaction(&a).unwrap(), Some(tx));
    assert_eq!(tm.current_transaction(&b).unwrap(), None);
}

#[test]
fn test_begin_twice_fails() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");

    tm.begin(&owner).unwrap();
    let err = tm.begin(&owner).unwrap_err();
    assert!(matches!(err, TransactionError::AlreadyActive(_)));
}

#[test]
fn test_commit_runs_callbacks_once_with_outcome() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");
    let (seen, make) = recorder();

    let tx = tm.begin(&owner).unwrap();
    tm.register_completion(&tx, make()).unwrap();
    tm.register_completion(&tx, make()).unwrap();
    tm.commit(&owner).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![TransactionOutcome::Committed, TransactionOutcome::Committed]
    );
    assert!(!tm.is_active(&owner));

    // Completing again has nothing to run.
    assert!(matches!(
        tm.commit(&owner),
        Err(TransactionError::NoTransaction(_))
    ));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_rollback_reports_rolled_back() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");
    let (seen, make) = recorder();

    let tx = tm.begin(&owner).unwrap();
    tm.register_completion(&tx, make()).unwrap();
    tm.rollback(&owner).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![TransactionOutcome::RolledBack]);
}

#[test]
fn test_register_on_finished_transaction_fails() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");
    let (seen, make) = recorder();

    let tx = tm.begin(&owner).unwrap();
    tm.commit(&owner).unwrap();

    let err = tm.register_completion(&tx, make()).unwrap_err();
    assert!(matches!(err, TransactionError::Registration(_)));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_panicking_callback_does_not_stop_others() {
    let tm = LocalTransactionManager::new();
    let owner = LockOwner::new("worker");
    let (seen, make) = recorder();

    let tx = tm.begin(&owner).unwrap();
    tm.register_completion(&tx, Box::new(|_: TransactionOutcome| panic!("callback failure")))
        .unwrap();
    tm.register_completion(&tx, make()).unwrap();
    tm.commit(&owner).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![TransactionOutcome::Committed]);
}

#[test]
fn test_callback_may_reenter_manager() {
    let tm = Arc::new(LocalTransactionManager::new());
    let owner = LockOwner::new("worker");

    let tx = tm.begin(&owner).unwrap();
    let inner = {
        let tm = tm.clone();
        let owner = owner.clone();
        move |_: TransactionOutcome| {
            // The finished transaction is no longer current.
            assert_eq!(tm.current_transaction(&owner).unwrap(), None);
            tm.begin(&owner).unwrap();
        }
    };
    tm.register_completion(&tx, Box::new(inner)).unwrap();
    tm.commit(&owner).unwrap();

    assert!(tm.is_active(&owner));
}
