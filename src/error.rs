//! Error types for txlock.
//!
//! Uses thiserror for derive macros. Lock-service errors map to process exit
//! codes so the CLI can report them the same way as any other failure.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lock operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock could not be granted because the ambient transaction could not
    /// be queried or registered with. The lock table is left untouched.
    #[error("Lock acquisition failed: {0}")]
    Acquisition(String),

    /// Invalid configuration or an impossible semaphore composition.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A [`SchedulerDetails`](crate::details::SchedulerDetails) setter
    /// rejected the scheduler name or id.
    #[error("{0}")]
    Details(String),

    /// Two owners were observed inside the same resource.
    #[error("Mutual exclusion violated: {0}")]
    Violation(String),
}

impl LockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::Acquisition(_) => exit_codes::LOCK_FAILURE,
            LockError::Config(_) => exit_codes::CONFIG_ERROR,
            LockError::Details(_) => exit_codes::CONFIG_ERROR,
            LockError::Violation(_) => exit_codes::DRILL_FAILURE,
        }
    }
}

/// Errors reported by a transaction coordinator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The coordinator could not report the ambient transaction.
    #[error("failed to get transaction from coordinator: {0}")]
    Query(String),

    /// The coordinator refused a completion callback.
    #[error("failed to register completion callback: {0}")]
    Registration(String),

    /// The owner has no active transaction to complete.
    #[error("no active transaction for '{0}'")]
    NoTransaction(String),

    /// The owner already has an active transaction.
    #[error("transaction already active for '{0}'")]
    AlreadyActive(String),
}

impl From<TransactionError> for LockError {
    fn from(err: TransactionError) -> Self {
        LockError::Acquisition(err.to_string())
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_error_has_lock_exit_code() {
        let err = LockError::Acquisition("coordinator down".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn config_errors_have_config_exit_code() {
        let err = LockError::Config("bad value".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);

        let err = LockError::Details("rejected".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn violation_has_drill_exit_code() {
        let err = LockError::Violation("2 overlaps".to_string());
        assert_eq!(err.exit_code(), exit_codes::DRILL_FAILURE);
    }

    #[test]
    fn transaction_errors_become_acquisition_errors() {
        let err: LockError = TransactionError::Registration("closed".to_string()).into();
        assert!(matches!(err, LockError::Acquisition(_)));
        assert_eq!(
            err.to_string(),
            "Lock acquisition failed: failed to register completion callback: closed"
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LockError::Config("instance_name must be non-empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: instance_name must be non-empty"
        );

        let err = TransactionError::NoTransaction("worker-1".to_string());
        assert_eq!(err.to_string(), "no active transaction for 'worker-1'");
    }
}
