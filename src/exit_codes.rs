//! Exit code constants for the txlock CLI.
//!
//! - 0: Success
//! - 1: Configuration error (bad file, invalid value, bad composition)
//! - 2: Drill failure (mutual exclusion violated)
//! - 4: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: unreadable or invalid config, bad arguments.
pub const CONFIG_ERROR: i32 = 1;

/// A contention drill observed two owners inside the same resource.
pub const DRILL_FAILURE: i32 = 2;

/// Lock acquisition failure: the transaction coordinator could not be used.
pub const LOCK_FAILURE: i32 = 4;
