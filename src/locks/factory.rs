//! Building the configured semaphore.

use super::semaphore::Semaphore;
use super::simple::SimpleSemaphore;
use super::transactional::TransactionalSemaphore;
use crate::config::{Config, SemaphoreKind};
use crate::details::apply_details;
use crate::error::{LockError, Result};
use crate::transaction::TransactionCoordinator;
use std::sync::Arc;
use tracing::info;

/// Build the semaphore selected by `config`.
///
/// The scheduler details from the config are applied to the semaphore before
/// it is returned.
///
/// # Returns
///
/// * `Ok(Box<dyn Semaphore>)` - The configured semaphore
/// * `Err(LockError::Config)` - `transactional` was requested without a coordinator
pub fn build_semaphore(
    config: &Config,
    coordinator: Option<Arc<dyn TransactionCoordinator>>,
) -> Result<Box<dyn Semaphore>> {
    let threshold = config.contention_warning();

    let semaphore: Box<dyn Semaphore> = match config.semaphore {
        SemaphoreKind::Simple => {
            let mut semaphore = SimpleSemaphore::with_contention_warning(threshold);
            apply_details(&mut semaphore, &config.instance_name, &config.instance_id)?;
            Box::new(semaphore)
        }
        SemaphoreKind::Transactional => {
            let coordinator = coordinator.ok_or_else(|| {
                LockError::Config(
                    "the transactional semaphore requires a transaction coordinator".to_string(),
                )
            })?;
            let mut semaphore =
                TransactionalSemaphore::with_contention_warning(coordinator, threshold);
            apply_details(&mut semaphore, &config.instance_name, &config.instance_id)?;
            Box::new(semaphore)
        }
    };

    info!(
        instance = %config.instance_name,
        semaphore = config.semaphore.as_str(),
        "Using in-memory semaphore"
    );
    Ok(semaphore)
}
