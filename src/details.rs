//! Optional scheduler-details capability.
//!
//! Components that want to know which scheduler instance they serve opt in by
//! overriding the setters of [`SchedulerDetails`]. Components that don't care
//! inherit the no-op defaults, so [`apply_details`] can be called on every
//! collaborator at composition time without knowing which ones listen.

use crate::error::Result;
use tracing::debug;

/// Receives the scheduler instance name and id.
///
/// A setter that cannot accept a value returns [`LockError::Details`] with a
/// message naming the value; [`apply_details`] stops at the first rejection.
///
/// [`LockError::Details`]: crate::error::LockError::Details
pub trait SchedulerDetails {
    /// Called with the scheduler's instance name.
    fn set_instance_name(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Called with the scheduler's instance id.
    fn set_instance_id(&mut self, _id: &str) -> Result<()> {
        Ok(())
    }
}

/// Hand the scheduler name and id to `target`.
///
/// Errors returned by a setter propagate; a target that ignores the details is
/// not an error.
pub fn apply_details(
    target: &mut dyn SchedulerDetails,
    instance_name: &str,
    instance_id: &str,
) -> Result<()> {
    debug!(instance_name, instance_id, "Applying scheduler details");
    target.set_instance_name(instance_name)?;
    target.set_instance_id(instance_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LockError;

    struct Ignores;

    impl SchedulerDetails for Ignores {}

    #[derive(Default)]
    struct Records {
        name: Option<String>,
        id: Option<String>,
    }

    impl SchedulerDetails for Records {
        fn set_instance_name(&mut self, name: &str) -> Result<()> {
            self.name = Some(name.to_string());
            Ok(())
        }

        fn set_instance_id(&mut self, id: &str) -> Result<()> {
            self.id = Some(id.to_string());
            Ok(())
        }
    }

    struct RejectsId;

    impl SchedulerDetails for RejectsId {
        fn set_instance_id(&mut self, id: &str) -> Result<()> {
            Err(LockError::Details(format!("unsupported instance id '{}'", id)))
        }
    }

    #[test]
    fn target_without_setters_is_accepted() {
        assert!(apply_details(&mut Ignores, "sched", "NON_CLUSTERED").is_ok());
    }

    #[test]
    fn setters_receive_values() {
        let mut target = Records::default();
        apply_details(&mut target, "sched", "node-1").unwrap();

        assert_eq!(target.name.as_deref(), Some("sched"));
        assert_eq!(target.id.as_deref(), Some("node-1"));
    }

    #[test]
    fn setter_error_propagates() {
        let err = apply_details(&mut RejectsId, "sched", "node-1").unwrap_err();
        assert!(matches!(err, LockError::Details(_)));
    }
}
