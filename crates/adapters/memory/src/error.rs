//! In-memory adapter error types.

use cycler_domain::error::CyclerError;
use cycler_domain::id::InstanceId;
use cycler_domain::instance::InstanceStatus;
use cycler_domain::policy::InstanceAction;

/// Errors raised by the simulated control plane.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// A fault injected through [`InMemoryAutoScaling`](crate::InMemoryAutoScaling).
    #[error("injected fault on {target}")]
    InjectedFault {
        /// Group or instance the fault was registered for.
        target: String,
    },

    /// The instance is in a state that does not accept the command.
    #[error("cannot {action} instance {instance} while it is {status}")]
    IncorrectState {
        instance: InstanceId,
        status: InstanceStatus,
        action: InstanceAction,
    },
}

impl From<MemoryError> for CyclerError {
    fn from(err: MemoryError) -> Self {
        Self::client(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_injected_fault() {
        let err = MemoryError::InjectedFault {
            target: "as-12345".to_string(),
        };
        assert_eq!(err.to_string(), "injected fault on as-12345");
    }

    #[test]
    fn should_display_incorrect_state() {
        let err = MemoryError::IncorrectState {
            instance: InstanceId::new("i-1").unwrap(),
            status: InstanceStatus::Terminated,
            action: InstanceAction::Start,
        };
        assert_eq!(
            err.to_string(),
            "cannot start instance i-1 while it is terminated"
        );
    }

    #[test]
    fn should_convert_into_client_error() {
        let err: CyclerError = MemoryError::InjectedFault {
            target: "i-1".to_string(),
        }
        .into();
        assert!(matches!(err, CyclerError::Client(_)));
    }
}
