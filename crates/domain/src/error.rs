//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CyclerError`]
//! via `From` when crossing a port boundary.

use std::error::Error as StdError;

/// Top-level error returned by ports and application services.
#[derive(Debug, thiserror::Error)]
pub enum CyclerError {
    /// A group or instance does not exist on the control plane.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Invalid input (identifiers, process names, configuration values).
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Any other failure surfaced by the control-plane client (timeout,
    /// throttling, permission denial, …).
    #[error("control plane client error")]
    Client(#[source] Box<dyn StdError + Send + Sync>),
}

impl CyclerError {
    /// Wrap an arbitrary client-side failure.
    pub fn client<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Client(err.into())
    }

    /// Whether this error reports a missing group or instance.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A lookup for `kind` with identifier `id` found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    /// What was looked up (e.g. `"Group"`, `"Instance"`).
    pub kind: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An identifier was empty or whitespace only.
    #[error("identifier must not be empty")]
    EmptyId,

    /// A process name did not match any known automation process.
    #[error("unknown automation process {0:?}")]
    UnknownProcess(String),

    /// An instance status string was not recognised.
    #[error("unknown instance status {0:?}")]
    UnknownStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_kind_and_id() {
        let err = NotFoundError {
            kind: "Group",
            id: "as-12345".to_string(),
        };
        assert_eq!(err.to_string(), "Group as-12345 not found");
    }

    #[test]
    fn should_convert_not_found_into_cycler_error() {
        let err: CyclerError = NotFoundError {
            kind: "Instance",
            id: "i-1".to_string(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn should_wrap_client_failure_with_source() {
        let err = CyclerError::client("throttled");
        assert!(matches!(err, CyclerError::Client(_)));
        assert!(!err.is_not_found());
        assert_eq!(
            StdError::source(&err).map(ToString::to_string).as_deref(),
            Some("throttled")
        );
    }

    #[test]
    fn should_display_unknown_process() {
        let err = ValidationError::UnknownProcess("Scale".to_string());
        assert_eq!(err.to_string(), "unknown automation process \"Scale\"");
    }
}
