//! Outcomes reported to the caller after a start or stop.

use crate::error::CyclerError;
use crate::id::{GroupId, InstanceId};
use crate::policy::{GroupAdjustment, InstanceAction, Mode};
use crate::time::Timestamp;

/// One instance that did not accept the command.
#[derive(Debug)]
pub struct InstanceFailure {
    pub instance: InstanceId,
    pub error: CyclerError,
}

/// Aggregate result of issuing one command to every group member.
///
/// A failing instance never hides the others: every attempted instance ends
/// up in exactly one of the two lists.
#[derive(Debug, Default)]
pub struct FanOutReport {
    pub succeeded: Vec<InstanceId>,
    pub failed: Vec<InstanceFailure>,
}

impl FanOutReport {
    /// Number of instances that received the command.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl FromIterator<(InstanceId, Result<(), CyclerError>)> for FanOutReport {
    fn from_iter<I: IntoIterator<Item = (InstanceId, Result<(), CyclerError>)>>(iter: I) -> Self {
        let mut report = Self::default();
        for (instance, result) in iter {
            match result {
                Ok(()) => report.succeeded.push(instance),
                Err(error) => report.failed.push(InstanceFailure { instance, error }),
            }
        }
        report
    }
}

/// A start or stop that went through the group adjustment and fan-out.
#[derive(Debug)]
pub struct AppliedOperation {
    pub group: GroupId,
    pub action: InstanceAction,
    pub adjustment: GroupAdjustment,
    pub report: FanOutReport,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

/// What a controller operation did.
#[derive(Debug)]
pub enum Outcome {
    /// The policy decided not to act; nothing was read or mutated.
    Skipped {
        group: GroupId,
        action: InstanceAction,
        mode: Mode,
    },
    Applied(AppliedOperation),
}

impl Outcome {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// False iff at least one instance failed to accept the command.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Skipped { .. } => true,
            Self::Applied(op) => op.report.is_success(),
        }
    }

    #[must_use]
    pub fn action(&self) -> InstanceAction {
        match self {
            Self::Skipped { action, .. } => *action,
            Self::Applied(op) => op.action,
        }
    }

    /// The fan-out report, if the operation was applied.
    #[must_use]
    pub fn report(&self) -> Option<&FanOutReport> {
        match self {
            Self::Skipped { .. } => None,
            Self::Applied(op) => Some(&op.report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFoundError;

    fn iid(s: &str) -> InstanceId {
        InstanceId::new(s).unwrap()
    }

    #[test]
    fn should_split_results_into_succeeded_and_failed() {
        let report: FanOutReport = vec![
            (iid("i-1"), Ok(())),
            (
                iid("i-2"),
                Err(NotFoundError {
                    kind: "Instance",
                    id: "i-2".to_string(),
                }
                .into()),
            ),
            (iid("i-3"), Ok(())),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded, vec![iid("i-1"), iid("i-3")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].instance, iid("i-2"));
        assert!(!report.is_success());
    }

    #[test]
    fn should_treat_empty_report_as_success() {
        let report = FanOutReport::default();
        assert_eq!(report.attempted(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn should_treat_skipped_outcome_as_success_without_report() {
        let outcome = Outcome::Skipped {
            group: GroupId::new("as-12345").unwrap(),
            action: InstanceAction::Terminate,
            mode: Mode::Protected,
        };
        assert!(outcome.is_skipped());
        assert!(outcome.is_success());
        assert!(outcome.report().is_none());
        assert_eq!(outcome.action(), InstanceAction::Terminate);
    }
}
