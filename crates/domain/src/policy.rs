//! Action policy — decides whether an instance action may run and which
//! group-level adjustment must precede it.
//!
//! The only trustworthy signal that a group may be touched is the explicit
//! [`Mode::Forced`] flag supplied by the caller. Suspension-set contents are
//! never consulted: a live production group can share the exact shape of a
//! scheduler-owned one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instance-level command the scheduler wants to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceAction {
    Start,
    Stop,
    Terminate,
}

impl InstanceAction {
    pub const ALL: [Self; 3] = [Self::Start, Self::Stop, Self::Terminate];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Terminate => "terminate",
        }
    }
}

impl fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a group should be brought down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    /// Graceful stop; instances can be started again later.
    #[default]
    Stop,
    /// Destroy the instances.
    Terminate,
}

impl From<StopKind> for InstanceAction {
    fn from(kind: StopKind) -> Self {
        match kind {
            StopKind::Stop => Self::Stop,
            StopKind::Terminate => Self::Terminate,
        }
    }
}

/// Authorization mode carried by the caller's task context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Explicit operator override: live resources may be touched.
    Forced,
    /// Default: instance state is never altered.
    #[default]
    Protected,
}

impl Mode {
    /// Map the task's "explicitly authorized" flag onto a mode.
    #[must_use]
    pub fn from_authorized(authorized: bool) -> Self {
        if authorized {
            Self::Forced
        } else {
            Self::Protected
        }
    }

    #[must_use]
    pub fn is_forced(self) -> bool {
        matches!(self, Self::Forced)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => f.write_str("forced"),
            Self::Protected => f.write_str("protected"),
        }
    }
}

/// Change to the group's automation-suspension set made before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAdjustment {
    None,
    /// Clear the suspension set so the group's own automation runs again.
    ResumeAutomation,
    /// Suspend every process so automation cannot fight the shutdown.
    SuspendAutomation,
}

/// Result of [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub perform_instance_action: bool,
    pub group_adjustment: GroupAdjustment,
}

impl Decision {
    const SKIP: Self = Self {
        perform_instance_action: false,
        group_adjustment: GroupAdjustment::None,
    };
}

/// Decide what an action is allowed to do under `mode`.
///
/// Total over its inputs: instance actions run iff `mode` is
/// [`Mode::Forced`], and the adjustment is `None` whenever they do not.
#[must_use]
pub fn decide(action: InstanceAction, mode: Mode) -> Decision {
    match mode {
        Mode::Protected => Decision::SKIP,
        Mode::Forced => Decision {
            perform_instance_action: true,
            group_adjustment: match action {
                InstanceAction::Start => GroupAdjustment::ResumeAutomation,
                InstanceAction::Stop | InstanceAction::Terminate => {
                    GroupAdjustment::SuspendAutomation
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_never_act_in_protected_mode() {
        for action in InstanceAction::ALL {
            let decision = decide(action, Mode::Protected);
            assert!(!decision.perform_instance_action, "{action} acted");
            assert_eq!(decision.group_adjustment, GroupAdjustment::None);
        }
    }

    #[test]
    fn should_always_act_in_forced_mode() {
        for action in InstanceAction::ALL {
            assert!(decide(action, Mode::Forced).perform_instance_action);
        }
    }

    #[test]
    fn should_resume_automation_before_forced_start() {
        assert_eq!(
            decide(InstanceAction::Start, Mode::Forced).group_adjustment,
            GroupAdjustment::ResumeAutomation
        );
    }

    #[test]
    fn should_suspend_automation_before_forced_stop_or_terminate() {
        for action in [InstanceAction::Stop, InstanceAction::Terminate] {
            assert_eq!(
                decide(action, Mode::Forced).group_adjustment,
                GroupAdjustment::SuspendAutomation
            );
        }
    }

    #[test]
    fn should_map_authorized_flag_to_mode() {
        assert_eq!(Mode::from_authorized(true), Mode::Forced);
        assert_eq!(Mode::from_authorized(false), Mode::Protected);
        assert_eq!(Mode::default(), Mode::Protected);
    }

    #[test]
    fn should_convert_stop_kind_into_action() {
        assert_eq!(InstanceAction::from(StopKind::Stop), InstanceAction::Stop);
        assert_eq!(
            InstanceAction::from(StopKind::Terminate),
            InstanceAction::Terminate
        );
    }
}
