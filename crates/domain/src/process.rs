//! Automation processes — the group-internal behaviours that can be suspended.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An automation process run by the control plane on behalf of a group.
///
/// Display and parsing use the control plane's canonical names
/// (`"Launch"`, `"AZRebalance"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcessName {
    Launch,
    Terminate,
    HealthCheck,
    ReplaceUnhealthy,
    #[serde(rename = "AZRebalance")]
    AzRebalance,
    AlarmNotification,
    ScheduledActions,
    AddToLoadBalancer,
}

/// The set of processes currently suspended on a group.
pub type SuspendedProcesses = BTreeSet<ProcessName>;

impl ProcessName {
    /// Every automation process, in control-plane order.
    pub const ALL: [Self; 8] = [
        Self::Launch,
        Self::Terminate,
        Self::HealthCheck,
        Self::ReplaceUnhealthy,
        Self::AzRebalance,
        Self::AlarmNotification,
        Self::ScheduledActions,
        Self::AddToLoadBalancer,
    ];

    /// The full suspension set, as left behind by a suspend-all.
    #[must_use]
    pub fn full_set() -> SuspendedProcesses {
        Self::ALL.into_iter().collect()
    }

    /// Canonical control-plane name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "Launch",
            Self::Terminate => "Terminate",
            Self::HealthCheck => "HealthCheck",
            Self::ReplaceUnhealthy => "ReplaceUnhealthy",
            Self::AzRebalance => "AZRebalance",
            Self::AlarmNotification => "AlarmNotification",
            Self::ScheduledActions => "ScheduledActions",
            Self::AddToLoadBalancer => "AddToLoadBalancer",
        }
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownProcess(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_contain_eight_distinct_processes_in_full_set() {
        assert_eq!(ProcessName::full_set().len(), 8);
    }

    #[test]
    fn should_parse_every_canonical_name() {
        for process in ProcessName::ALL {
            assert_eq!(process.as_str().parse::<ProcessName>().unwrap(), process);
        }
    }

    #[test]
    fn should_reject_unknown_name() {
        let result = "AzRebalance".parse::<ProcessName>();
        assert_eq!(
            result,
            Err(ValidationError::UnknownProcess("AzRebalance".to_string()))
        );
    }

    #[test]
    fn should_serialize_az_rebalance_with_canonical_name() {
        let json = serde_json::to_string(&ProcessName::AzRebalance).unwrap();
        assert_eq!(json, "\"AZRebalance\"");
    }
}
