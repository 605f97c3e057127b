//! Instance — a compute member of an auto-scaling group.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::InstanceId;

/// Lifecycle status of an instance, owned by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceStatus {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
}

impl InstanceStatus {
    /// Every status, for exhaustive iteration.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Running,
        Self::Stopping,
        Self::Stopped,
        Self::ShuttingDown,
        Self::Terminated,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// A snapshot of one group member as listed by the control plane.
///
/// Snapshots are never cached across operations; membership can change
/// between invocation and execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub status: InstanceStatus,
}

impl Instance {
    #[must_use]
    pub fn new(id: InstanceId, status: InstanceStatus) -> Self {
        Self { id, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_kebab_case_status() {
        assert_eq!(
            "shutting-down".parse::<InstanceStatus>().unwrap(),
            InstanceStatus::ShuttingDown
        );
    }

    #[test]
    fn should_reject_unknown_status() {
        assert!("hibernating".parse::<InstanceStatus>().is_err());
    }

    #[test]
    fn should_match_serde_and_display_names() {
        for status in InstanceStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
