//! Group — a cloud-managed auto-scaling group.

use serde::{Deserialize, Serialize};

use crate::id::GroupId;
use crate::instance::Instance;
use crate::process::SuspendedProcesses;

/// Handle to an auto-scaling group resolved by the control plane.
///
/// The group's suspension set and membership are deliberately absent: they
/// are owned by the control plane and read through the client on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
}

impl Group {
    #[must_use]
    pub fn new(id: GroupId) -> Self {
        Self { id }
    }
}

/// Point-in-time view of a group, returned by status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatus {
    pub group: GroupId,
    pub suspended_processes: SuspendedProcesses,
    pub instances: Vec<Instance>,
}

impl GroupStatus {
    /// Whether every automation process is currently suspended.
    #[must_use]
    pub fn is_fully_suspended(&self) -> bool {
        self.suspended_processes == crate::process::ProcessName::full_set()
    }
}
