//! Group fixtures — declarative seeds for the simulated control plane.

use serde::Deserialize;

use cycler_domain::id::{GroupId, InstanceId};
use cycler_domain::instance::{Instance, InstanceStatus};
use cycler_domain::process::SuspendedProcesses;

/// Initial state of one simulated group.
///
/// Deserializable so that groups can be declared in configuration:
///
/// ```toml
/// [[inventory.groups]]
/// name = "dev-web"
/// instances = 2
/// status = "stopped"
/// suspended_processes = ["Launch", "HealthCheck"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupFixture {
    pub name: GroupId,
    /// Number of members, named `<name>-1` … `<name>-N`.
    #[serde(default = "default_instances")]
    pub instances: usize,
    /// Status every member starts in.
    #[serde(default = "default_status")]
    pub status: InstanceStatus,
    #[serde(default)]
    pub suspended_processes: SuspendedProcesses,
}

fn default_instances() -> usize {
    1
}

fn default_status() -> InstanceStatus {
    InstanceStatus::Running
}

impl GroupFixture {
    /// One running instance, nothing suspended.
    #[must_use]
    pub fn new(name: GroupId) -> Self {
        Self {
            name,
            instances: default_instances(),
            status: default_status(),
            suspended_processes: SuspendedProcesses::new(),
        }
    }

    #[must_use]
    pub fn instances(mut self, count: usize) -> Self {
        self.instances = count;
        self
    }

    #[must_use]
    pub fn status(mut self, status: InstanceStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn suspended(mut self, processes: SuspendedProcesses) -> Self {
        self.suspended_processes = processes;
        self
    }

    pub(crate) fn members(&self) -> Vec<Instance> {
        (1..=self.instances)
            .filter_map(|n| InstanceId::new(format!("{}-{n}", self.name)).ok())
            .map(|id| Instance::new(id, self.status))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycler_domain::process::ProcessName;

    #[test]
    fn should_name_members_after_group() {
        let fixture = GroupFixture::new(GroupId::new("as-12345").unwrap()).instances(2);
        let ids: Vec<String> = fixture.members().into_iter().map(|i| i.id.into()).collect();
        assert_eq!(ids, vec!["as-12345-1", "as-12345-2"]);
    }

    #[test]
    fn should_apply_defaults_when_deserializing_minimal_fixture() {
        let fixture: GroupFixture = toml::from_str("name = 'dev-web'").unwrap();
        assert_eq!(fixture.instances, 1);
        assert_eq!(fixture.status, InstanceStatus::Running);
        assert!(fixture.suspended_processes.is_empty());
    }

    #[test]
    fn should_deserialize_full_fixture() {
        let fixture: GroupFixture = toml::from_str(
            "
            name = 'dev-web'
            instances = 3
            status = 'stopped'
            suspended_processes = ['Launch', 'AZRebalance']
            ",
        )
        .unwrap();
        assert_eq!(fixture.instances, 3);
        assert_eq!(fixture.status, InstanceStatus::Stopped);
        assert!(fixture.suspended_processes.contains(&ProcessName::AzRebalance));
    }

    #[test]
    fn should_reject_unknown_process_name() {
        let result: Result<GroupFixture, _> =
            toml::from_str("name = 'dev-web'\nsuspended_processes = ['Scale']");
        assert!(result.is_err());
    }
}
