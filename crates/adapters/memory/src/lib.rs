//! # cycler-adapter-memory
//!
//! In-memory auto-scaling control plane used for dry runs, demonstrations,
//! and end-to-end tests.
//!
//! ## Behaviour
//!
//! | Command | Effect |
//! |---------|--------|
//! | `suspend_all_processes` | suspension set becomes the full process set |
//! | `resume_all_processes` | suspension set becomes empty |
//! | `start_instance` | `stopped`/`pending`/`running` → `running` |
//! | `stop_instance` | `running`/`pending`/`stopped` → `stopped` |
//! | `terminate_instance` | the instance leaves the group |
//!
//! Every mutating command is appended to a [`Command`] log. Faults can be
//! injected per group or per instance.
//!
//! ## Dependency rule
//!
//! Depends on `cycler-app` (port traits) and `cycler-domain` only.

mod error;
mod fixture;

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cycler_app::ports::AutoScalingClient;
use cycler_domain::error::{CyclerError, NotFoundError};
use cycler_domain::group::{Group, GroupStatus};
use cycler_domain::id::{GroupId, InstanceId};
use cycler_domain::instance::{Instance, InstanceStatus};
use cycler_domain::policy::InstanceAction;
use cycler_domain::process::{ProcessName, SuspendedProcesses};

pub use error::MemoryError;
pub use fixture::GroupFixture;

/// A mutating call received by the simulated control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SuspendAll(GroupId),
    ResumeAll(GroupId),
    Start(InstanceId),
    Stop(InstanceId),
    Terminate(InstanceId),
}

#[derive(Debug)]
struct GroupState {
    suspended: SuspendedProcesses,
    instances: Vec<Instance>,
}

#[derive(Debug, Default)]
struct Inner {
    groups: HashMap<GroupId, GroupState>,
    commands: Vec<Command>,
    failing_groups: HashSet<GroupId>,
    failing_instances: HashSet<InstanceId>,
}

/// Simulated control plane holding any number of groups.
#[derive(Debug, Default)]
pub struct InMemoryAutoScaling {
    inner: Mutex<Inner>,
}

impl InMemoryAutoScaling {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert_group`](Self::insert_group).
    #[must_use]
    pub fn with_group(self, fixture: GroupFixture) -> Self {
        self.insert_group(fixture);
        self
    }

    /// Add (or replace) a group seeded from `fixture`.
    pub fn insert_group(&self, fixture: GroupFixture) {
        let state = GroupState {
            suspended: fixture.suspended_processes.clone(),
            instances: fixture.members(),
        };
        self.lock().groups.insert(fixture.name, state);
    }

    /// Make every group-level call against `group` fail.
    pub fn fail_group(&self, group: GroupId) {
        self.lock().failing_groups.insert(group);
    }

    /// Make every command against `instance` fail.
    pub fn fail_instance(&self, instance: InstanceId) {
        self.lock().failing_instances.insert(instance);
    }

    /// Drop an instance from its group, as a scale-in would.
    ///
    /// Returns `false` if no group owned the instance.
    pub fn remove_instance(&self, instance: &InstanceId) -> bool {
        let mut inner = self.lock();
        for group in inner.groups.values_mut() {
            let before = group.instances.len();
            group.instances.retain(|member| member.id != *instance);
            if group.instances.len() != before {
                return true;
            }
        }
        false
    }

    /// Every mutating command received so far, in arrival order.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.lock().commands.clone()
    }

    /// Current state of a group, without recording anything.
    #[must_use]
    pub fn snapshot(&self, group: &GroupId) -> Option<GroupStatus> {
        self.lock().groups.get(group).map(|state| GroupStatus {
            group: group.clone(),
            suspended_processes: state.suspended.clone(),
            instances: state.instances.clone(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_group_state<T>(
        &self,
        group: &Group,
        f: impl FnOnce(&mut GroupState) -> T,
    ) -> Result<T, CyclerError> {
        let mut inner = self.lock();
        if inner.failing_groups.contains(&group.id) {
            return Err(MemoryError::InjectedFault {
                target: group.id.to_string(),
            }
            .into());
        }
        inner
            .groups
            .get_mut(&group.id)
            .map(f)
            .ok_or_else(|| group_not_found(&group.id))
    }

    fn adjust(
        &self,
        group: &Group,
        command: Command,
        suspended: SuspendedProcesses,
    ) -> Result<(), CyclerError> {
        self.with_group_state(group, |state| state.suspended = suspended)?;
        tracing::debug!(group = %group.id, ?command, "applied group command");
        self.lock().commands.push(command);
        Ok(())
    }

    fn instance_command(
        &self,
        instance: &Instance,
        action: InstanceAction,
    ) -> Result<(), CyclerError> {
        let mut inner = self.lock();
        inner.commands.push(match action {
            InstanceAction::Start => Command::Start(instance.id.clone()),
            InstanceAction::Stop => Command::Stop(instance.id.clone()),
            InstanceAction::Terminate => Command::Terminate(instance.id.clone()),
        });

        if inner.failing_instances.contains(&instance.id) {
            return Err(MemoryError::InjectedFault {
                target: instance.id.to_string(),
            }
            .into());
        }

        let (members, position) = inner
            .groups
            .values_mut()
            .map(|group| &mut group.instances)
            .find_map(|members| {
                members
                    .iter()
                    .position(|m| m.id == instance.id)
                    .map(|position| (members, position))
            })
            .ok_or_else(|| NotFoundError {
                kind: "Instance",
                id: instance.id.to_string(),
            })?;

        let member = &mut members[position];
        match transition(member.status, action) {
            Some(InstanceStatus::Terminated) => {
                members.remove(position);
            }
            Some(next) => member.status = next,
            None => {
                return Err(MemoryError::IncorrectState {
                    instance: member.id.clone(),
                    status: member.status,
                    action,
                }
                .into());
            }
        }
        tracing::debug!(instance = %instance.id, %action, "applied instance command");
        Ok(())
    }
}

/// Next status after `action`, or `None` if the instance cannot accept it.
fn transition(status: InstanceStatus, action: InstanceAction) -> Option<InstanceStatus> {
    use InstanceStatus::{Pending, Running, ShuttingDown, Stopped, Stopping, Terminated};

    match (action, status) {
        (InstanceAction::Start, Pending | Running | Stopped) => Some(Running),
        (InstanceAction::Stop, Pending | Running | Stopping | Stopped) => Some(Stopped),
        (InstanceAction::Terminate, _) => Some(Terminated),
        (InstanceAction::Start, Stopping | ShuttingDown | Terminated)
        | (InstanceAction::Stop, ShuttingDown | Terminated) => None,
    }
}

fn group_not_found(id: &GroupId) -> CyclerError {
    NotFoundError {
        kind: "Group",
        id: id.to_string(),
    }
    .into()
}

impl AutoScalingClient for InMemoryAutoScaling {
    async fn lookup_group(&self, id: &GroupId) -> Result<Group, CyclerError> {
        let exists = self.lock().groups.contains_key(id);
        if exists {
            Ok(Group::new(id.clone()))
        } else {
            Err(group_not_found(id))
        }
    }

    async fn suspended_processes(&self, group: &Group) -> Result<SuspendedProcesses, CyclerError> {
        self.with_group_state(group, |state| state.suspended.clone())
    }

    async fn suspend_all_processes(&self, group: &Group) -> Result<(), CyclerError> {
        self.adjust(
            group,
            Command::SuspendAll(group.id.clone()),
            ProcessName::full_set(),
        )
    }

    async fn resume_all_processes(&self, group: &Group) -> Result<(), CyclerError> {
        self.adjust(
            group,
            Command::ResumeAll(group.id.clone()),
            SuspendedProcesses::new(),
        )
    }

    async fn list_instances(&self, group: &Group) -> Result<Vec<Instance>, CyclerError> {
        self.with_group_state(group, |state| state.instances.clone())
    }

    fn start_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        let result = self.instance_command(instance, InstanceAction::Start);
        async { result }
    }

    fn stop_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        let result = self.instance_command(instance, InstanceAction::Stop);
        async { result }
    }

    fn terminate_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        let result = self.instance_command(instance, InstanceAction::Terminate);
        async { result }
    }
}
