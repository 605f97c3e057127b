//! Auto-scaling port — the control plane that owns groups and instances.
//!
//! The core never caches what this port returns beyond a single operation:
//! suspension sets and membership can change underneath it at any time.

use std::future::Future;
use std::sync::Arc;

use cycler_domain::error::CyclerError;
use cycler_domain::group::Group;
use cycler_domain::id::GroupId;
use cycler_domain::instance::Instance;
use cycler_domain::process::SuspendedProcesses;

/// Capability to read and command a cloud auto-scaling control plane.
///
/// Implementations live in adapter crates. Missing groups or instances are
/// reported as [`CyclerError::NotFound`]; everything else as
/// [`CyclerError::Client`]. Retry and backoff, if any, belong here and not in
/// the controller.
pub trait AutoScalingClient: Send + Sync {
    /// Resolve a group by name.
    fn lookup_group(
        &self,
        id: &GroupId,
    ) -> impl Future<Output = Result<Group, CyclerError>> + Send;

    /// Processes currently suspended on the group.
    fn suspended_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<SuspendedProcesses, CyclerError>> + Send;

    /// Suspend every automation process on the group.
    fn suspend_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send;

    /// Resume every automation process on the group. Idempotent.
    fn resume_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send;

    /// Current members of the group, in no particular order.
    fn list_instances(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<Instance>, CyclerError>> + Send;

    fn start_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send;

    fn stop_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send;

    fn terminate_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send;
}

impl<T: AutoScalingClient> AutoScalingClient for Arc<T> {
    fn lookup_group(
        &self,
        id: &GroupId,
    ) -> impl Future<Output = Result<Group, CyclerError>> + Send {
        (**self).lookup_group(id)
    }

    fn suspended_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<SuspendedProcesses, CyclerError>> + Send {
        (**self).suspended_processes(group)
    }

    fn suspend_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).suspend_all_processes(group)
    }

    fn resume_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).resume_all_processes(group)
    }

    fn list_instances(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<Instance>, CyclerError>> + Send {
        (**self).list_instances(group)
    }

    fn start_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).start_instance(instance)
    }

    fn stop_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).stop_instance(instance)
    }

    fn terminate_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).terminate_instance(instance)
    }
}

impl<T: AutoScalingClient> AutoScalingClient for &T {
    fn lookup_group(
        &self,
        id: &GroupId,
    ) -> impl Future<Output = Result<Group, CyclerError>> + Send {
        (**self).lookup_group(id)
    }

    fn suspended_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<SuspendedProcesses, CyclerError>> + Send {
        (**self).suspended_processes(group)
    }

    fn suspend_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).suspend_all_processes(group)
    }

    fn resume_all_processes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).resume_all_processes(group)
    }

    fn list_instances(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<Instance>, CyclerError>> + Send {
        (**self).list_instances(group)
    }

    fn start_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).start_instance(instance)
    }

    fn stop_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).stop_instance(instance)
    }

    fn terminate_instance(
        &self,
        instance: &Instance,
    ) -> impl Future<Output = Result<(), CyclerError>> + Send {
        (**self).terminate_instance(instance)
    }
}
