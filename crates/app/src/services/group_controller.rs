//! Group controller — gates start/stop of one auto-scaling group.
//!
//! Every operation follows the same sequence:
//!
//! 1. ask the [policy](cycler_domain::policy::decide) what the action may do
//! 2. adjust the group's automation-suspension set (resume or suspend all)
//! 3. wait the grace period so the control plane can settle
//! 4. fetch the *current* membership and fan the command out to every member
//!
//! In protected mode the sequence stops after step 1 and the control plane
//! is not contacted at all.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use cycler_domain::error::CyclerError;
use cycler_domain::group::{Group, GroupStatus};
use cycler_domain::id::GroupId;
use cycler_domain::instance::Instance;
use cycler_domain::outcome::{AppliedOperation, FanOutReport, Outcome};
use cycler_domain::policy::{GroupAdjustment, InstanceAction, Mode, StopKind, decide};
use cycler_domain::time;

use crate::ports::AutoScalingClient;

/// Grace period used when the caller does not configure one.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Start/stop controller bound to one group and one authorization mode.
///
/// Stateless apart from its configuration; build one per scheduled action.
/// Concurrent operations on the same group are not coordinated here.
pub struct GroupController<C> {
    client: C,
    group_id: GroupId,
    mode: Mode,
    grace_period: Duration,
}

impl<C: AutoScalingClient> GroupController<C> {
    /// Create a controller with the [`DEFAULT_GRACE_PERIOD`].
    pub fn new(client: C, group_id: GroupId, mode: Mode) -> Self {
        Self {
            client,
            group_id,
            mode,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Builder-style variant of [`set_grace_period`](Self::set_grace_period).
    #[must_use]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Delay between a group-level adjustment and the instance fan-out.
    /// Zero is allowed.
    pub fn set_grace_period(&mut self, grace_period: Duration) {
        self.grace_period = grace_period;
    }

    #[must_use]
    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    #[must_use]
    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bring the group up: resume automation, then start every member.
    ///
    /// # Errors
    ///
    /// Returns [`CyclerError::NotFound`] when the group does not exist, or
    /// any client error raised while resuming processes or listing members.
    /// Per-instance failures are reported in the returned [`Outcome`].
    #[tracing::instrument(skip(self), fields(group = %self.group_id, mode = %self.mode))]
    pub async fn start(&self) -> Result<Outcome, CyclerError> {
        self.run(InstanceAction::Start).await
    }

    /// Bring the group down: suspend automation, then stop or terminate
    /// every member.
    ///
    /// # Errors
    ///
    /// Returns [`CyclerError::NotFound`] when the group does not exist, or
    /// any client error raised while suspending processes or listing
    /// members. Per-instance failures are reported in the returned
    /// [`Outcome`].
    #[tracing::instrument(skip(self), fields(group = %self.group_id, mode = %self.mode))]
    pub async fn stop(&self, kind: StopKind) -> Result<Outcome, CyclerError> {
        self.run(kind.into()).await
    }

    /// Read the group's suspension set and current members. Allowed in any
    /// mode; never mutates.
    ///
    /// # Errors
    ///
    /// Returns [`CyclerError::NotFound`] when the group does not exist, or
    /// any client error raised by the reads.
    #[tracing::instrument(skip(self), fields(group = %self.group_id))]
    pub async fn status(&self) -> Result<GroupStatus, CyclerError> {
        let group = self.client.lookup_group(&self.group_id).await?;
        let suspended_processes = self.client.suspended_processes(&group).await?;
        let instances = self.client.list_instances(&group).await?;
        Ok(GroupStatus {
            group: group.id,
            suspended_processes,
            instances,
        })
    }

    async fn run(&self, action: InstanceAction) -> Result<Outcome, CyclerError> {
        let decision = decide(action, self.mode);
        if !decision.perform_instance_action {
            info!(%action, "not authorized to act on group, skipping");
            return Ok(Outcome::Skipped {
                group: self.group_id.clone(),
                action,
                mode: self.mode,
            });
        }

        let started_at = time::now();
        let group = self.client.lookup_group(&self.group_id).await?;

        self.adjust(&group, decision.group_adjustment).await?;
        self.wait_grace_period().await;
        let report = self.fan_out(&group, action).await?;

        info!(
            %action,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "group action complete"
        );

        Ok(Outcome::Applied(AppliedOperation {
            group: group.id,
            action,
            adjustment: decision.group_adjustment,
            report,
            started_at,
            finished_at: time::now(),
        }))
    }

    async fn adjust(&self, group: &Group, adjustment: GroupAdjustment) -> Result<(), CyclerError> {
        match adjustment {
            GroupAdjustment::None => Ok(()),
            GroupAdjustment::ResumeAutomation => {
                info!("resuming all automation processes");
                self.client.resume_all_processes(group).await
            }
            GroupAdjustment::SuspendAutomation => {
                info!("suspending all automation processes");
                self.client.suspend_all_processes(group).await
            }
        }
    }

    async fn wait_grace_period(&self) {
        if self.grace_period.is_zero() {
            return;
        }
        debug!(grace_period = ?self.grace_period, "waiting for control plane to settle");
        tokio::time::sleep(self.grace_period).await;
    }

    /// Issue `action` to every current member concurrently, collecting
    /// every per-instance result.
    async fn fan_out(&self, group: &Group, action: InstanceAction) -> Result<FanOutReport, CyclerError> {
        let instances = self.client.list_instances(group).await?;
        if instances.is_empty() {
            debug!("group has no members");
            return Ok(FanOutReport::default());
        }

        let results = join_all(instances.iter().map(|instance| async move {
            let result = self.command(action, instance).await;
            if let Err(err) = &result {
                warn!(instance = %instance.id, %action, error = %err, "instance command failed");
            }
            (instance.id.clone(), result)
        }))
        .await;

        Ok(results.into_iter().collect())
    }

    async fn command(&self, action: InstanceAction, instance: &Instance) -> Result<(), CyclerError> {
        debug!(instance = %instance.id, status = %instance.status, %action, "issuing instance command");
        match action {
            InstanceAction::Start => self.client.start_instance(instance).await,
            InstanceAction::Stop => self.client.stop_instance(instance).await,
            InstanceAction::Terminate => self.client.terminate_instance(instance).await,
        }
    }
}
