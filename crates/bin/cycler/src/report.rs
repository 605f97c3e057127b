//! Human and machine readable rendering of controller results.

use std::error::Error;
use std::fmt::Write;

use cycler_domain::group::GroupStatus;
use cycler_domain::outcome::{AppliedOperation, Outcome};
use serde_json::json;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Render the result of a start or stop.
#[must_use]
pub fn render_outcome(outcome: &Outcome, format: Format) -> String {
    match format {
        Format::Text => outcome_text(outcome),
        Format::Json => outcome_json(outcome).to_string(),
    }
}

/// Render a group status.
#[must_use]
pub fn render_status(status: &GroupStatus, format: Format) -> String {
    match format {
        Format::Text => status_text(status),
        Format::Json => json!(status).to_string(),
    }
}

/// Flatten an error and its sources into `outer: inner: root`.
#[must_use]
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, ": {cause}");
        source = cause.source();
    }
    out
}

fn outcome_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Skipped { group, action, mode } => {
            format!("{group}: {action} skipped ({mode} mode, pass --force to act)")
        }
        Outcome::Applied(op) => applied_text(op),
    }
}

fn applied_text(op: &AppliedOperation) -> String {
    let mut out = format!(
        "{}: {} applied to {} instance(s), {} failed",
        op.group,
        op.action,
        op.report.attempted(),
        op.report.failed.len()
    );
    for id in &op.report.succeeded {
        let _ = write!(out, "\n  ok      {id}");
    }
    for failure in &op.report.failed {
        let _ = write!(
            out,
            "\n  failed  {}: {}",
            failure.instance,
            error_chain(&failure.error)
        );
    }
    out
}

fn outcome_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::Skipped { group, action, mode } => json!({
            "group": group,
            "action": action,
            "status": "skipped",
            "mode": mode,
        }),
        Outcome::Applied(op) => json!({
            "group": op.group,
            "action": op.action,
            "status": "applied",
            "adjustment": op.adjustment,
            "succeeded": op.report.succeeded,
            "failed": op.report.failed.iter().map(|failure| json!({
                "instance": failure.instance,
                "error": error_chain(&failure.error),
            })).collect::<Vec<_>>(),
            "started_at": op.started_at,
            "finished_at": op.finished_at,
        }),
    }
}

fn status_text(status: &GroupStatus) -> String {
    let suspended = if status.suspended_processes.is_empty() {
        "none".to_string()
    } else {
        status
            .suspended_processes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut out = format!("{}\n  suspended: {suspended}", status.group);
    for instance in &status.instances {
        let _ = write!(out, "\n  {}  {}", instance.id, instance.status);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycler_domain::error::{CyclerError, NotFoundError};
    use cycler_domain::id::{GroupId, InstanceId};
    use cycler_domain::instance::{Instance, InstanceStatus};
    use cycler_domain::outcome::{FanOutReport, InstanceFailure};
    use cycler_domain::policy::{GroupAdjustment, InstanceAction, Mode};
    use cycler_domain::process::{ProcessName, SuspendedProcesses};
    use cycler_domain::time;

    fn gid() -> GroupId {
        GroupId::new("as-12345").unwrap()
    }

    fn iid(s: &str) -> InstanceId {
        InstanceId::new(s).unwrap()
    }

    fn skipped() -> Outcome {
        Outcome::Skipped {
            group: gid(),
            action: InstanceAction::Start,
            mode: Mode::Protected,
        }
    }

    fn applied() -> Outcome {
        Outcome::Applied(AppliedOperation {
            group: gid(),
            action: InstanceAction::Stop,
            adjustment: GroupAdjustment::SuspendAutomation,
            report: FanOutReport {
                succeeded: vec![iid("i-1")],
                failed: vec![InstanceFailure {
                    instance: iid("i-2"),
                    error: NotFoundError {
                        kind: "Instance",
                        id: "i-2".to_string(),
                    }
                    .into(),
                }],
            },
            started_at: time::now(),
            finished_at: time::now(),
        })
    }

    #[test]
    fn should_render_skipped_as_text() {
        assert_eq!(
            render_outcome(&skipped(), Format::Text),
            "as-12345: start skipped (protected mode, pass --force to act)"
        );
    }

    #[test]
    fn should_render_skipped_as_json() {
        let value: serde_json::Value =
            serde_json::from_str(&render_outcome(&skipped(), Format::Json)).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["mode"], "protected");
        assert_eq!(value["action"], "start");
    }

    #[test]
    fn should_list_failed_instances_with_cause_in_text() {
        let text = render_outcome(&applied(), Format::Text);
        assert!(text.starts_with("as-12345: stop applied to 2 instance(s), 1 failed"));
        assert!(text.contains("ok      i-1"));
        assert!(text.contains("failed  i-2: not found: Instance i-2 not found"));
    }

    #[test]
    fn should_render_applied_as_json() {
        let value: serde_json::Value =
            serde_json::from_str(&render_outcome(&applied(), Format::Json)).unwrap();
        assert_eq!(value["adjustment"], "suspend_automation");
        assert_eq!(value["succeeded"], json!(["i-1"]));
        assert_eq!(value["failed"][0]["instance"], "i-2");
    }

    #[test]
    fn should_flatten_error_chain() {
        let err = CyclerError::client("throttled");
        assert_eq!(error_chain(&err), "control plane client error: throttled");
    }

    #[test]
    fn should_render_status_as_text() {
        let status = GroupStatus {
            group: gid(),
            suspended_processes: [ProcessName::Launch, ProcessName::AzRebalance]
                .into_iter()
                .collect(),
            instances: vec![Instance::new(iid("i-1"), InstanceStatus::Stopped)],
        };
        assert_eq!(
            render_status(&status, Format::Text),
            "as-12345\n  suspended: Launch, AZRebalance\n  i-1  stopped"
        );
    }

    #[test]
    fn should_render_empty_suspension_set_as_none() {
        let status = GroupStatus {
            group: gid(),
            suspended_processes: SuspendedProcesses::new(),
            instances: Vec::new(),
        };
        assert_eq!(
            render_status(&status, Format::Text),
            "as-12345\n  suspended: none"
        );
    }
}
