//! # cycler — scheduling safety-guard for auto-scaling groups
//!
//! Composition root that wires a control-plane adapter into the group
//! controller and exposes `start`, `stop`, and `status` on the command line.
//!
//! ## Responsibilities
//! - Parse the command line and configuration (file, env vars)
//! - Initialise logging
//! - Construct the control-plane adapter (currently the simulated, in-memory
//!   one seeded from `[[inventory.groups]]`)
//! - Construct a `GroupController` per invocation with the requested mode
//! - Render the outcome and map it onto the process exit status
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use cycler_adapter_memory::InMemoryAutoScaling;
use cycler_app::services::GroupController;
use cycler_domain::id::GroupId;
use cycler_domain::policy::{InstanceAction, Mode, StopKind};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::report::Format;

#[derive(Parser)]
#[command(
    name = "cycler",
    about = "Start and stop auto-scaling groups on a schedule, safely",
    version,
    propagate_version = true
)]
struct Cli {
    /// Configuration file (default: ./cycler.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resume the group's automation and start every instance.
    ///
    /// Without --force nothing is touched and the action is reported as skipped.
    Start {
        group: GroupId,
        /// Allow instance state to change
        #[arg(long)]
        force: bool,
        /// Override the configured grace period, in seconds
        #[arg(long)]
        grace_period_secs: Option<u64>,
    },
    /// Suspend the group's automation and stop (or terminate) every instance.
    ///
    /// Without --force nothing is touched and the action is reported as skipped.
    Stop {
        group: GroupId,
        /// Terminate instances instead of stopping them
        #[arg(long)]
        terminate: bool,
        /// Allow instance state to change
        #[arg(long)]
        force: bool,
        /// Override the configured grace period, in seconds
        #[arg(long)]
        grace_period_secs: Option<u64>,
    },
    /// Show the group's suspended processes and current members
    Status { group: GroupId },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::warn!(
        groups = config.inventory.groups.len(),
        "using simulated control plane; no cloud resources will change"
    );
    let client = config
        .inventory
        .groups
        .iter()
        .cloned()
        .fold(InMemoryAutoScaling::new(), InMemoryAutoScaling::with_group);

    let (group, force, action, grace_override) = match cli.command {
        Commands::Status { group } => {
            let controller = GroupController::new(&client, group, Mode::Protected);
            let status = controller.status().await?;
            println!("{}", report::render_status(&status, cli.format));
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Start {
            group,
            force,
            grace_period_secs,
        } => (group, force, InstanceAction::Start, grace_period_secs),
        Commands::Stop {
            group,
            terminate,
            force,
            grace_period_secs,
        } => {
            let action = if terminate {
                InstanceAction::Terminate
            } else {
                InstanceAction::Stop
            };
            (group, force, action, grace_period_secs)
        }
    };

    let grace_period = grace_override.map_or_else(|| config.grace_period(), Duration::from_secs);
    let controller = GroupController::new(&client, group, Mode::from_authorized(force))
        .with_grace_period(grace_period);
    let outcome = match action {
        InstanceAction::Start => controller.start().await?,
        InstanceAction::Stop => controller.stop(StopKind::Stop).await?,
        InstanceAction::Terminate => controller.stop(StopKind::Terminate).await?,
    };

    println!("{}", report::render_outcome(&outcome, cli.format));
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
