//! # cycler-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AutoScalingClient` — group lookup, process suspension, membership,
//!     and instance start/stop/terminate
//! - Define **driving/inbound** use-cases:
//!   - `GroupController` — gate an action through the policy, adjust the
//!     group, wait the grace period, fan the command out to every member
//! - Orchestrate domain objects without knowing *how* the control plane is
//!   reached
//!
//! ## Dependency rule
//! Depends on `cycler-domain` only (plus `tokio::time` and `futures`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
