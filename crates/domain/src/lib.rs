//! # cycler-domain
//!
//! Pure domain model for the cycler scheduling safety-guard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Groups** (auto-scaling groups and their automation processes)
//! - Define **Instances** (members of a group and their lifecycle status)
//! - Define the **action policy**: which instance actions may run, and the
//!   group-level adjustment each one requires
//! - Define **outcomes** reported back to the caller
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod group;
pub mod instance;
pub mod outcome;
pub mod policy;
pub mod process;
