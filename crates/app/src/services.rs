//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod group_controller;

pub use group_controller::{DEFAULT_GRACE_PERIOD, GroupController};
