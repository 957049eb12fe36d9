//! Orrery library
//!
//! Random star system generation, the catalog format, the N-body stepping
//! loop and the Bevy plugins that drive and draw it. Both binaries are thin
//! wrappers around this crate, which also keeps it reachable from the
//! integration tests and benchmarks.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod events;
pub mod generator;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod states;
pub mod view;

// Test utilities are public for integration tests
pub mod test_utils;
