//! Orrery prelude module
//!
//! Re-exports the types the plugins and binaries reach for most often.

// External crate re-exports
pub use bevy::prelude::*;
pub use rand::Rng;

// Internal re-exports - Physics
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - States
pub use crate::states::AppState;

// Internal re-exports - Events
pub use crate::events::SimulationCommand;

// Internal re-exports - Resources
pub use crate::resources::{DisplaySettings, SharedRng, Simulation};
