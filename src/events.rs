//! Centralized event definitions
//!
//! Keyboard input is translated into [`SimulationCommand`]s by the controls
//! plugin; the simulation and visualization plugins each react to the
//! commands they own.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Reload the catalog and start over
    Restart,
    TogglePause,
    ToggleTrails,
    ToggleLabels,
    Quit,
}
