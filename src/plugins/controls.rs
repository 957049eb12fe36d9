//! Controls plugin - Self-contained plugin pattern
//!
//! Translates keyboard input into SimulationCommand events. Mouse pan and
//! zoom live in the camera plugin since they act on the view directly.

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            keyboard_input_handler.in_set(SimulationSet::Input),
        );
    }
}

/// Key bound to each command
pub fn command_for_key(key: KeyCode) -> Option<SimulationCommand> {
    match key {
        KeyCode::Space => Some(SimulationCommand::TogglePause),
        KeyCode::KeyT => Some(SimulationCommand::ToggleTrails),
        KeyCode::KeyL => Some(SimulationCommand::ToggleLabels),
        KeyCode::KeyR => Some(SimulationCommand::Restart),
        KeyCode::Escape => Some(SimulationCommand::Quit),
        _ => None,
    }
}

/// Handles keyboard input and emits SimulationCommand events
fn keyboard_input_handler(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for &keycode in keys.get_just_pressed() {
        if let Some(command) = command_for_key(keycode) {
            commands.write(command);
        }
    }
}
