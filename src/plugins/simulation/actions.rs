//! Action handlers for simulation commands
//!
//! Restart reloads the catalog from disk, so edits to the file take effect
//! without relaunching.

use crate::context::load_system;
use crate::prelude::*;

pub fn handle_restart_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    config: Res<SimulationConfig>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::Restart) {
            continue;
        }

        info!("Restarting from {}", config.catalog.path.display());
        let system = load_system(&config.catalog.path, &config.bootstrap_options());
        simulation.replace_system(system);
    }
}

pub fn handle_toggle_pause_simulation_event(
    mut commands_reader: EventReader<SimulationCommand>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, SimulationCommand::TogglePause) {
            continue;
        }

        let next = current_state.get().toggled();
        info!("Simulation {:?}", next);
        next_state.set(next);
    }
}

pub fn handle_quit_event(
    mut commands_reader: EventReader<SimulationCommand>,
    mut exit: EventWriter<AppExit>,
) {
    if commands_reader
        .read()
        .any(|command| matches!(command, SimulationCommand::Quit))
    {
        exit.write_default();
    }
}
