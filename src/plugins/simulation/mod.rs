//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`Simulation`] resource: loads the catalog at startup, advances
//! the bodies on the fixed schedule and reacts to pause, restart and quit
//! commands.

use crate::context::SimulationContext;
use crate::physics::system::StarSystem;
use crate::prelude::*;
use crate::view::ViewTransform;

mod actions;
mod physics;

use actions::{handle_quit_event, handle_restart_simulation_event, handle_toggle_pause_simulation_event};
use physics::{PhysicsSet, advance_simulation, load_initial_system};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Commands,
    Camera,
    Render,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        info!("=== Current Configuration (TOML) ===\n{}", config.to_toml());
        info!("=== End Configuration ===");

        let view = ViewTransform::centered(
            config.rendering.pixels_per_au,
            config.rendering.window_width,
            config.rendering.window_height,
        );
        let context = SimulationContext::new(StarSystem::new(), view, config.physics.settings());
        info!(
            "Stepping {} x {} s per frame with {} ({:?} update order)",
            context.settings.substeps,
            context.settings.timestep,
            context.integrator().name(),
            context.settings.update_order
        );

        app.insert_resource(Simulation(context));
        app.insert_resource(DisplaySettings::from_config(&config));
        app.insert_resource(Time::<Fixed>::from_hz(config.rendering.frame_rate.max(1.0)));
        app.insert_resource(config);

        app.init_state::<AppState>();
        app.add_event::<SimulationCommand>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Commands,
                SimulationSet::Camera,
                SimulationSet::Render,
            )
                .chain(),
        );

        app.add_systems(Startup, load_initial_system);
        app.add_systems(
            FixedUpdate,
            advance_simulation
                .in_set(PhysicsSet::Advance)
                .run_if(in_state(AppState::Running)),
        );
        app.add_systems(
            Update,
            (
                handle_restart_simulation_event,
                handle_toggle_pause_simulation_event,
                handle_quit_event,
            )
                .in_set(SimulationSet::Commands),
        );
    }
}
