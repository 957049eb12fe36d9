use bevy::prelude::*;
use clap::Parser;
use orrery::cli::{SimulateArgs, load_and_apply_config};
use orrery::plugins::{
    camera::CameraPlugin, controls::ControlsPlugin, simulation::SimulationPlugin,
    visualization::VisualizationPlugin,
};
use orrery::states::AppState;

fn main() -> AppExit {
    let args = SimulateArgs::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            resolution: (config.rendering.window_width, config.rendering.window_height).into(),
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(config);
    app.add_plugins((
        SimulationPlugin,
        CameraPlugin,
        VisualizationPlugin,
        ControlsPlugin,
    ));

    if args.paused {
        app.insert_state(AppState::Paused);
    }

    app.run()
}
