use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use orrery::cli::{GenerateArgs, load_and_apply_generator_config};
use orrery::plugins::generator::GeneratorPlugin;

fn main() -> AppExit {
    let args = GenerateArgs::parse();

    let config = match load_and_apply_generator_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(config)
        .add_plugins(GeneratorPlugin)
        .run()
}
