//! Generator plugin - Self-contained plugin pattern
//!
//! Headless one-shot: on startup, generates a system from the configured
//! ranges, writes it to the catalog file and asks the app to exit.

use crate::catalog::write_catalog;
use crate::generator::generate_system;
use crate::prelude::*;

pub struct GeneratorPlugin;

impl Plugin for GeneratorPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        info!("=== Current Configuration (TOML) ===\n{}", config.to_toml());
        info!("=== End Configuration ===");

        app.insert_resource(SharedRng::from_optional_seed(config.generator.seed));
        app.insert_resource(config);
        app.add_systems(Startup, generate_catalog);
    }
}

fn generate_catalog(
    config: Res<SimulationConfig>,
    mut rng: ResMut<SharedRng>,
    mut exit: EventWriter<AppExit>,
) {
    let rows = generate_system(&config.generator, &mut **rng);
    let planets = rows
        .iter()
        .filter(|row| row.primary.as_deref() == Some(config.generator.star_name.as_str()))
        .count();
    let moons = rows.len().saturating_sub(1 + planets);

    match write_catalog(&config.generator.output, &rows) {
        Ok(()) => {
            info!(
                "Generated {} planets and {} moons into {}",
                planets,
                moons,
                config.generator.output.display()
            );
            exit.write(AppExit::Success);
        }
        Err(e) => {
            error!("Failed to write catalog: {e}");
            exit.write(AppExit::error());
        }
    }
}
