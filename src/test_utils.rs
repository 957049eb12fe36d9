//! Test utilities for plugin testing

use bevy::prelude::*;

use crate::prelude::*;

/// Creates a minimal test app with core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    // Add minimal plugins needed for testing
    app.add_plugins((
        MinimalPlugins,
        bevy::input::InputPlugin,
        bevy::state::app::StatesPlugin,
    ));

    // Add events used by plugins
    app.add_event::<SimulationCommand>();

    // Add states
    app.init_state::<AppState>();

    app
}

/// A test app running the simulation plugin against `config`
pub fn create_simulation_test_app(config: SimulationConfig) -> App {
    let mut app = create_test_app();
    app.insert_resource(config);
    app.add_plugins(crate::plugins::simulation::SimulationPlugin);
    app.update();
    app
}

/// Configuration whose catalog path points nowhere, for tests that should
/// start from an empty system without touching the user's files
pub fn config_without_catalog() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.catalog.path = std::env::temp_dir().join("orrery-test-missing-catalog.txt");
    config
}

/// Helper to simulate a key press
pub fn press_key(app: &mut App, key: KeyCode) {
    // Clear the input state to ensure just_pressed works correctly
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

/// Helper to simulate a key release
pub fn release_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.world().contains_resource::<Time>());
        assert!(app.world().contains_resource::<ButtonInput<KeyCode>>());
        assert!(app.world().contains_resource::<State<AppState>>());
    }

    #[test]
    fn test_key_helpers() {
        let mut app = create_test_app();

        press_key(&mut app, KeyCode::Space);
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(input.pressed(KeyCode::Space));

        release_key(&mut app, KeyCode::Space);
        app.update(); // Need to update for release to take effect
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(!input.pressed(KeyCode::Space));
    }

    #[test]
    fn test_simulation_app_starts_empty_without_catalog() {
        let app = create_simulation_test_app(config_without_catalog());
        assert!(app.world().resource::<Simulation>().system.is_empty());
    }
}
