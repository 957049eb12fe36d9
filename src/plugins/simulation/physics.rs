use crate::context::load_system;
use crate::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Advance,
}

/// Populates the simulation from the configured catalog
pub fn load_initial_system(mut simulation: ResMut<Simulation>, config: Res<SimulationConfig>) {
    let system = load_system(&config.catalog.path, &config.bootstrap_options());
    simulation.replace_system(system);
}

/// One rendered frame worth of Euler substeps
pub fn advance_simulation(mut simulation: ResMut<Simulation>) {
    if simulation.system.is_empty() {
        return;
    }

    simulation.advance_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRow, write_catalog};
    use crate::physics::body::BodyColor;
    use crate::test_utils::create_simulation_test_app;

    fn write_sample_catalog(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("orrery-{}-{name}.txt", std::process::id()));
        let rows = vec![
            CatalogRow {
                name: "Sun".to_string(),
                x: 0.0,
                y: 0.0,
                radius_km: 696_000.0,
                color: BodyColor::new(255, 204, 0),
                mass: 2.0e30,
                speed_km_s: 0.0,
                primary: None,
            },
            CatalogRow {
                name: "Planet-1".to_string(),
                x: 1.0,
                y: 0.0,
                radius_km: 6371.0,
                color: BodyColor::new(80, 120, 255),
                mass: 6.0e24,
                speed_km_s: 29.78,
                primary: Some("Sun".to_string()),
            },
        ];
        write_catalog(&path, &rows).unwrap();
        path
    }

    fn app_with_catalog(name: &str) -> (App, std::path::PathBuf) {
        let path = write_sample_catalog(name);
        let mut config = SimulationConfig::default();
        config.catalog.path = path.clone();

        (create_simulation_test_app(config), path)
    }

    #[test]
    fn test_startup_loads_catalog() {
        let (app, path) = app_with_catalog("startup");
        std::fs::remove_file(&path).ok();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.system.len(), 2);
        assert!(simulation.system.star().is_some());
    }

    #[test]
    fn test_fixed_update_advances_when_running() {
        let (mut app, path) = app_with_catalog("running");
        std::fs::remove_file(&path).ok();

        let before = app.world().resource::<Simulation>().steps();
        app.world_mut().run_schedule(FixedUpdate);

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.steps(), before + 48);
        assert!(simulation.system.by_name("Planet-1").unwrap().position.y > 0.0);
    }

    #[test]
    fn test_fixed_update_holds_when_paused() {
        let (mut app, path) = app_with_catalog("paused");
        std::fs::remove_file(&path).ok();

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Paused);
        app.update();
        let before = app.world().resource::<Simulation>().steps();
        app.world_mut().run_schedule(FixedUpdate);

        assert_eq!(app.world().resource::<Simulation>().steps(), before);
    }
}
