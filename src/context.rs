//! The state one running simulation carries between frames

use crate::catalog::{self, Bootstrap, BootstrapOptions};
use crate::physics::integrators::{Integrator, SemiImplicitEuler};
use crate::physics::math::Scalar;
use crate::physics::simulation::{self, PhysicsSettings};
use crate::physics::system::StarSystem;
use crate::view::{ProjectedBody, ProjectionOptions, ViewTransform, project};
use bevy::log::{error, info, warn};
use std::path::Path;

/// Bodies, camera and stepping parameters, handed explicitly to the update
/// and draw paths
pub struct SimulationContext {
    pub system: StarSystem,
    pub view: ViewTransform,
    pub settings: PhysicsSettings,
    integrator: Box<dyn Integrator>,
    /// Simulated seconds since load
    elapsed: Scalar,
    steps: u64,
}

impl SimulationContext {
    pub fn new(system: StarSystem, view: ViewTransform, settings: PhysicsSettings) -> Self {
        Self {
            system,
            view,
            settings,
            integrator: Box::new(SemiImplicitEuler),
            elapsed: 0.0,
            steps: 0,
        }
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn elapsed(&self) -> Scalar {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One Euler step of `settings.timestep` seconds
    pub fn step(&mut self) {
        simulation::step(&mut self.system, &self.settings, self.integrator.as_ref());
        self.elapsed += self.settings.timestep;
        self.steps += 1;
    }

    /// Runs the configured number of substeps for one rendered frame
    pub fn advance_frame(&mut self) {
        for _ in 0..self.settings.substeps.max(1) {
            self.step();
        }
    }

    pub fn draw(&self, options: &ProjectionOptions) -> Vec<ProjectedBody> {
        project(&self.system, &self.view, options)
    }

    /// Swaps in a freshly loaded system, keeping the view
    pub fn replace_system(&mut self, system: StarSystem) {
        self.system = system;
        self.elapsed = 0.0;
        self.steps = 0;
    }
}

/// Reads and bootstraps a catalog file.
///
/// Failures never abort: an unreadable file or a catalog with no usable star
/// is logged and yields an empty system.
pub fn load_system(path: impl AsRef<Path>, options: &BootstrapOptions) -> StarSystem {
    let path = path.as_ref();

    let parsed = match catalog::read_catalog(path) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Could not load catalog: {e}. Starting with an empty system.");
            return StarSystem::new();
        }
    };

    match catalog::bootstrap(&parsed.rows, options) {
        Ok(Bootstrap { system, report }) => {
            if !report.is_clean() {
                warn!(
                    "Catalog {} loaded with problems: {} missing primaries, {} cycles, {} dropped, {} duplicates",
                    path.display(),
                    report.missing_primaries.len(),
                    report.cycles.len(),
                    report.dropped.len(),
                    report.duplicates.len()
                );
            }
            info!("Loaded {} bodies from {}", system.len(), path.display());
            system
        }
        Err(e) => {
            error!("Could not bootstrap {}: {e}. Starting with an empty system.", path.display());
            StarSystem::new()
        }
    }
}
