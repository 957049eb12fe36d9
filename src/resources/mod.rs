use crate::config::SimulationConfig;
use crate::context::SimulationContext;
use crate::view::ProjectionOptions;
use bevy::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// The running simulation
#[derive(Resource, Deref, DerefMut)]
pub struct Simulation(pub SimulationContext);

/// What gets drawn, toggled at runtime
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct DisplaySettings {
    pub show_trails: bool,
    pub show_labels: bool,
    pub trail_stride: usize,
    pub satellite_orbit_pixels: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl DisplaySettings {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            show_trails: config.trails.enabled,
            show_labels: config.rendering.show_labels,
            trail_stride: config.trails.render_stride.max(1),
            satellite_orbit_pixels: config.rendering.satellite_orbit_pixels,
        }
    }

    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            satellite_orbit_pixels: self.satellite_orbit_pixels,
            include_trails: self.show_trails,
            trail_stride: self.trail_stride,
        }
    }
}
