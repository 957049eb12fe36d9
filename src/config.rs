use crate::catalog::BootstrapOptions;
use crate::physics::math::{GRAVITATIONAL_CONSTANT, Scalar};
use crate::physics::simulation::{PhysicsSettings, UpdateOrder};
use crate::physics::trail::DEFAULT_MAX_TRAIL_POINTS;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG_PATH: &str = "planets.txt";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub catalog: CatalogConfig,
    pub generator: GeneratorConfig,
    pub trails: TrailConfig,
    pub rendering: RenderingConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    /// Seconds per Euler step
    pub timestep: Scalar,
    /// Simulated seconds covered by one rendered frame
    pub seconds_per_frame: Scalar,
    pub update_order: UpdateOrder,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            timestep: 150.0,
            seconds_per_frame: 2.0 * 3600.0,
            update_order: UpdateOrder::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn settings(&self) -> PhysicsSettings {
        PhysicsSettings {
            gravitational_constant: self.gravitational_constant,
            timestep: self.timestep,
            substeps: PhysicsSettings::substeps_for(self.seconds_per_frame, self.timestep),
            update_order: self.update_order,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
    /// Drop bodies with an unresolvable primary instead of placing them
    /// around the star
    pub strict_primaries: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_PATH),
            strict_primaries: false,
        }
    }
}

/// Ranges the random system generator samples from. Distances in AU for
/// planets and kilometres for moons, masses in kilograms.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: Option<u64>,
    pub output: PathBuf,
    pub gravitational_constant: Scalar,

    pub star_name: String,
    pub star_color: [u8; 3],
    pub min_star_mass: Scalar,
    pub max_star_mass: Scalar,
    pub min_star_radius_km: Scalar,
    pub max_star_radius_km: Scalar,

    pub min_planets: usize,
    pub max_planets: usize,
    pub first_planet_distance_au: Scalar,
    pub min_planet_spacing_au: Scalar,
    pub max_planet_spacing_au: Scalar,
    pub min_planet_radius_km: Scalar,
    pub max_planet_radius_km: Scalar,
    pub min_planet_mass: Scalar,
    pub max_planet_mass: Scalar,

    pub moon_probability: f64,
    pub min_moons: usize,
    pub max_moons: usize,
    pub first_moon_distance_km: Scalar,
    pub min_moon_spacing_km: Scalar,
    pub max_moon_spacing_km: Scalar,
    pub min_moon_radius_km: Scalar,
    /// Largest moon radius as a fraction of its planet's radius
    pub max_moon_radius_fraction: Scalar,
    pub min_moon_mass: Scalar,
    /// Largest moon mass as a fraction of its planet's mass
    pub max_moon_mass_fraction: Scalar,

    pub min_color_channel: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            output: PathBuf::from(DEFAULT_CATALOG_PATH),
            gravitational_constant: 6.67430e-11,

            star_name: "Sun".to_string(),
            star_color: [255, 204, 0],
            min_star_mass: 1.5e30,
            max_star_mass: 2.5e30,
            min_star_radius_km: 6.0e5,
            max_star_radius_km: 8.0e5,

            min_planets: 4,
            max_planets: 8,
            first_planet_distance_au: 0.4,
            min_planet_spacing_au: 0.5,
            max_planet_spacing_au: 4.0,
            min_planet_radius_km: 2000.0,
            max_planet_radius_km: 70_000.0,
            min_planet_mass: 5.0e23,
            max_planet_mass: 5.0e27,

            moon_probability: 0.6,
            min_moons: 1,
            max_moons: 3,
            first_moon_distance_km: 80_000.0,
            min_moon_spacing_km: 50_000.0,
            max_moon_spacing_km: 200_000.0,
            min_moon_radius_km: 10.0,
            max_moon_radius_fraction: 0.25,
            min_moon_mass: 1.0e15,
            max_moon_mass_fraction: 1.0e-3,

            min_color_channel: 50,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub enabled: bool,
    pub max_points: usize,
    /// Draw every n-th stored sample
    pub render_stride: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_points: DEFAULT_MAX_TRAIL_POINTS,
            render_stride: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Rendered (and simulated) frames per second
    pub frame_rate: f64,
    pub pixels_per_au: Scalar,
    /// On-screen orbit radius satellites of moving primaries are inflated to
    pub satellite_orbit_pixels: Scalar,
    pub show_labels: bool,
    pub label_font_size: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 1000.0,
            frame_rate: 60.0,
            pixels_per_au: crate::view::DEFAULT_PIXELS_PER_AU,
            satellite_orbit_pixels: 15.0,
            show_labels: true,
            label_font_size: 12.0,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a file, falling back to defaults if the file
    /// is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Path of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "orrery")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                info!("No user config directory available. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            strict_primaries: self.catalog.strict_primaries,
            trail_max_points: self.trails.max_points,
        }
    }

    /// The effective configuration rendered as TOML, for startup logging
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("<unserializable config: {e}>"))
    }
}
