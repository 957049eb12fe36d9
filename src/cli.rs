//! Command line interfaces for the simulator and the generator

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::physics::simulation::UpdateOrder;

/// Version string shown by `--version`, stamped with the build date
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Timestep must be a positive, finite number of seconds
    InvalidTimestep(f64),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidTimestep(value) => {
                write!(f, "Invalid timestep: {value} (expected a positive number of seconds)")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Orrery - toy solar system simulator
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", version, long_version = LONG_VERSION, about, long_about = None)]
pub struct SimulateArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog file to load (overrides config file)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Drop bodies whose primary cannot be resolved
    #[arg(long)]
    pub strict: bool,

    /// Whether forces see positions from the start of the step or the
    /// bodies already moved in the same pass
    #[arg(long, value_enum, value_name = "ORDER")]
    pub update_order: Option<UpdateOrder>,

    /// Seconds per Euler step (overrides config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timestep: Option<f64>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,
}

/// Orrery generator - writes a random star system catalog
#[derive(Parser, Debug, Default)]
#[command(name = "orrery-generate", version, long_version = LONG_VERSION, about, long_about = None)]
pub struct GenerateArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog file to write (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible systems
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// An explicitly named config file must load; otherwise the user config (or
/// defaults) is used
fn load_base_config(path: Option<&PathBuf>) -> Result<SimulationConfig, CliError> {
    match path {
        Some(config_path) => {
            println!("Loading configuration from: {}", config_path.display());
            SimulationConfig::load(config_path)
                .map_err(|e| CliError::ConfigLoad(format!("{}: {e}", config_path.display())))
        }
        None => Ok(SimulationConfig::load_from_user_config()),
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &SimulateArgs) -> Result<SimulationConfig, CliError> {
    let mut config = load_base_config(args.config.as_ref())?;

    if let Some(catalog) = &args.catalog {
        println!("Using catalog: {}", catalog.display());
        config.catalog.path = catalog.clone();
    }

    if args.strict {
        println!("Dropping bodies with unresolvable primaries");
        config.catalog.strict_primaries = true;
    }

    if let Some(order) = args.update_order {
        println!("Using update order: {order:?}");
        config.physics.update_order = order;
    }

    if let Some(timestep) = args.timestep {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(CliError::InvalidTimestep(timestep));
        }
        println!("Overriding timestep to: {timestep} s");
        config.physics.timestep = timestep;
    }

    Ok(config)
}

/// Same as [`load_and_apply_config`] for the generator's flags
pub fn load_and_apply_generator_config(args: &GenerateArgs) -> Result<SimulationConfig, CliError> {
    let mut config = load_base_config(args.config.as_ref())?;

    if let Some(output) = &args.output {
        println!("Writing catalog to: {}", output.display());
        config.generator.output = output.clone();
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.generator.seed = Some(seed);
    }

    Ok(config)
}
