//! Garden engine binary.
//!
//! Entry point that wires the garden, the initial planting and the baseline
//! policy together and runs one episode.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `garden-config.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the initial plants and the control plant
//! 4. Build the garden and the policy sector layout
//! 5. Run the episode under the baseline policy
//! 6. Log the result and print a JSON summary line

mod error;
mod spawner;

use std::path::Path;

use garden_core::config::{LoggingConfig, SimulationConfig};
use garden_core::runner::{self, NoOpCallback};
use garden_core::{Garden, SectorLayout};
use garden_policy::BaselineSource;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "garden-config.yaml";

/// Application entry point for the garden engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the episode fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("garden-engine starting");
    info!(
        from_file,
        rows = config.garden.rows,
        cols = config.garden.cols,
        plant_types = config.garden.plant_types.len(),
        seed = config.garden.seed,
        timesteps = config.run.timesteps,
        "Configuration loaded"
    );

    // 3. Seed plants.
    let mut planting_rng = StdRng::seed_from_u64(config.garden.seed);
    let plants = spawner::spawn_plants(&config.garden, &config.planting, &mut planting_rng)?;
    let control = spawner::control_plant(&config.garden, &config.planting)?;

    // 4. Build the garden and sector layout.
    let mut garden = Garden::seeded(&config.garden, plants, control)?;
    let layout = SectorLayout::new(
        config.garden.rows,
        config.garden.cols,
        config.policy.sector_rows,
        config.policy.sector_cols,
    )?;
    let mut source = BaselineSource::seeded(config.policy.clone(), garden.step());
    info!(
        plants = garden.registry().len(),
        sectors = layout.count(),
        "Garden assembled, entering episode"
    );

    // 5. Run the episode.
    let result = runner::run_episode(
        &mut garden,
        &mut source,
        &layout,
        &config.run,
        &mut NoOpCallback,
    )?;

    // 6. Log results.
    runner::log_episode_end(&result);
    println!("{}", serde_json::to_string(&result)?);

    info!(
        total_timesteps = result.total_timesteps,
        "garden-engine shutdown complete"
    );
    Ok(())
}

/// Load the simulation configuration from [`CONFIG_FILE`].
///
/// Returns the config and whether it was read from disk.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = SimulationConfig::default();
        config.garden.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
