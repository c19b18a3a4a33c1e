//! Configuration loading and typed config structures for the garden simulation.
//!
//! The canonical configuration lives in `garden-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every field has a
//! default, so a partial (or empty) file is valid.

use std::path::Path;

use garden_world::ReferencePlantParams;
use serde::Deserialize;

/// Environment variable overriding `garden.seed`.
pub const SEED_ENV_VAR: &str = "GARDEN_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `garden-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Garden geometry and resource mechanics.
    #[serde(default)]
    pub garden: GardenConfig,

    /// Baseline policy constants and sector layout.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Episode length and irrigation amounts.
    #[serde(default)]
    pub run: RunConfig,

    /// Initial planting.
    #[serde(default)]
    pub planting: PlantingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `GARDEN_SEED` environment variable overrides `garden.seed` when
    /// set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.garden.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.garden.apply_env_overrides();
        Ok(config)
    }
}

/// Garden geometry and resource mechanics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GardenConfig {
    /// Number of grid rows (N).
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of grid columns (M).
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Distance between adjacent grid points.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Water lost by every cell at the end of each timestep.
    #[serde(default = "default_drainage_rate")]
    pub drainage_rate: f64,

    /// Half-width, in cells, of the square watered by one irrigation.
    #[serde(default = "default_irr_threshold")]
    pub irr_threshold: usize,

    /// Supported plant types, in observation channel order.
    #[serde(default = "default_plant_types")]
    pub plant_types: Vec<String>,

    /// Seed for the garden's water-distribution RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Rescan a plant's whole bounding box when its radius jumps more
    /// than one grid step in a single timestep.
    #[serde(default)]
    pub full_rescan_on_multi_ring: bool,
}

impl GardenConfig {
    /// Override the seed with `GARDEN_SEED` when it is set and parses.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV_VAR)
            && let Ok(seed) = val.trim().parse::<u64>()
        {
            self.seed = seed;
        }
    }
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            step: default_step(),
            drainage_rate: default_drainage_rate(),
            irr_threshold: default_irr_threshold(),
            plant_types: default_plant_types(),
            seed: default_seed(),
            full_rescan_on_multi_ring: false,
        }
    }
}

/// Baseline policy constants and sector layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyConfig {
    /// Sector water level the irrigation rule fills towards.
    #[serde(default = "default_max_water_level")]
    pub max_water_level: f64,

    /// Timesteps before pruning is considered.
    #[serde(default = "default_prune_delay")]
    pub prune_delay: u64,

    /// A type is pruned when its canopy share exceeds this over the type count.
    #[serde(default = "default_prune_threshold")]
    pub prune_threshold: f64,

    /// Mean water per cell (per unit step) below which the garden irrigates.
    #[serde(default = "default_water_threshold")]
    pub water_threshold: f64,

    /// Rows per sector.
    #[serde(default = "default_sector_rows")]
    pub sector_rows: usize,

    /// Columns per sector.
    #[serde(default = "default_sector_cols")]
    pub sector_cols: usize,

    /// Seed for the sector-choice RNG.
    #[serde(default = "default_policy_seed")]
    pub seed: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_water_level: default_max_water_level(),
            prune_delay: default_prune_delay(),
            prune_threshold: default_prune_threshold(),
            water_threshold: default_water_threshold(),
            sector_rows: default_sector_rows(),
            sector_cols: default_sector_cols(),
            seed: default_policy_seed(),
        }
    }
}

/// Episode length and irrigation amounts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Number of timesteps in one episode.
    #[serde(default = "default_timesteps")]
    pub timesteps: u64,

    /// Uniform water level every cell is reset to on the first timestep.
    #[serde(default = "default_initial_water")]
    pub initial_water: f64,

    /// Water added per irrigation increment chosen by the policy.
    #[serde(default = "default_irrigation_per_increment")]
    pub irrigation_per_increment: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timesteps: default_timesteps(),
            initial_water: default_initial_water(),
            irrigation_per_increment: default_irrigation_per_increment(),
        }
    }
}

/// Initial planting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlantingConfig {
    /// Plants seeded per supported type.
    #[serde(default = "default_plants_per_type")]
    pub plants_per_type: usize,

    /// Growth parameters of the reference plant model.
    #[serde(default)]
    pub params: ReferencePlantParams,
}

impl Default for PlantingConfig {
    fn default() -> Self {
        Self {
            plants_per_type: default_plants_per_type(),
            params: ReferencePlantParams::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_rows() -> usize {
    50
}

const fn default_cols() -> usize {
    50
}

const fn default_step() -> f64 {
    1.0
}

const fn default_drainage_rate() -> f64 {
    2.0
}

const fn default_irr_threshold() -> usize {
    5
}

fn default_plant_types() -> Vec<String> {
    vec![
        String::from("basil"),
        String::from("thyme"),
        String::from("oregano"),
    ]
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_water_level() -> f64 {
    0.207
}

const fn default_prune_delay() -> u64 {
    20
}

const fn default_prune_threshold() -> f64 {
    2.0
}

const fn default_water_threshold() -> f64 {
    1.0
}

const fn default_sector_rows() -> usize {
    5
}

const fn default_sector_cols() -> usize {
    5
}

const fn default_policy_seed() -> u64 {
    7
}

const fn default_timesteps() -> u64 {
    100
}

const fn default_initial_water() -> f64 {
    10.0
}

const fn default_irrigation_per_increment() -> f64 {
    0.2
}

const fn default_plants_per_type() -> usize {
    5
}

fn default_log_level() -> String {
    String::from("info")
}
