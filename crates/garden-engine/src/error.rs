//! Error types for the garden engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps every failure
//! mode of startup and the episode run.

/// Top-level error for the garden engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: garden_core::config::ConfigError,
    },

    /// Garden construction failed.
    #[error("garden error: {source}")]
    Garden {
        /// The underlying garden error.
        #[from]
        source: garden_core::GardenError,
    },

    /// The policy sector layout is invalid for this garden.
    #[error("sector error: {source}")]
    Sector {
        /// The underlying sector error.
        #[from]
        source: garden_core::SectorError,
    },

    /// The episode runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: garden_core::runner::RunnerError,
    },

    /// The episode summary could not be serialized.
    #[error("summary serialization error: {source}")]
    Summary {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Initial planting failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}
