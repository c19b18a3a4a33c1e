//! [`ActionSource`] adapter around the baseline policy.
//!
//! Each timestep the source picks one sector uniformly at random from its
//! own seeded RNG and asks [`baseline_policy`] what to do there.

use garden_core::config::PolicyConfig;
use garden_core::decision::{ActionSource, DecisionError, SectorAction};
use garden_core::{Observation, SectorLayout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::baseline::baseline_policy;
use crate::error::PolicyError;

/// Drives a garden with the sector baseline policy.
#[derive(Debug, Clone)]
pub struct BaselineSource<R = StdRng> {
    config: PolicyConfig,
    step: f64,
    rng: R,
}

impl BaselineSource<StdRng> {
    /// A source whose sector choice is seeded from `config.seed`.
    pub fn seeded(config: PolicyConfig, step: f64) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::new(config, step, rng)
    }
}

impl<R: Rng> BaselineSource<R> {
    /// A source for a garden with grid step `step`.
    pub const fn new(config: PolicyConfig, step: f64, rng: R) -> Self {
        Self { config, step, rng }
    }

    /// The policy constants in use.
    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }
}

impl<R: Rng> ActionSource for BaselineSource<R> {
    fn choose_action(
        &mut self,
        timestep: u64,
        observation: &Observation,
        layout: &SectorLayout,
    ) -> Result<SectorAction, DecisionError> {
        let sector = self.rng.random_range(0..layout.count());
        let action = baseline_policy(timestep, observation, layout, sector, self.step, &self.config)
            .map_err(|err| match err {
                PolicyError::Sector { source } => DecisionError::Sector { source },
                other => DecisionError::Internal {
                    message: other.to_string(),
                },
            })?;
        debug!(timestep, sector, ?action, "Baseline policy decided");
        Ok(SectorAction { sector, action })
    }
}
