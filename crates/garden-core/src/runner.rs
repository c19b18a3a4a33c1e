//! Episode runner: drives a garden with an action source.
//!
//! [`run_episode`] runs a fixed number of timesteps. The first timestep
//! resets every cell to the configured initial water level. Every later
//! timestep asks the [`ActionSource`] for a [`SectorAction`] and applies it:
//!
//! - [`Action::Irrigate`] adds `increments * irrigation_per_increment` water
//!   around the centre of the chosen sector, on top of the residual water;
//! - [`Action::Prune`] is counted and logged; the engine has no pruning
//!   model, so the timestep runs without irrigation;
//! - [`Action::NoOp`] runs the timestep without irrigation.

use garden_types::{Action, IrrigationEvent};
use garden_world::{Plant, numeric};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::decision::{ActionSource, DecisionError, SectorAction};
use crate::garden::Garden;
use crate::sector::{SectorError, SectorLayout};

/// Errors that can occur during an episode.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The action source failed.
    #[error("decision error: {source}")]
    Decision {
        /// The underlying decision error.
        #[from]
        source: DecisionError,
    },

    /// The chosen sector could not be located.
    #[error("sector error: {source}")]
    Sector {
        /// The underlying sector error.
        #[from]
        source: SectorError,
    },
}

/// What happened in one timestep of an episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestepSummary {
    /// Number of completed timesteps, including this one.
    pub timestep: u64,
    /// Sector the action targeted, if an action was taken.
    pub sector: Option<usize>,
    /// The action applied, if any.
    pub action: Option<Action>,
    /// Water added by irrigation this timestep.
    pub water_applied: f64,
    /// Water absorbed by plants.
    pub water_absorbed: f64,
    /// Water lost to drainage.
    pub water_drained: f64,
    /// Water left in the grid after drainage.
    pub total_water: f64,
    /// Sunlight points handed out.
    pub sunlight_points: usize,
    /// Plants whose radius crossed a grid-step boundary.
    pub plants_crossed: usize,
    /// Cells newly added to plant coverage.
    pub cells_covered: u64,
}

/// Result of an episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeResult {
    /// Number of timesteps executed.
    pub total_timesteps: u64,
    /// Timesteps whose action irrigated.
    pub irrigations: u64,
    /// Timesteps whose action pruned.
    pub prunes: u64,
    /// Timesteps with no action or a no-op action.
    pub no_ops: u64,
    /// Water added by irrigation over the whole episode, including the
    /// initial reset.
    pub total_water_applied: f64,
    /// The last timestep summary, if any timestep ran.
    pub final_summary: Option<TimestepSummary>,
}

/// Callback invoked after each timestep completes.
pub trait TimestepCallback<P, R> {
    /// Called after a timestep completes.
    fn on_timestep(&mut self, summary: &TimestepSummary, garden: &Garden<P, R>);
}

/// A no-op timestep callback.
pub struct NoOpCallback;

impl<P, R> TimestepCallback<P, R> for NoOpCallback {
    fn on_timestep(&mut self, _summary: &TimestepSummary, _garden: &Garden<P, R>) {}
}

/// Run `run.timesteps` timesteps.
///
/// # Errors
///
/// Returns [`RunnerError`] if the action source fails or picks a sector
/// outside `layout`.
pub fn run_episode<P: Plant, R: Rng>(
    garden: &mut Garden<P, R>,
    source: &mut dyn ActionSource,
    layout: &SectorLayout,
    run: &RunConfig,
    callback: &mut dyn TimestepCallback<P, R>,
) -> Result<EpisodeResult, RunnerError> {
    let mut result = EpisodeResult {
        total_timesteps: 0,
        irrigations: 0,
        prunes: 0,
        no_ops: 0,
        total_water_applied: 0.0,
        final_summary: None,
    };

    info!(
        timesteps = run.timesteps,
        initial_water = run.initial_water,
        sectors = layout.count(),
        "Episode starting"
    );

    for index in 0..run.timesteps {
        let (chosen, water_applied) = if index == 0 {
            garden.perform_timestep(run.initial_water, None);
            let cells = numeric::index_to_f64(garden.rows().saturating_mul(garden.cols()));
            (None, run.initial_water * cells)
        } else {
            let observation = garden.observation();
            let chosen = source.choose_action(garden.timestep(), &observation, layout)?;
            let applied = apply_action(garden, layout, run, chosen)?;
            (Some(chosen), applied)
        };

        match chosen.map(|c| c.action) {
            Some(Action::Irrigate(_)) => result.irrigations = result.irrigations.saturating_add(1),
            Some(Action::Prune { .. }) => result.prunes = result.prunes.saturating_add(1),
            Some(Action::NoOp) | None => result.no_ops = result.no_ops.saturating_add(1),
        }
        result.total_water_applied += water_applied;
        result.total_timesteps = result.total_timesteps.saturating_add(1);

        let summary = summarize(garden, chosen, water_applied);
        info!(
            timestep = summary.timestep,
            action = ?summary.action,
            sector = ?summary.sector,
            total_water = summary.total_water,
            "Timestep complete"
        );
        callback.on_timestep(&summary, garden);
        result.final_summary = Some(summary);
    }

    Ok(result)
}

/// Run one policy-driven timestep. Returns the water added.
fn apply_action<P: Plant, R: Rng>(
    garden: &mut Garden<P, R>,
    layout: &SectorLayout,
    run: &RunConfig,
    chosen: SectorAction,
) -> Result<f64, RunnerError> {
    let bounds = layout.bounds(chosen.sector)?;
    match chosen.action {
        Action::Irrigate(increments) => {
            let center = bounds.center();
            let step = garden.step();
            let amount = f64::from(increments) * run.irrigation_per_increment;
            let event = IrrigationEvent::new(
                numeric::index_to_f64(center.row) * step,
                numeric::index_to_f64(center.col) * step,
                amount,
            );
            debug!(sector = chosen.sector, %center, increments, amount, "Irrigating sector");
            garden.perform_timestep_with_events(&[event]);
            let cells = garden.last_report().map_or(0, |r| r.cells_irrigated);
            Ok(amount * numeric::index_to_f64(cells))
        }
        Action::Prune { plant_type } => {
            debug!(sector = chosen.sector, plant_type, "Prune requested; no pruning model, skipping");
            garden.perform_timestep_with_events(&[]);
            Ok(0.0)
        }
        Action::NoOp => {
            garden.perform_timestep_with_events(&[]);
            Ok(0.0)
        }
    }
}

fn summarize<P: Plant, R: Rng>(
    garden: &Garden<P, R>,
    chosen: Option<SectorAction>,
    water_applied: f64,
) -> TimestepSummary {
    let report = garden.last_report().copied().unwrap_or_default();
    TimestepSummary {
        timestep: garden.timestep(),
        sector: chosen.map(|c| c.sector),
        action: chosen.map(|c| c.action),
        water_applied,
        water_absorbed: report.water.absorbed,
        water_drained: report.water.drained,
        total_water: garden.grid().total_water(),
        sunlight_points: report.sunlight_points,
        plants_crossed: report.plants_crossed,
        cells_covered: report.cells_covered,
    }
}

/// Log the end of an episode.
pub fn log_episode_end(result: &EpisodeResult) {
    info!(
        total_timesteps = result.total_timesteps,
        irrigations = result.irrigations,
        prunes = result.prunes,
        no_ops = result.no_ops,
        total_water_applied = result.total_water_applied,
        "Episode ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            timestep = summary.timestep,
            total_water = summary.total_water,
            sunlight_points = summary.sunlight_points,
            "Final timestep summary"
        );
    } else {
        warn!("Episode ended with no timesteps executed");
    }
}
