//! The sector baseline policy.
//!
//! Given the current observation and one sector, the policy picks a single
//! discrete action:
//!
//! 1. After `prune_delay` timesteps, prune the first type (lowest index) that
//!    has a plant rooted in the sector and whose share of the total canopy
//!    exceeds `prune_threshold / T`.
//! 2. Otherwise, if the whole garden holds less than
//!    `rows * cols * step * water_threshold` water, count how many quarter
//!    increments of `max_water_level` bring the sector's water up to
//!    `max_water_level`, and irrigate that many (at most four).
//! 3. Otherwise, do nothing.

use garden_core::config::PolicyConfig;
use garden_core::{Observation, SectorLayout};
use garden_types::Action;
use garden_types::enums::MAX_IRRIGATION_INCREMENTS;
use ndarray::{Array1, Axis, s};

use crate::error::PolicyError;

/// Choose an action for `sector`.
///
/// `timestep` is the number of completed timesteps and `step` the garden's
/// grid step.
///
/// # Errors
///
/// Returns [`PolicyError::Sector`] for a sector outside `layout`, and
/// [`PolicyError::ShapeMismatch`] when the observation does not match the
/// layout's garden size or the canopy-cover length.
pub fn baseline_policy(
    timestep: u64,
    observation: &Observation,
    layout: &SectorLayout,
    sector: usize,
    step: f64,
    config: &PolicyConfig,
) -> Result<Action, PolicyError> {
    let bounds = layout.bounds(sector)?;

    let type_count = observation.canopy_cover.len();
    let expected = (
        layout.garden_rows(),
        layout.garden_cols(),
        type_count.saturating_add(1),
    );
    let found = observation.raw.dim();
    if found != expected {
        return Err(PolicyError::ShapeMismatch { expected, found });
    }

    let seeds = observation.type_channels();
    let water = observation.water_channel();

    if timestep > config.prune_delay {
        let shares = canopy_shares(&observation.canopy_cover);
        #[allow(clippy::cast_precision_loss)]
        let share_limit = config.prune_threshold / type_count as f64;
        let sector_seeds = seeds.slice(s![bounds.x_low..bounds.x_high, bounds.y_low..bounds.y_high, ..]);
        for (index, (channel, share)) in sector_seeds
            .axis_iter(Axis(2))
            .zip(shares.iter())
            .enumerate()
        {
            let planted = channel.iter().any(|v| *v != 0.0);
            if planted && *share > share_limit {
                let plant_type =
                    u32::try_from(index).map_err(|source| PolicyError::TypeIndex { index, source })?;
                return Ok(Action::Prune { plant_type });
            }
        }
    }

    let cells = layout.garden_rows().saturating_mul(layout.garden_cols());
    #[allow(clippy::cast_precision_loss)]
    let water_limit = cells as f64 * step * config.water_threshold;
    if water.sum() < water_limit {
        let sector_water = water
            .slice(s![bounds.x_low..bounds.x_high, bounds.y_low..bounds.y_high])
            .sum();
        return Ok(Action::irrigate(irrigation_increments(
            sector_water,
            config.max_water_level,
        )));
    }

    Ok(Action::NoOp)
}

/// Each type's share of the summed canopy cover.
///
/// A zero or non-finite total gives all-zero shares.
fn canopy_shares(canopy_cover: &Array1<f64>) -> Array1<f64> {
    let total = canopy_cover.sum();
    if !total.is_finite() || total <= 0.0 {
        return Array1::zeros(canopy_cover.len());
    }
    canopy_cover / total
}

/// Quarter increments of `max_level` added, one at a time, until
/// `sector_water` reaches `max_level`. Never more than four.
fn irrigation_increments(mut sector_water: f64, max_level: f64) -> u32 {
    let increment = max_level / 4.0;
    let mut count: u32 = 0;
    while sector_water < max_level && count < MAX_IRRIGATION_INCREMENTS {
        count = count.saturating_add(1);
        sector_water += increment;
    }
    count
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use ndarray::Array3;

    use super::*;

    fn layout() -> SectorLayout {
        SectorLayout::new(10, 10, 5, 5).unwrap()
    }

    fn observation(canopy: &[f64], water: f64) -> Observation {
        let types = canopy.len();
        let mut raw = Array3::zeros((10, 10, types.saturating_add(1)));
        raw.index_axis_mut(Axis(2), types).fill(water);
        Observation {
            canopy_cover: Array1::from(canopy.to_vec()),
            raw,
        }
    }

    fn config() -> PolicyConfig {
        PolicyConfig {
            water_threshold: 1.0,
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn early_low_water_returns_irrigation_count() {
        let obs = observation(&[0.2, 0.1], 0.0);
        let action = baseline_policy(3, &obs, &layout(), 0, 1.0, &config()).unwrap();
        assert_eq!(action, Action::Irrigate(4));
    }

    #[test]
    fn partially_watered_sector_needs_fewer_increments() {
        // Sector 0 holds 25 cells of water 0.005 = 0.125: two quarters of 0.207 reach it.
        let obs = observation(&[0.0, 0.0], 0.005);
        let action = baseline_policy(0, &obs, &layout(), 0, 1.0, &config()).unwrap();
        assert_eq!(action, Action::Irrigate(2));
    }

    #[test]
    fn full_sector_under_low_total_is_no_op() {
        let obs = observation(&[0.0], 0.5);
        let action = baseline_policy(0, &obs, &layout(), 1, 1.0, &config()).unwrap();
        assert_eq!(action, Action::NoOp);
    }

    #[test]
    fn plenty_of_water_is_no_op() {
        let obs = observation(&[0.1, 0.1], 2.0);
        let action = baseline_policy(50, &obs, &layout(), 2, 1.0, &config()).unwrap();
        assert_eq!(action, Action::NoOp);
    }

    #[test]
    fn dominant_type_in_sector_is_pruned_after_delay() {
        let mut obs = observation(&[0.9, 0.1], 2.0);
        obs.raw[[1, 1, 0]] = 1.5;
        obs.raw[[2, 2, 1]] = 0.5;

        // 0.9 share > 2.0 / 2 is false: the default threshold never prunes two types.
        let relaxed = PolicyConfig {
            prune_threshold: 1.0,
            ..config()
        };
        let action = baseline_policy(21, &obs, &layout(), 0, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::Prune { plant_type: 0 });
        assert_eq!(action.code().unwrap(), 5);

        let action = baseline_policy(21, &obs, &layout(), 0, 1.0, &config()).unwrap();
        assert_eq!(action, Action::NoOp);
    }

    #[test]
    fn no_prune_before_delay() {
        let mut obs = observation(&[1.0, 0.0], 0.0);
        obs.raw[[0, 0, 0]] = 1.0;
        let relaxed = PolicyConfig {
            prune_threshold: 0.5,
            ..config()
        };
        let action = baseline_policy(20, &obs, &layout(), 0, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::Irrigate(4));
        let action = baseline_policy(21, &obs, &layout(), 0, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::Prune { plant_type: 0 });
    }

    #[test]
    fn prune_requires_a_plant_in_the_sector() {
        let mut obs = observation(&[1.0, 0.0], 2.0);
        // Plant rooted in sector 3, policy looks at sector 0.
        obs.raw[[7, 7, 0]] = 1.0;
        let relaxed = PolicyConfig {
            prune_threshold: 0.5,
            ..config()
        };
        let action = baseline_policy(30, &obs, &layout(), 0, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::NoOp);
        let action = baseline_policy(30, &obs, &layout(), 3, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::Prune { plant_type: 0 });
    }

    #[test]
    fn lowest_type_index_is_pruned_first() {
        let mut obs = observation(&[0.5, 0.5, 0.0], 2.0);
        obs.raw[[0, 0, 0]] = 1.0;
        obs.raw[[1, 0, 1]] = 1.0;
        let relaxed = PolicyConfig {
            prune_threshold: 1.0,
            ..config()
        };
        let action = baseline_policy(30, &obs, &layout(), 0, 1.0, &relaxed).unwrap();
        assert_eq!(action, Action::Prune { plant_type: 0 });
    }

    #[test]
    fn zero_canopy_never_prunes() {
        let mut obs = observation(&[0.0, 0.0], 2.0);
        obs.raw[[0, 0, 0]] = 1.0;
        let action = baseline_policy(30, &obs, &layout(), 0, 1.0, &config()).unwrap();
        assert_eq!(action, Action::NoOp);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let obs = observation(&[0.1, 0.1], 0.0);
        let small = SectorLayout::new(8, 8, 4, 4).unwrap();
        let result = baseline_policy(0, &obs, &small, 0, 1.0, &config());
        assert!(matches!(result, Err(PolicyError::ShapeMismatch { .. })));
    }

    #[test]
    fn sector_out_of_range_is_an_error() {
        let obs = observation(&[0.1], 0.0);
        let result = baseline_policy(0, &obs, &layout(), 4, 1.0, &config());
        assert!(matches!(result, Err(PolicyError::Sector { .. })));
    }

    #[test]
    fn increments_are_capped() {
        assert_eq!(irrigation_increments(0.0, 0.207), 4);
        assert_eq!(irrigation_increments(0.207, 0.207), 0);
        assert_eq!(irrigation_increments(0.2, 0.207), 1);
        assert_eq!(irrigation_increments(-5.0, 0.207), 4);
    }
}
