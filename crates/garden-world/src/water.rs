//! Water mechanics: reset, irrigation, competitive distribution, drainage.
//!
//! # Irrigation
//!
//! [`irrigate`] converts a real-valued garden location to the nearest grid
//! index (`location / step`, ties to even) and adds the same amount to every
//! cell of a square window of half-width `irr_threshold` around it, clipped
//! to the grid. There is no distance falloff.
//!
//! # Distribution
//!
//! [`distribute_water`] visits cells in row-major order. For a cell with a
//! non-empty `nearby` set, candidates start as the set in ascending id order.
//! While the cell still holds water and candidates remain, one candidate is
//! drawn uniformly at random and removed. A candidate with at least one
//! sunlight point takes `min(cell water, demand / grid points)`; a candidate
//! without sunlight takes nothing. Each plant is visited at most once per
//! cell per timestep, so this is not a proportional split.
//!
//! Every cell then drains by `drainage_rate`, floored at zero, whether or not
//! any plant drew from it.

use garden_types::PlantId;
use rand::Rng;

use crate::grid::Grid;
use crate::numeric;
use crate::plant::Plant;
use crate::registry::PlantRegistry;

/// Totals from one distribution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterReport {
    /// Water moved from cells into plants.
    pub absorbed: f64,
    /// Water removed by drainage.
    pub drained: f64,
}

/// Set every cell's water to `water_amt`, discarding any residual.
pub fn reset_water(grid: &mut Grid, water_amt: f64) {
    for cell in grid.cells_mut() {
        cell.set_water(water_amt);
    }
}

/// Pseudo-location for the `index`-th entry of an irrigation list.
///
/// Yields `(index / rows, index % cols)` with integer division. This is not a
/// sector mapping; irrigation lists are interpreted this way on purpose.
pub fn flat_index_location(index: usize, rows: usize, cols: usize) -> (f64, f64) {
    let x = index.checked_div(rows).unwrap_or(0);
    let y = index.checked_rem(cols).unwrap_or(0);
    (numeric::index_to_f64(x), numeric::index_to_f64(y))
}

/// Inclusive-exclusive index range `[center - t, center + t + 1)` clipped to
/// `[0, len)`.
fn window(center: i64, threshold: usize, len: usize) -> core::ops::Range<usize> {
    let t = i64::try_from(threshold).unwrap_or(i64::MAX);
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let low = center.saturating_sub(t).max(0);
    let high = center.saturating_add(t).saturating_add(1).min(len_i);
    if high <= low {
        return 0..0;
    }
    let low = usize::try_from(low).unwrap_or(0);
    let high = usize::try_from(high).unwrap_or(0);
    low..high
}

/// Add `amount` to every cell within `irr_threshold` cells of the grid point
/// closest to `(x, y)`.
///
/// Returns the number of cells watered.
pub fn irrigate(
    grid: &mut Grid,
    step: f64,
    irr_threshold: usize,
    (x, y): (f64, f64),
    amount: f64,
) -> usize {
    let closest_x = numeric::saturating_i64(numeric::round_half_even(x / step));
    let closest_y = numeric::saturating_i64(numeric::round_half_even(y / step));
    let rows = window(closest_x, irr_threshold, grid.rows());
    let cols = window(closest_y, irr_threshold, grid.cols());

    let mut watered: usize = 0;
    for row in rows {
        for col in cols.clone() {
            if let Some(cell) = grid.get_mut(garden_types::GridPos::new(row, col)) {
                cell.set_water(f64::from(cell.water()) + amount);
                watered = watered.saturating_add(1);
            }
        }
    }
    watered
}

/// Water one plant may draw from a cell holding `available`.
///
/// Plants without sunlight draw nothing. A plant covering zero grid points,
/// or asking for a non-positive or non-finite amount, is treated as having
/// zero demand.
fn draw_amount<P: Plant>(plant: &P, available: f64) -> f64 {
    let state = plant.state();
    if state.num_sunlight_points == 0 || state.num_grid_points == 0 {
        return 0.0;
    }
    let desired = plant.desired_water_amt();
    if !desired.is_finite() || desired <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let per_point = desired / state.num_grid_points as f64;
    available.min(per_point)
}

/// Hand out each cell's water to the plants covering it, then drain.
///
/// Candidate order is driven by `rng`; the same seed and state always
/// produce the same allocation.
pub fn distribute_water<P: Plant, R: Rng + ?Sized>(
    grid: &mut Grid,
    registry: &mut PlantRegistry<P>,
    drainage_rate: f64,
    rng: &mut R,
) -> WaterReport {
    let mut report = WaterReport::default();

    for cell in grid.cells_mut() {
        if !cell.nearby().is_empty() {
            let mut candidates: Vec<PlantId> = cell.nearby().iter().copied().collect();

            while cell.water() > 0.0 && !candidates.is_empty() {
                let pick = rng.random_range(0..candidates.len());
                let id = candidates.remove(pick);
                let Some(plant) = registry.get_mut(id) else {
                    continue;
                };

                let available = f64::from(cell.water());
                let absorbed = draw_amount(plant, available);
                if plant.state().num_sunlight_points > 0 {
                    plant.state_mut().water_amt += absorbed;
                    cell.set_water(available - absorbed);
                    report.absorbed += absorbed;
                }
            }
        }

        let before = f64::from(cell.water());
        let after = (before - drainage_rate).max(0.0);
        cell.set_water(after);
        report.drained += before - after;
    }

    report
}
