//! Coverage update: which cells a plant's footprint reaches.
//!
//! Rescanning the whole disc of every plant every timestep costs
//! `O(radius^2)` per plant. Instead, [`update_plant_coverage`] only examines
//! the outer band of the plant's bounding square, of half-width
//! `rad_step = floor_div(radius, step)` around the origin:
//!
//! - for every column of the box, rows `start`, `start + 1`, `end - 1`,
//!   `end`;
//! - for every row of the box, columns `start`, `start + 1`, `end - 1`,
//!   `end`.
//!
//! A candidate inside the grid is covered when
//! `sqrt(step) * |candidate - origin| <= radius`. Newly covered cells gain
//! the plant's id and bump its `num_grid_points`.
//!
//! Interior cells are never revisited, which is correct as long as the
//! radius never skips a ring within a single timestep. When a plant can
//! jump several rings at once, callers may pass [`CoverageScan::FullBox`] to
//! rescan the whole bounding square instead.

use garden_types::{GridPos, PlantId};

use crate::grid::Grid;
use crate::numeric;
use crate::plant::Plant;

/// Which cells of the bounding square to examine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageScan {
    /// Only the two outermost rows and columns of the box.
    Perimeter,
    /// Every cell of the box.
    FullBox,
}

/// Inclusive `[start, end]` bounds of the plant's bounding square,
/// clipped to the grid.
fn bounding_box(origin: GridPos, rad_step: i64, rows: usize, cols: usize) -> (i64, i64, i64, i64) {
    let row = i64::try_from(origin.row).unwrap_or(i64::MAX);
    let col = i64::try_from(origin.col).unwrap_or(i64::MAX);
    let last_row = i64::try_from(rows).unwrap_or(i64::MAX).saturating_sub(1);
    let last_col = i64::try_from(cols).unwrap_or(i64::MAX).saturating_sub(1);
    (
        row.saturating_sub(rad_step).max(0),
        row.saturating_add(rad_step).min(last_row),
        col.saturating_sub(rad_step).max(0),
        col.saturating_add(rad_step).min(last_col),
    )
}

/// Candidate cells for a coverage update, in scan order.
///
/// Candidates that fall outside the grid are dropped; the band can extend
/// one cell past a small box. Duplicates are kept, since marking is
/// idempotent.
pub fn candidate_points(
    origin: GridPos,
    radius: f64,
    step: f64,
    rows: usize,
    cols: usize,
    scan: CoverageScan,
) -> Vec<GridPos> {
    let rad_step = numeric::saturating_i64(numeric::floor_div(radius, step)).max(0);
    let (start_row, end_row, start_col, end_col) = bounding_box(origin, rad_step, rows, cols);

    let mut raw: Vec<(i64, i64)> = Vec::new();
    match scan {
        CoverageScan::Perimeter => {
            for c in start_col..=end_col {
                raw.push((start_row, c));
                raw.push((start_row.saturating_add(1), c));
                raw.push((end_row.saturating_sub(1), c));
                raw.push((end_row, c));
            }
            for r in start_row..=end_row {
                raw.push((r, start_col));
                raw.push((r, start_col.saturating_add(1)));
                raw.push((r, end_col.saturating_sub(1)));
                raw.push((r, end_col));
            }
        }
        CoverageScan::FullBox => {
            for r in start_row..=end_row {
                for c in start_col..=end_col {
                    raw.push((r, c));
                }
            }
        }
    }

    raw.into_iter()
        .filter_map(|(r, c)| {
            let row = usize::try_from(r).ok()?;
            let col = usize::try_from(c).ok()?;
            (row < rows && col < cols).then_some(GridPos::new(row, col))
        })
        .collect()
}

/// Whether `point` lies within `radius` of `origin`.
///
/// Distance is `sqrt(step) * sqrt(dr^2 + dc^2)`.
pub fn within_radius(point: GridPos, origin: GridPos, radius: f64, step: f64) -> bool {
    let dr = numeric::index_to_f64(point.row) - numeric::index_to_f64(origin.row);
    let dc = numeric::index_to_f64(point.col) - numeric::index_to_f64(origin.col);
    let dist = step.sqrt() * dc.mul_add(dc, dr * dr).sqrt();
    dist <= radius
}

/// Extend the plant's coverage to any newly reached candidate cells.
///
/// Returns the number of cells newly covered.
pub fn update_plant_coverage<P: Plant>(
    grid: &mut Grid,
    id: PlantId,
    plant: &mut P,
    step: f64,
    scan: CoverageScan,
) -> u64 {
    let origin = plant.state().origin();
    let radius = plant.state().radius;
    let candidates = candidate_points(origin, radius, step, grid.rows(), grid.cols(), scan);

    let mut added: u64 = 0;
    for point in candidates {
        if !within_radius(point, origin, radius, step) {
            continue;
        }
        if let Some(cell) = grid.get_mut(point)
            && cell.claim(id)
        {
            added = added.saturating_add(1);
        }
    }

    let state = plant.state_mut();
    state.num_grid_points = state.num_grid_points.saturating_add(added);
    added
}
