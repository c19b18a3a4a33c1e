//! Plant growth and the per-type growth canvas.
//!
//! [`grow_plant`] applies one timestep of growth and reports whether the
//! plant's radius crossed the next grid-step boundary ("ring"). A crossing
//! means the plant's footprint may now reach a new band of cells.
//!
//! For a plant of radius `r` and grid step `s`:
//!
//! ```text
//! next_step      = floor_div(r, s) + 1
//! next_line_dist = next_step * s
//! crossed        = r_before < next_line_dist <= r_after
//! ```

use garden_types::GridPos;
use ndarray::Array3;

use crate::numeric;
use crate::plant::Plant;

/// N x M x T record of plant radii, written only at each plant's origin.
///
/// `(row, col, t)` is nonzero only if the plant rooted at `(row, col)` has
/// type slot `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCanvas {
    canvas: Array3<f64>,
}

impl GrowthCanvas {
    /// An all-zero canvas.
    pub fn new(rows: usize, cols: usize, type_count: usize) -> Self {
        Self {
            canvas: Array3::zeros((rows, cols, type_count)),
        }
    }

    /// Record `radius` at `origin` in channel `slot`.
    ///
    /// Returns `false` if the index is outside the canvas.
    pub fn record(&mut self, origin: GridPos, slot: usize, radius: f64) -> bool {
        match self.canvas.get_mut((origin.row, origin.col, slot)) {
            Some(value) => {
                *value = radius;
                true
            }
            None => false,
        }
    }

    /// Read a canvas value.
    pub fn get(&self, origin: GridPos, slot: usize) -> Option<f64> {
        self.canvas.get((origin.row, origin.col, slot)).copied()
    }

    /// The underlying array.
    pub const fn as_array(&self) -> &Array3<f64> {
        &self.canvas
    }
}

/// What happened to one plant during one growth update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthReport {
    /// Water the plant had accumulated before its reset.
    pub water_absorbed: f64,
    /// Height after growth.
    pub height: f64,
    /// Radius after growth.
    pub radius: f64,
    /// `Some(next_step)` if the radius crossed `next_step * step`.
    pub crossed: Option<u64>,
    /// Number of grid-step boundaries the radius moved across.
    pub rings_crossed: u64,
}

/// Grow `plant` by one timestep.
///
/// Adds [`Plant::amount_to_grow`] to height and radius, records the new
/// radius in `canvas` at the plant's origin when a `(canvas, slot)` pair is
/// given, then calls [`Plant::reset`].
pub fn grow_plant<P: Plant>(
    plant: &mut P,
    step: f64,
    canvas: Option<(&mut GrowthCanvas, usize)>,
) -> GrowthReport {
    let prev_radius = plant.state().radius;
    let next_step = numeric::floor_div(prev_radius, step) + 1.0;
    let next_line_dist = next_step * step;

    let (upward, outward) = plant.amount_to_grow();
    let state = plant.state_mut();
    state.height += upward;
    state.radius += outward;
    let (height, radius, water_absorbed, origin) =
        (state.height, state.radius, state.water_amt, state.origin());

    if let Some((canvas, slot)) = canvas {
        canvas.record(origin, slot, radius);
    }

    plant.reset();

    let crossed = (prev_radius < next_line_dist && radius >= next_line_dist)
        .then(|| numeric::saturating_u64(next_step));
    let rings_crossed = numeric::saturating_u64(
        numeric::floor_div(radius, step) - numeric::floor_div(prev_radius, step),
    );

    GrowthReport {
        water_absorbed,
        height,
        radius,
        crossed,
        rings_crossed,
    }
}
