//! The plant handle contract consumed by the garden engine.
//!
//! The engine does not model plant biology. It reads and writes the fields
//! of [`PlantState`] and calls four operations on every plant:
//!
//! - [`Plant::desired_water_amt`] -- water wanted this timestep;
//! - [`Plant::amount_to_grow`] -- `(upward, outward)` growth for this
//!   timestep, given the water and sunlight accumulated so far;
//! - [`Plant::add_sunlight_point`] -- one unit of light from one cell;
//! - [`Plant::reset`] -- clear the per-timestep accumulators.
//!
//! [`ReferencePlant`] is a small stand-in model satisfying the contract, used
//! by the engine binary and by tests. Real growth curves live outside this
//! workspace.

use garden_types::{GridPos, PlantId};
use serde::Deserialize;

/// Identity, position, and growth quantities of one plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantState {
    /// Id assigned at registration. `None` until registered, and always
    /// `None` for a garden's control plant.
    pub id: Option<PlantId>,
    /// Row of the plant's origin cell.
    pub row: usize,
    /// Column of the plant's origin cell.
    pub col: usize,
    /// Type name; must appear in the garden's supported type list.
    pub plant_type: String,
    /// Current height.
    pub height: f64,
    /// Current radius.
    pub radius: f64,
    /// Water accumulated this timestep.
    pub water_amt: f64,
    /// Sunlight points accumulated this timestep.
    pub num_sunlight_points: u64,
    /// Number of grid cells the plant covers.
    pub num_grid_points: u64,
}

impl PlantState {
    /// A seedling at `(row, col)` covering only its origin cell.
    pub fn new(row: usize, col: usize, plant_type: impl Into<String>) -> Self {
        Self {
            id: None,
            row,
            col,
            plant_type: plant_type.into(),
            height: 0.0,
            radius: 0.0,
            water_amt: 0.0,
            num_sunlight_points: 0,
            num_grid_points: 1,
        }
    }

    /// The plant's origin cell.
    pub const fn origin(&self) -> GridPos {
        GridPos::new(self.row, self.col)
    }
}

/// Operations the engine calls on a plant every timestep.
pub trait Plant {
    /// Shared view of the plant's state.
    fn state(&self) -> &PlantState;

    /// Mutable view of the plant's state.
    fn state_mut(&mut self) -> &mut PlantState;

    /// Water the plant wants this timestep.
    fn desired_water_amt(&self) -> f64;

    /// `(upward, outward)` growth for this timestep.
    fn amount_to_grow(&mut self) -> (f64, f64);

    /// Receive one sunlight point.
    fn add_sunlight_point(&mut self) {
        let state = self.state_mut();
        state.num_sunlight_points = state.num_sunlight_points.saturating_add(1);
    }

    /// Clear the per-timestep water and sunlight accumulators.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// ReferencePlant
// ---------------------------------------------------------------------------

/// Growth parameters of a [`ReferencePlant`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferencePlantParams {
    /// Water demanded per covered grid cell per timestep.
    #[serde(default = "default_water_per_grid_point")]
    pub water_per_grid_point: f64,

    /// Height growth per timestep under full water and light.
    #[serde(default = "default_height_rate")]
    pub height_rate: f64,

    /// Radius growth per timestep under full water and light.
    #[serde(default = "default_radius_rate")]
    pub radius_rate: f64,

    /// Height at which upward growth stops.
    #[serde(default = "default_max_height")]
    pub max_height: f64,

    /// Radius at which outward growth stops.
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,
}

impl Default for ReferencePlantParams {
    fn default() -> Self {
        Self {
            water_per_grid_point: default_water_per_grid_point(),
            height_rate: default_height_rate(),
            radius_rate: default_radius_rate(),
            max_height: default_max_height(),
            max_radius: default_max_radius(),
        }
    }
}

const fn default_water_per_grid_point() -> f64 {
    0.1
}

const fn default_height_rate() -> f64 {
    0.5
}

const fn default_radius_rate() -> f64 {
    0.25
}

const fn default_max_height() -> f64 {
    20.0
}

const fn default_max_radius() -> f64 {
    10.0
}

/// A plant whose growth is limited by the scarcer of water and light.
///
/// Demand is proportional to the covered area. Each timestep the plant
/// grows by its full rates scaled by
/// `min(water_amt / demand, sunlight_points / grid_points)`, clamped to
/// `[0, 1]` and to the remaining headroom below the maximum height and
/// radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePlant {
    state: PlantState,
    params: ReferencePlantParams,
}

impl ReferencePlant {
    /// Create a seedling with the given growth parameters.
    pub fn new(
        row: usize,
        col: usize,
        plant_type: impl Into<String>,
        params: ReferencePlantParams,
    ) -> Self {
        Self {
            state: PlantState::new(row, col, plant_type),
            params,
        }
    }

    /// The plant's growth parameters.
    pub const fn params(&self) -> &ReferencePlantParams {
        &self.params
    }

    /// Fraction of full growth this timestep, in `[0, 1]`.
    fn growth_factor(&self) -> f64 {
        let demand = self.desired_water_amt();
        if demand <= 0.0 || self.state.num_grid_points == 0 {
            return 0.0;
        }
        let water = (self.state.water_amt / demand).clamp(0.0, 1.0);
        #[allow(clippy::cast_precision_loss)]
        let light = (self.state.num_sunlight_points as f64
            / self.state.num_grid_points as f64)
            .clamp(0.0, 1.0);
        water.min(light)
    }
}

impl Plant for ReferencePlant {
    fn state(&self) -> &PlantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PlantState {
        &mut self.state
    }

    fn desired_water_amt(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let area = self.state.num_grid_points as f64;
        self.params.water_per_grid_point * area
    }

    fn amount_to_grow(&mut self) -> (f64, f64) {
        let factor = self.growth_factor();
        let upward = (self.params.height_rate * factor)
            .min(self.params.max_height - self.state.height)
            .max(0.0);
        let outward = (self.params.radius_rate * factor)
            .min(self.params.max_radius - self.state.radius)
            .max(0.0);
        (upward, outward)
    }

    fn reset(&mut self) {
        self.state.water_amt = 0.0;
        self.state.num_sunlight_points = 0;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn seedling() -> ReferencePlant {
        ReferencePlant::new(2, 3, "basil", ReferencePlantParams::default())
    }

    #[test]
    fn seedling_covers_its_origin() {
        let plant = seedling();
        assert_eq!(plant.state().origin(), GridPos::new(2, 3));
        assert_eq!(plant.state().num_grid_points, 1);
        assert_eq!(plant.state().id, None);
    }

    #[test]
    fn demand_scales_with_area() {
        let mut plant = seedling();
        assert_eq!(plant.desired_water_amt(), 0.1);
        plant.state_mut().num_grid_points = 5;
        assert_eq!(plant.desired_water_amt(), 0.5);
    }

    #[test]
    fn no_light_means_no_growth() {
        let mut plant = seedling();
        plant.state_mut().water_amt = 1.0;
        assert_eq!(plant.amount_to_grow(), (0.0, 0.0));
    }

    #[test]
    fn full_resources_grow_at_full_rate() {
        let mut plant = seedling();
        plant.state_mut().water_amt = 0.1;
        plant.add_sunlight_point();
        assert_eq!(plant.amount_to_grow(), (0.5, 0.25));
    }

    #[test]
    fn half_water_halves_growth() {
        let mut plant = seedling();
        plant.state_mut().water_amt = 0.05;
        plant.add_sunlight_point();
        assert_eq!(plant.amount_to_grow(), (0.25, 0.125));
    }

    #[test]
    fn growth_stops_at_maximum() {
        let mut plant = seedling();
        plant.state_mut().water_amt = 0.1;
        plant.state_mut().radius = 9.9;
        plant.state_mut().height = 20.0;
        plant.add_sunlight_point();
        let (upward, outward) = plant.amount_to_grow();
        assert_eq!(upward, 0.0);
        assert!((outward - 0.1).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_accumulators_only() {
        let mut plant = seedling();
        plant.state_mut().water_amt = 3.0;
        plant.state_mut().radius = 1.5;
        plant.add_sunlight_point();
        plant.reset();
        assert_eq!(plant.state().water_amt, 0.0);
        assert_eq!(plant.state().num_sunlight_points, 0);
        assert_eq!(plant.state().radius, 1.5);
    }
}
