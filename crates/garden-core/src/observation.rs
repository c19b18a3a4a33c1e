//! Observations of garden state consumed by control policies.
//!
//! The raw observation is an `N x M x (T + 1)` tensor: the per-type growth
//! canvas in configured type order, followed by the water layer. Building it
//! never mutates the garden, so repeated calls without an intervening
//! timestep return identical tensors.

use garden_types::GridPos;
use garden_world::light;
use garden_world::{Cell, Plant, numeric};
use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, Axis, s};
use rand::Rng;

use crate::garden::Garden;

/// What a policy sees at one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Per-type share of grid cells where that type gets the light.
    pub canopy_cover: Array1<f64>,
    /// `N x M x (T + 1)` canvas-and-water tensor.
    pub raw: Array3<f64>,
}

impl Observation {
    /// Number of plant types (T).
    pub fn type_count(&self) -> usize {
        self.raw.len_of(Axis(2)).saturating_sub(1)
    }

    /// The growth-canvas channels.
    pub fn type_channels(&self) -> ArrayView3<'_, f64> {
        let t = self.type_count();
        self.raw.slice(s![.., .., ..t])
    }

    /// The water channel.
    pub fn water_channel(&self) -> ArrayView2<'_, f64> {
        let t = self.type_count();
        self.raw.index_axis(Axis(2), t)
    }
}

impl<P: Plant, R: Rng> Garden<P, R> {
    /// The `N x M x (T + 1)` observation tensor.
    pub fn get_state(&self) -> Array3<f64> {
        let canvas = self.canvas().as_array();
        let t = canvas.len_of(Axis(2));
        let mut state = Array3::zeros((self.rows(), self.cols(), t.saturating_add(1)));
        state.slice_mut(s![.., .., ..t]).assign(canvas);
        state.index_axis_mut(Axis(2), t).assign(&self.water_layer());
        state
    }

    /// Cell water levels as an `N x M` array.
    pub fn water_layer(&self) -> Array2<f64> {
        self.grid().water_layer()
    }

    /// Water summed over `block x block` tiles, in row-major tile order.
    ///
    /// Each entry pairs the tile's nominal midpoint `(i + block / 2,
    /// j + block / 2)` with its total water. Tiles at the far edges are
    /// clipped to the grid. A zero block size yields no tiles.
    pub fn get_water_amounts(&self, block: usize) -> Vec<(GridPos, f64)> {
        if block == 0 {
            return Vec::new();
        }
        let layer = self.water_layer();
        let half = block / 2;
        let mut amounts = Vec::new();
        for i in (0..self.rows()).step_by(block) {
            for j in (0..self.cols()).step_by(block) {
                let i_end = i.saturating_add(block).min(self.rows());
                let j_end = j.saturating_add(block).min(self.cols());
                let total = layer.slice(s![i..i_end, j..j_end]).sum();
                let midpoint = GridPos::new(i.saturating_add(half), j.saturating_add(half));
                amounts.push((midpoint, total));
            }
        }
        amounts
    }

    /// Per-type share of the grid that the type currently shades.
    ///
    /// A cell counts for the type of its tallest covering plant (the same
    /// plant that wins its sunlight); counts are divided by `N x M`.
    pub fn canopy_cover(&self) -> Array1<f64> {
        let registry = self.registry();
        let mut counts: Array1<f64> = Array1::zeros(registry.type_count());
        for (_, cell) in self.grid().iter() {
            if let Some(id) = light::tallest_plant(cell.nearby(), registry)
                && let Some(slot) = registry.type_slot(id)
                && let Some(count) = counts.get_mut(slot)
            {
                *count += 1.0;
            }
        }
        let area = numeric::index_to_f64(self.rows().saturating_mul(self.cols()));
        counts / area
    }

    /// Canopy cover together with the raw observation tensor.
    pub fn observation(&self) -> Observation {
        Observation {
            canopy_cover: self.canopy_cover(),
            raw: self.get_state(),
        }
    }

    /// Every cell with its position, row-major.
    pub fn enumerate_grid(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.grid().iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use garden_types::PlantId;
    use garden_world::{ReferencePlant, ReferencePlantParams};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::GardenConfig;

    fn garden(rows: usize, cols: usize) -> Garden<ReferencePlant, SmallRng> {
        let config = GardenConfig {
            rows,
            cols,
            plant_types: vec!["basil".to_owned(), "thyme".to_owned()],
            ..GardenConfig::default()
        };
        let control = ReferencePlant::new(0, 0, "basil", ReferencePlantParams::default());
        Garden::new(&config, Vec::new(), control, SmallRng::seed_from_u64(5)).unwrap()
    }

    fn plant(row: usize, col: usize, kind: &str) -> ReferencePlant {
        ReferencePlant::new(row, col, kind, ReferencePlantParams::default())
    }

    #[test]
    fn state_stacks_canvas_and_water() {
        let mut g = garden(4, 5);
        g.add_plant(plant(1, 2, "thyme")).unwrap();
        g.perform_timestep(6.0, None);

        let state = g.get_state();
        assert_eq!(state.dim(), (4, 5, 3));
        let radius = g.plant(PlantId(0)).unwrap().state().radius;
        assert_eq!(state[[1, 2, 1]], radius);
        assert_eq!(state[[1, 2, 0]], 0.0);
        assert_eq!(state[[3, 4, 2]], 4.0);
    }

    #[test]
    fn get_state_is_idempotent() {
        let mut g = garden(4, 4);
        g.add_plant(plant(2, 2, "basil")).unwrap();
        g.perform_timestep(3.0, None);
        assert_eq!(g.get_state(), g.get_state());
        assert_eq!(g.observation(), g.observation());
    }

    #[test]
    fn water_amounts_tile_the_grid() {
        let mut g = garden(5, 5);
        g.reset_water(1.0);
        let amounts = g.get_water_amounts(2);

        assert_eq!(amounts.len(), 9);
        assert_eq!(amounts[0], (GridPos::new(1, 1), 4.0));
        // Bottom-right tile is clipped to one cell.
        assert_eq!(amounts[8], (GridPos::new(5, 5), 1.0));
        assert!(g.get_water_amounts(0).is_empty());
    }

    #[test]
    fn canopy_cover_follows_the_light_winner() {
        let mut g = garden(4, 4);
        g.add_plant(plant(0, 0, "basil")).unwrap();
        g.add_plant(plant(3, 3, "thyme")).unwrap();
        g.add_plant(plant(3, 2, "thyme")).unwrap();

        let cover = g.canopy_cover();
        assert_eq!(cover.len(), 2);
        assert_eq!(cover[0], 1.0 / 16.0);
        assert_eq!(cover[1], 2.0 / 16.0);
    }

    #[test]
    fn observation_channels_split_tensor() {
        let mut g = garden(3, 3);
        g.reset_water(2.0);
        let obs = g.observation();
        assert_eq!(obs.type_count(), 2);
        assert_eq!(obs.type_channels().dim(), (3, 3, 2));
        assert_eq!(obs.water_channel().sum(), 18.0);
    }

    #[test]
    fn enumerate_grid_is_row_major() {
        let g = garden(2, 3);
        let positions: Vec<GridPos> = g.enumerate_grid().map(|(p, _)| p).collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[3], GridPos::new(1, 0));
    }
}
