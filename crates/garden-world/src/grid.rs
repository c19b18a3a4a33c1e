//! The garden grid: an arena of cells indexed by `(row, col)`.
//!
//! Each [`Cell`] holds a water level and the set of plant ids whose footprint
//! has reached it. Plant "ownership" of a cell is nothing more than id
//! membership in that set, so cells never hold references to plants.
//!
//! `nearby` sets are append-only for the lifetime of a grid: plants never
//! shrink, so once a plant covers a cell it stays in the set. [`Cell`]
//! deliberately exposes no removal.
//!
//! Water is stored at single precision. Every update computes in `f64` and
//! narrows on store (see [`crate::numeric::to_cell_water`]).

use std::collections::BTreeSet;

use garden_types::{GridPos, PlantId};
use ndarray::Array2;

use crate::error::WorldError;
use crate::numeric;

/// One grid location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    water: f32,
    nearby: BTreeSet<PlantId>,
}

impl Cell {
    /// Current water level.
    pub const fn water(&self) -> f32 {
        self.water
    }

    /// Store a new water level, narrowed to single precision.
    pub const fn set_water(&mut self, water: f64) {
        self.water = numeric::to_cell_water(water);
    }

    /// Plants whose footprint includes this cell, in ascending id order.
    pub const fn nearby(&self) -> &BTreeSet<PlantId> {
        &self.nearby
    }

    /// Add a plant to the `nearby` set.
    ///
    /// Returns `true` if the plant was not already present.
    pub fn claim(&mut self, plant: PlantId) -> bool {
        self.nearby.insert(plant)
    }
}

/// An N x M arena of [`Cell`]s stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a dry grid with empty `nearby` sets.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] if either dimension is zero, or
    /// [`WorldError::ArithmeticOverflow`] if `rows * cols` overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, WorldError> {
        if rows == 0 || cols == 0 {
            return Err(WorldError::EmptyGrid { rows, cols });
        }
        let len = rows.checked_mul(cols).ok_or(WorldError::ArithmeticOverflow)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); len],
        })
    }

    /// Number of rows (N).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (M).
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies inside the grid.
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major offset of `pos`, or `None` outside the grid.
    fn offset(&self, pos: GridPos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        pos.row.checked_mul(self.cols)?.checked_add(pos.col)
    }

    /// Return the cell at `pos`.
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.offset(pos).and_then(|i| self.cells.get(i))
    }

    /// Return the cell at `pos` mutably.
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        self.offset(pos).and_then(|i| self.cells.get_mut(i))
    }

    /// Return the cell at `pos`, or an [`WorldError::OutOfBounds`] error.
    pub fn cell_mut(&mut self, pos: GridPos) -> Result<&mut Cell, WorldError> {
        let (rows, cols) = (self.rows, self.cols);
        self.get_mut(pos)
            .ok_or(WorldError::OutOfBounds { pos, rows, cols })
    }

    /// Iterate over all cells in row-major order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let row = i.checked_div(cols).unwrap_or(0);
            let col = i.checked_rem(cols).unwrap_or(0);
            (GridPos::new(row, col), cell)
        })
    }

    /// Iterate mutably over all cells in row-major order.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Sum of all cell water levels.
    pub fn total_water(&self) -> f64 {
        self.cells.iter().map(|c| f64::from(c.water)).sum()
    }

    /// Water levels as an N x M array.
    pub fn water_layer(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
            self.get(GridPos::new(row, col))
                .map_or(0.0, |cell| f64::from(cell.water))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dry_and_empty() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.iter().count(), 12);
        assert!(grid.iter().all(|(_, c)| c.water() == 0.0 && c.nearby().is_empty()));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(WorldError::EmptyGrid { rows: 0, cols: 5 })
        );
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = Grid::new(2, 3).unwrap();
        let positions: Vec<GridPos> = grid.iter().map(|(p, _)| p).collect();
        assert_eq!(positions.first(), Some(&GridPos::new(0, 0)));
        assert_eq!(positions.get(2), Some(&GridPos::new(0, 2)));
        assert_eq!(positions.get(3), Some(&GridPos::new(1, 0)));
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.get(GridPos::new(2, 0)).is_none());
        assert!(grid.get(GridPos::new(0, 2)).is_none());
        assert!(matches!(
            grid.cell_mut(GridPos::new(5, 5)),
            Err(WorldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn claim_is_idempotent() {
        let mut grid = Grid::new(2, 2).unwrap();
        let cell = grid.cell_mut(GridPos::new(1, 1)).unwrap();
        assert!(cell.claim(PlantId(3)));
        assert!(!cell.claim(PlantId(3)));
        assert_eq!(cell.nearby().len(), 1);
    }

    #[test]
    fn water_layer_mirrors_cells() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.cell_mut(GridPos::new(0, 1)).unwrap().set_water(2.5);
        let layer = grid.water_layer();
        assert_eq!(layer[[0, 1]], 2.5);
        assert_eq!(layer[[1, 0]], 0.0);
        assert_eq!(grid.total_water(), 2.5);
    }
}
