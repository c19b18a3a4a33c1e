//! Small value structs shared across the workspace.

use serde::{Deserialize, Serialize};

/// A `(row, col)` index into the garden grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Row index (first grid dimension).
    pub row: usize,
    /// Column index (second grid dimension).
    pub col: usize,
}

impl GridPos {
    /// Create a grid position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One explicit irrigation: `amount` of water spread around a real-valued
/// garden location `(x, y)`, measured in the same units as the grid step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrigationEvent {
    /// Location along the row axis.
    pub x: f64,
    /// Location along the column axis.
    pub y: f64,
    /// Water added to every cell of the irrigation window.
    pub amount: f64,
}

impl IrrigationEvent {
    /// Create an irrigation event.
    pub const fn new(x: f64, y: f64, amount: f64) -> Self {
        Self { x, y, amount }
    }
}
