//! Grid, plants, and resource mechanics for the garden bed simulation.
//!
//! This crate models the physical garden: an arena of grid cells holding
//! water and the set of plants whose footprint reaches them, the contract
//! a plant must satisfy to be grown by the engine, and the per-phase
//! mechanics that the engine in `garden-core` sequences every timestep.
//!
//! # Modules
//!
//! - [`coverage`] -- Perimeter-band coverage update as a plant's radius grows.
//! - [`error`] -- Error types for grid and registration operations.
//! - [`grid`] -- [`Grid`] and [`Cell`]: water levels and append-only
//!   `nearby` sets indexed by `(row, col)`.
//! - [`growth`] -- Growth update, ring-crossing detection, and the
//!   per-type [`GrowthCanvas`].
//! - [`light`] -- Sunlight distribution by height occlusion.
//! - [`numeric`] -- Float helpers reproducing floor-division, half-even
//!   rounding, and single-precision cell storage.
//! - [`plant`] -- The [`Plant`] contract, [`PlantState`], and the
//!   [`ReferencePlant`] growth model.
//! - [`registry`] -- [`PlantRegistry`]: ids, types, and one plant per origin.
//! - [`water`] -- Water reset, square-window irrigation, randomized
//!   competitive distribution, and drainage.
//!
//! [`Grid`]: grid::Grid
//! [`Cell`]: grid::Cell
//! [`GrowthCanvas`]: growth::GrowthCanvas
//! [`Plant`]: plant::Plant
//! [`PlantState`]: plant::PlantState
//! [`ReferencePlant`]: plant::ReferencePlant
//! [`PlantRegistry`]: registry::PlantRegistry

pub mod coverage;
pub mod error;
pub mod grid;
pub mod growth;
pub mod light;
pub mod numeric;
pub mod plant;
pub mod registry;
pub mod water;

// Re-export primary types at crate root.
pub use coverage::{CoverageScan, update_plant_coverage};
pub use error::WorldError;
pub use grid::{Cell, Grid};
pub use growth::{GrowthCanvas, GrowthReport, grow_plant};
pub use plant::{Plant, PlantState, ReferencePlant, ReferencePlantParams};
pub use registry::PlantRegistry;
