//! Error types for the `garden-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type.

use garden_types::GridPos;

/// Errors that can occur during grid and registration operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The grid must have at least one row and one column.
    #[error("grid dimensions must be positive (got {rows}x{cols})")]
    EmptyGrid {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A position lies outside the grid.
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending position.
        pos: GridPos,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// A plant's type is not in the garden's supported type list.
    #[error("plant type {plant_type:?} is not supported by this garden")]
    UnknownPlantType {
        /// The unsupported type name.
        plant_type: String,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in grid calculation")]
    ArithmeticOverflow,
}
