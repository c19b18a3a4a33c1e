//! Error types for the `garden-policy` crate.

use std::num::TryFromIntError;

use garden_core::SectorError;

/// Errors that can occur while evaluating the baseline policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The sector geometry or index is invalid.
    #[error("sector error: {source}")]
    Sector {
        /// The underlying sector error.
        #[from]
        source: SectorError,
    },

    /// The observation tensor does not match the garden layout.
    #[error("observation shape {found:?} does not match expected {expected:?}")]
    ShapeMismatch {
        /// `(rows, cols, types + 1)` implied by the layout and canopy vector.
        expected: (usize, usize, usize),
        /// Shape of the observation tensor.
        found: (usize, usize, usize),
    },

    /// A plant type index cannot be expressed as an action.
    #[error("plant type index {index} cannot be encoded: {source}")]
    TypeIndex {
        /// The offending index.
        index: usize,
        /// The underlying conversion error.
        source: TryFromIntError,
    },
}
