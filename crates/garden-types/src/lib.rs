//! Shared type definitions for the garden bed simulation.
//!
//! This crate holds the small value types that cross crate boundaries:
//! plant identifiers, grid positions, the discrete action codes produced by
//! control policies, and the kinds of per-plant events the engine records.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential plant identifiers and the control-plant key
//! - [`enums`] -- Discrete actions and plant event kinds
//! - [`structs`] -- Grid positions and irrigation events

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, ActionCodeError, PlantEvent};
pub use ids::{PlantId, PlantKey};
pub use structs::{GridPos, IrrigationEvent};
