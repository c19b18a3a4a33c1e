//! Timestep engine, observations, and orchestration for the garden simulation.
//!
//! This crate owns the five-phase timestep pipeline that drives a garden:
//! Irrigation, Light, Water, Growth, and Control.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `garden-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`ActionSource`] trait and [`NoOpSource`].
//! - [`events`] -- Per-plant event log.
//! - [`garden`] -- The [`Garden`] engine: registration, the timestep
//!   pipeline, and the control plant.
//! - [`observation`] -- Observation tensor, canopy cover, and water views.
//! - [`runner`] -- Episode loop driving a garden with an action source.
//! - [`sector`] -- Sector layout and bounds.
//!
//! [`ActionSource`]: decision::ActionSource
//! [`NoOpSource`]: decision::NoOpSource
//! [`Garden`]: garden::Garden

pub mod config;
pub mod decision;
pub mod events;
pub mod garden;
pub mod observation;
pub mod runner;
pub mod sector;

pub use config::SimulationConfig;
pub use garden::{Garden, GardenError, TimestepReport};
pub use observation::Observation;
pub use sector::{SectorBounds, SectorError, SectorLayout};
