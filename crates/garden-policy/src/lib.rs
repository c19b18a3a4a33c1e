//! Sector baseline policy for the garden bed simulation.
//!
//! A hand-written control policy that maps one observation and one garden
//! sector to a discrete [`Action`]: prune a dominant plant type, irrigate a
//! dry sector, or do nothing.
//!
//! # Modules
//!
//! - [`baseline`] -- [`baseline_policy`], the pure decision function.
//! - [`error`] -- [`PolicyError`] for invalid sectors and observation shapes.
//! - [`source`] -- [`BaselineSource`], a seeded `ActionSource` adapter.
//!
//! [`Action`]: garden_types::Action

pub mod baseline;
pub mod error;
pub mod source;

pub use baseline::baseline_policy;
pub use error::PolicyError;
pub use source::BaselineSource;
