//! Identifier types for plants registered in a garden.
//!
//! Plants receive sequential ids in registration order, starting at zero.
//! The ordering of [`PlantId`] is the ordering the engine uses wherever a
//! deterministic iteration order is required (light tie-breaks, candidate
//! lists in water distribution, growth order).

use serde::{Deserialize, Serialize};

/// Sequential identifier of a plant registered in a garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlantId(pub u64);

impl PlantId {
    /// The first id handed out by a garden.
    pub const FIRST: Self = Self(0);

    /// Return the inner counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return the id that follows this one, or `None` on overflow.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl core::fmt::Display for PlantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Key under which per-plant events are recorded.
///
/// Registered plants are keyed by their [`PlantId`]; the garden's synthetic
/// control plant has no id and uses its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlantKey {
    /// A plant registered in the garden.
    Plant(PlantId),
    /// The unconstrained reference plant.
    Control,
}

impl core::fmt::Display for PlantKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Plant(id) => write!(f, "{id}"),
            Self::Control => f.write_str("Control"),
        }
    }
}

impl From<PlantId> for PlantKey {
    fn from(id: PlantId) -> Self {
        Self::Plant(id)
    }
}
