//! Enumeration types shared between the engine and control policies.

use serde::{Deserialize, Serialize};

/// Largest irrigation increment count a policy can request in one action.
pub const MAX_IRRIGATION_INCREMENTS: u32 = 4;

/// Action code of `Prune { plant_type: 0 }`; prune codes are `type + 5`.
pub const PRUNE_CODE_OFFSET: u32 = 5;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A discrete control action for one garden sector.
///
/// Actions travel between policy and driver as integer codes:
///
/// | Code        | Action                          |
/// |-------------|---------------------------------|
/// | `0`         | [`Action::NoOp`]                |
/// | `1..=4`     | [`Action::Irrigate`] increments |
/// | `type + 5`  | [`Action::Prune`] that type     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Leave the sector alone.
    NoOp,
    /// Irrigate the sector with this many quarter-increments of the
    /// maximum water level (always `1..=4`).
    Irrigate(u32),
    /// Prune plants of the given type index inside the sector.
    Prune {
        /// Index into the garden's ordered plant type list.
        plant_type: u32,
    },
}

/// Errors converting between [`Action`] values and integer codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionCodeError {
    /// An irrigation count outside `1..=4` cannot be encoded.
    #[error("irrigation count {0} is outside 1..=4")]
    IrrigationOutOfRange(u32),

    /// The prune type index is too large to encode.
    #[error("plant type index {0} cannot be encoded as a prune code")]
    PruneTypeOutOfRange(u32),
}

impl Action {
    /// Build an irrigation action from an increment count.
    ///
    /// A count of zero is the no-op; counts above
    /// [`MAX_IRRIGATION_INCREMENTS`] are clamped to it.
    pub fn irrigate(increments: u32) -> Self {
        match increments {
            0 => Self::NoOp,
            n => Self::Irrigate(n.min(MAX_IRRIGATION_INCREMENTS)),
        }
    }

    /// Encode this action as its integer code.
    pub fn code(self) -> Result<u32, ActionCodeError> {
        match self {
            Self::NoOp => Ok(0),
            Self::Irrigate(n) if (1..=MAX_IRRIGATION_INCREMENTS).contains(&n) => Ok(n),
            Self::Irrigate(n) => Err(ActionCodeError::IrrigationOutOfRange(n)),
            Self::Prune { plant_type } => plant_type
                .checked_add(PRUNE_CODE_OFFSET)
                .ok_or(ActionCodeError::PruneTypeOutOfRange(plant_type)),
        }
    }

    /// Decode an integer action code.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::NoOp,
            n if n < PRUNE_CODE_OFFSET => Self::Irrigate(n),
            n => Self::Prune {
                plant_type: n.saturating_sub(PRUNE_CODE_OFFSET),
            },
        }
    }

    /// Whether this action prunes.
    pub const fn is_prune(self) -> bool {
        matches!(self, Self::Prune { .. })
    }
}

// ---------------------------------------------------------------------------
// Plant events
// ---------------------------------------------------------------------------

/// Kind of per-plant quantity the engine records every timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlantEvent {
    /// Water the plant asked for this timestep.
    WaterRequired,
    /// Water the plant had accumulated when it grew.
    WaterAbsorbed,
    /// Plant radius after growth.
    RadiusUpdated,
    /// Plant height after growth.
    HeightUpdated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_action_table() {
        assert_eq!(Action::NoOp.code(), Ok(0));
        assert_eq!(Action::Irrigate(3).code(), Ok(3));
        assert_eq!(Action::Prune { plant_type: 0 }.code(), Ok(5));
        assert_eq!(Action::Prune { plant_type: 2 }.code(), Ok(7));
    }

    #[test]
    fn decode_splits_irrigation_and_prune_ranges() {
        assert_eq!(Action::from_code(0), Action::NoOp);
        assert_eq!(Action::from_code(4), Action::Irrigate(4));
        assert_eq!(Action::from_code(5), Action::Prune { plant_type: 0 });
        assert_eq!(Action::from_code(9), Action::Prune { plant_type: 4 });
    }

    #[test]
    fn irrigate_constructor_clamps() {
        assert_eq!(Action::irrigate(0), Action::NoOp);
        assert_eq!(Action::irrigate(2), Action::Irrigate(2));
        assert_eq!(Action::irrigate(9), Action::Irrigate(MAX_IRRIGATION_INCREMENTS));
    }

    #[test]
    fn unencodable_actions_are_errors() {
        assert_eq!(
            Action::Irrigate(0).code(),
            Err(ActionCodeError::IrrigationOutOfRange(0))
        );
        assert_eq!(
            Action::Prune { plant_type: u32::MAX }.code(),
            Err(ActionCodeError::PruneTypeOutOfRange(u32::MAX))
        );
    }
}
