//! Action source trait and no-op implementation.
//!
//! Before each policy-driven timestep, the runner presents the current
//! [`Observation`] to an [`ActionSource`] and receives one [`SectorAction`]:
//! a discrete [`Action`] aimed at one sector of the garden. The trait
//! abstracts where decisions come from -- the sector baseline, a trained
//! agent, a scripted sequence, or a test stub.

use garden_types::Action;

use crate::observation::Observation;
use crate::sector::{SectorError, SectorLayout};

/// Errors that can occur while choosing an action.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// The chosen sector does not exist in the layout.
    #[error("sector error: {source}")]
    Sector {
        /// The underlying sector error.
        #[from]
        source: SectorError,
    },

    /// An internal error in the action source.
    #[error("action source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// One action targeted at one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorAction {
    /// Index of the targeted sector.
    pub sector: usize,
    /// What to do there.
    pub action: Action,
}

/// A source of per-timestep actions.
pub trait ActionSource {
    /// Choose an action for the timestep about to run.
    ///
    /// `timestep` is the number of timesteps completed so far.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no action can be produced.
    fn choose_action(
        &mut self,
        timestep: u64,
        observation: &Observation,
        layout: &SectorLayout,
    ) -> Result<SectorAction, DecisionError>;
}

/// An action source that always leaves sector 0 alone.
#[derive(Debug, Clone, Default)]
pub struct NoOpSource;

impl NoOpSource {
    /// Create a new no-op source.
    pub const fn new() -> Self {
        Self
    }
}

impl ActionSource for NoOpSource {
    fn choose_action(
        &mut self,
        _timestep: u64,
        _observation: &Observation,
        _layout: &SectorLayout,
    ) -> Result<SectorAction, DecisionError> {
        Ok(SectorAction {
            sector: 0,
            action: Action::NoOp,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ndarray::{Array1, Array3};

    use super::*;

    #[test]
    fn no_op_source_always_returns_no_op() {
        let observation = Observation {
            canopy_cover: Array1::zeros(2),
            raw: Array3::zeros((4, 4, 3)),
        };
        let layout = SectorLayout::new(4, 4, 2, 2).unwrap();
        let mut source = NoOpSource::new();
        for timestep in 0..3 {
            let chosen = source.choose_action(timestep, &observation, &layout).unwrap();
            assert_eq!(chosen.action, Action::NoOp);
            assert_eq!(chosen.sector, 0);
        }
    }
}
