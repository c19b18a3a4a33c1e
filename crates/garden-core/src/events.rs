//! Per-plant event log.
//!
//! The engine records one value per plant per event kind each timestep:
//! water requested before distribution, water absorbed before the growth
//! reset, and the radius and height after growth. Values are appended in
//! timestep order, so the `n`-th entry of a series is the `n`-th time that
//! event fired for that plant.

use std::collections::BTreeMap;

use garden_types::{PlantEvent, PlantKey};

/// Ordered series of recorded values keyed by event kind and plant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    series: BTreeMap<(PlantEvent, PlantKey), Vec<f64>>,
}

impl EventLog {
    /// An empty log.
    pub const fn new() -> Self {
        Self {
            series: BTreeMap::new(),
        }
    }

    /// Append `value` to the series for `(event, plant)`.
    pub fn log(&mut self, event: PlantEvent, plant: impl Into<PlantKey>, value: f64) {
        self.series
            .entry((event, plant.into()))
            .or_default()
            .push(value);
    }

    /// All values recorded for `(event, plant)`, oldest first.
    pub fn get(&self, event: PlantEvent, plant: impl Into<PlantKey>) -> &[f64] {
        self.series
            .get(&(event, plant.into()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The most recent value recorded for `(event, plant)`.
    pub fn latest(&self, event: PlantEvent, plant: impl Into<PlantKey>) -> Option<f64> {
        self.get(event, plant).last().copied()
    }

    /// Plants with at least one value for `event`, in key order.
    pub fn plants(&self, event: PlantEvent) -> impl Iterator<Item = PlantKey> + '_ {
        self.series
            .keys()
            .filter(move |(e, _)| *e == event)
            .map(|(_, key)| *key)
    }

    /// Total number of recorded values.
    pub fn len(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
