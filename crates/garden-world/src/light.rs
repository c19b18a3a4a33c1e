//! Sunlight distribution by height occlusion.
//!
//! Every cell with a non-empty `nearby` set gives exactly one sunlight point
//! to the tallest plant covering it. Equal heights go to the plant with the
//! lowest id, so the outcome never depends on set iteration details.

use std::collections::BTreeSet;

use garden_types::PlantId;

use crate::grid::Grid;
use crate::plant::Plant;
use crate::registry::PlantRegistry;

/// The tallest registered plant among `nearby`, lowest id on ties.
pub fn tallest_plant<P: Plant>(
    nearby: &BTreeSet<PlantId>,
    registry: &PlantRegistry<P>,
) -> Option<PlantId> {
    let mut best: Option<(PlantId, f64)> = None;
    for &id in nearby {
        let Some(plant) = registry.get(id) else {
            continue;
        };
        let height = plant.state().height;
        match best {
            Some((_, best_height)) if height <= best_height => {}
            _ => best = Some((id, height)),
        }
    }
    best.map(|(id, _)| id)
}

/// Give one sunlight point per covered cell to its tallest plant.
///
/// Returns the number of sunlight points handed out.
pub fn distribute_light<P: Plant>(grid: &Grid, registry: &mut PlantRegistry<P>) -> usize {
    let mut handed_out: usize = 0;
    for (_, cell) in grid.iter() {
        if let Some(id) = tallest_plant(cell.nearby(), registry)
            && let Some(plant) = registry.get_mut(id)
        {
            plant.add_sunlight_point();
            handed_out = handed_out.saturating_add(1);
        }
    }
    handed_out
}
