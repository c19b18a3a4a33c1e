//! Plant registry: sequential ids, type slots, and origin occupancy.
//!
//! The registry enforces **at most one plant per grid origin**. A second
//! plant at an occupied origin is not an error: it is logged and dropped,
//! and the original occupant stays. Plants are never removed.

use std::collections::BTreeMap;

use garden_types::{GridPos, PlantId};
use tracing::warn;

use crate::error::WorldError;
use crate::grid::Grid;
use crate::plant::Plant;

/// Registry mapping plant ids to plant handles.
#[derive(Debug, Clone)]
pub struct PlantRegistry<P> {
    /// Supported plant types; a plant's slot is its index here.
    plant_types: Vec<String>,
    plants: BTreeMap<PlantId, P>,
    type_slots: BTreeMap<PlantId, usize>,
    occupied: BTreeMap<GridPos, PlantId>,
    next_id: PlantId,
}

impl<P: Plant> PlantRegistry<P> {
    /// Create an empty registry for the given ordered type list.
    pub const fn new(plant_types: Vec<String>) -> Self {
        Self {
            plant_types,
            plants: BTreeMap::new(),
            type_slots: BTreeMap::new(),
            occupied: BTreeMap::new(),
            next_id: PlantId::FIRST,
        }
    }

    /// Register a plant and mark its origin in `grid`.
    ///
    /// Returns `Ok(Some(id))` on success and `Ok(None)` when the origin is
    /// already occupied (the new plant is dropped with a warning).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the origin is outside the grid,
    /// [`WorldError::UnknownPlantType`] if the type is not supported, and
    /// [`WorldError::ArithmeticOverflow`] if the id counter is exhausted.
    pub fn register(&mut self, grid: &mut Grid, mut plant: P) -> Result<Option<PlantId>, WorldError> {
        let origin = plant.state().origin();
        if !grid.contains(origin) {
            return Err(WorldError::OutOfBounds {
                pos: origin,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        let slot = self.type_slot_of(&plant.state().plant_type)?;

        if let Some(occupant) = self.occupied.get(&origin) {
            warn!(
                %origin,
                occupant = %occupant,
                "a plant already exists at this position; the new one was not planted"
            );
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id = id.checked_next().ok_or(WorldError::ArithmeticOverflow)?;

        grid.cell_mut(origin)?.claim(id);
        plant.state_mut().id = Some(id);
        self.occupied.insert(origin, id);
        self.type_slots.insert(id, slot);
        self.plants.insert(id, plant);
        Ok(Some(id))
    }

    /// Index of `plant_type` in the supported type list.
    pub fn type_slot_of(&self, plant_type: &str) -> Result<usize, WorldError> {
        self.plant_types
            .iter()
            .position(|t| t == plant_type)
            .ok_or_else(|| WorldError::UnknownPlantType {
                plant_type: plant_type.to_owned(),
            })
    }

    /// The supported plant types in channel order.
    pub fn plant_types(&self) -> &[String] {
        &self.plant_types
    }

    /// Number of supported plant types (T).
    pub fn type_count(&self) -> usize {
        self.plant_types.len()
    }

    /// Return a registered plant.
    pub fn get(&self, id: PlantId) -> Option<&P> {
        self.plants.get(&id)
    }

    /// Return a registered plant mutably.
    pub fn get_mut(&mut self, id: PlantId) -> Option<&mut P> {
        self.plants.get_mut(&id)
    }

    /// Return a registered plant mutably together with its type slot.
    pub fn get_mut_with_slot(&mut self, id: PlantId) -> Option<(&mut P, usize)> {
        let slot = *self.type_slots.get(&id)?;
        self.plants.get_mut(&id).map(|plant| (plant, slot))
    }

    /// Type slot of a registered plant.
    pub fn type_slot(&self, id: PlantId) -> Option<usize> {
        self.type_slots.get(&id).copied()
    }

    /// The plant rooted at `pos`, if any.
    pub fn occupant(&self, pos: GridPos) -> Option<PlantId> {
        self.occupied.get(&pos).copied()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<PlantId> {
        self.plants.keys().copied().collect()
    }

    /// Iterate over registered plants in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlantId, &P)> {
        self.plants.iter().map(|(id, plant)| (*id, plant))
    }

    /// Iterate over registered plants only.
    pub fn plants(&self) -> impl Iterator<Item = &P> {
        self.plants.values()
    }

    /// Number of registered plants.
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether no plant is registered.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plant::{ReferencePlant, ReferencePlantParams};

    fn types() -> Vec<String> {
        vec!["basil".to_owned(), "thyme".to_owned()]
    }

    fn plant(row: usize, col: usize, kind: &str) -> ReferencePlant {
        ReferencePlant::new(row, col, kind, ReferencePlantParams::default())
    }

    #[test]
    fn ids_are_sequential_and_origin_is_claimed() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut reg = PlantRegistry::new(types());

        let a = reg.register(&mut grid, plant(1, 1, "basil")).unwrap();
        let b = reg.register(&mut grid, plant(3, 2, "thyme")).unwrap();
        assert_eq!(a, Some(PlantId(0)));
        assert_eq!(b, Some(PlantId(1)));
        assert_eq!(reg.type_slot(PlantId(1)), Some(1));
        assert_eq!(reg.get(PlantId(0)).unwrap().state().id, Some(PlantId(0)));

        let cell = grid.get(GridPos::new(3, 2)).unwrap();
        assert!(cell.nearby().contains(&PlantId(1)));
    }

    #[test]
    fn second_plant_at_origin_is_dropped() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut reg = PlantRegistry::new(types());

        assert_eq!(reg.register(&mut grid, plant(2, 2, "basil")).unwrap(), Some(PlantId(0)));
        assert_eq!(reg.register(&mut grid, plant(2, 2, "thyme")).unwrap(), None);

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.occupant(GridPos::new(2, 2)), Some(PlantId(0)));
        assert_eq!(reg.type_slot(PlantId(0)), Some(0));
        // The rejected plant did not consume an id.
        assert_eq!(reg.register(&mut grid, plant(0, 0, "thyme")).unwrap(), Some(PlantId(1)));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut reg = PlantRegistry::new(types());
        let result = reg.register(&mut grid, plant(0, 0, "kale"));
        assert_eq!(
            result,
            Err(WorldError::UnknownPlantType {
                plant_type: "kale".to_owned()
            })
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn origin_outside_grid_is_an_error() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut reg = PlantRegistry::new(types());
        let result = reg.register(&mut grid, plant(5, 0, "basil"));
        assert!(matches!(result, Err(WorldError::OutOfBounds { .. })));
    }
}
