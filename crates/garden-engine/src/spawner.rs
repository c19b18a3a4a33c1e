//! Initial planting for the garden bed.
//!
//! At episode start the spawner seeds `plants_per_type` reference plants of
//! every configured type at distinct random grid points, drawn without
//! replacement so no two plants share an origin. It also builds the control
//! plant the garden grows alongside them.

use garden_core::config::{GardenConfig, PlantingConfig};
use garden_types::GridPos;
use garden_world::ReferencePlant;
use rand::Rng;
use rand::seq::index;
use tracing::info;

use crate::error::EngineError;

/// Seed the initial plants at distinct random positions.
///
/// Plants are returned grouped by type in configured type order, so ids
/// assigned by the garden follow the same grouping.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the requested plants do not fit in
/// the grid.
pub fn spawn_plants<R: Rng + ?Sized>(
    garden: &GardenConfig,
    planting: &PlantingConfig,
    rng: &mut R,
) -> Result<Vec<ReferencePlant>, EngineError> {
    let cells = garden
        .rows
        .checked_mul(garden.cols)
        .ok_or_else(|| EngineError::Spawner {
            message: format!("grid {}x{} is too large", garden.rows, garden.cols),
        })?;
    let total = planting
        .plants_per_type
        .checked_mul(garden.plant_types.len())
        .filter(|total| *total <= cells)
        .ok_or_else(|| EngineError::Spawner {
            message: format!(
                "{} plants of {} types do not fit in {cells} grid points",
                planting.plants_per_type,
                garden.plant_types.len()
            ),
        })?;

    let mut positions = index::sample(rng, cells, total).into_iter();
    let mut plants = Vec::with_capacity(total);
    for plant_type in &garden.plant_types {
        for flat in positions.by_ref().take(planting.plants_per_type) {
            let pos = grid_position(flat, garden.cols)?;
            plants.push(ReferencePlant::new(
                pos.row,
                pos.col,
                plant_type.clone(),
                planting.params.clone(),
            ));
        }
    }

    info!(
        plants = plants.len(),
        types = garden.plant_types.len(),
        "Initial plants seeded"
    );
    Ok(plants)
}

/// The control plant: rooted at the grid origin, typed as the first
/// configured type.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] when no plant types are configured.
pub fn control_plant(
    garden: &GardenConfig,
    planting: &PlantingConfig,
) -> Result<ReferencePlant, EngineError> {
    let plant_type = garden
        .plant_types
        .first()
        .ok_or_else(|| EngineError::Spawner {
            message: String::from("no plant types configured"),
        })?;
    Ok(ReferencePlant::new(
        0,
        0,
        plant_type.clone(),
        planting.params.clone(),
    ))
}

fn grid_position(flat: usize, cols: usize) -> Result<GridPos, EngineError> {
    let spawn_err = || EngineError::Spawner {
        message: format!("flat index {flat} does not map onto {cols} columns"),
    };
    let row = flat.checked_div(cols).ok_or_else(spawn_err)?;
    let col = flat.checked_rem(cols).ok_or_else(spawn_err)?;
    Ok(GridPos::new(row, col))
}
