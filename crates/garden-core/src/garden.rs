//! The garden engine: registration and the timestep pipeline.
//!
//! Each timestep runs five phases in a fixed order, each one complete before
//! the next begins:
//!
//! 1. **Irrigation** -- reset every cell to a uniform level, or apply a list
//!    of irrigations.
//! 2. **Light** -- one sunlight point per covered cell to its tallest plant.
//! 3. **Water** -- record each plant's demand, hand out cell water in random
//!    candidate order, then drain every cell.
//! 4. **Growth** -- grow every registered plant in ascending id order, write
//!    its radius to the growth canvas, and extend its coverage.
//! 5. **Control** -- grow the control plant with unlimited light and water.
//!
//! The control plant is an unconstrained reference: it never appears in any
//! cell's `nearby` set, never competes for water, and never writes to the
//! growth canvas.
//!
//! All randomness comes from the RNG handed to [`Garden::new`], so two
//! gardens built from the same seed and inputs evolve identically.

use garden_types::{IrrigationEvent, PlantEvent, PlantId, PlantKey};
use garden_world::coverage::{self, CoverageScan};
use garden_world::water::{self, WaterReport};
use garden_world::{Grid, GrowthCanvas, Plant, PlantRegistry, WorldError, growth, light};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GardenConfig;
use crate::events::EventLog;

/// Errors that can occur while building or driving a garden.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// A grid or registration operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The garden configuration cannot be simulated.
    #[error("invalid garden configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

/// Totals from one timestep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimestepReport {
    /// Number of completed timesteps, including this one.
    pub timestep: u64,
    /// Cells touched by irrigation (every cell on a uniform reset).
    pub cells_irrigated: usize,
    /// Sunlight points handed out.
    pub sunlight_points: usize,
    /// Water absorbed and drained.
    pub water: WaterReport,
    /// Registered plants whose radius crossed a grid-step boundary.
    pub plants_crossed: usize,
    /// Cells newly added to some plant's coverage.
    pub cells_covered: u64,
}

/// How the irrigation phase sets cell water.
#[derive(Debug, Clone, Copy)]
enum Irrigation<'a> {
    /// Every cell is set to this level.
    Reset(f64),
    /// The `i`-th amount goes to the flat-index pseudo-location of `i`.
    FlatList(&'a [f64]),
    /// Explicit located irrigations; residual water is kept.
    Events(&'a [IrrigationEvent]),
}

/// A simulated garden bed.
#[derive(Debug)]
pub struct Garden<P, R = StdRng> {
    grid: Grid,
    registry: PlantRegistry<P>,
    canvas: GrowthCanvas,
    control: P,
    step: f64,
    drainage_rate: f64,
    irr_threshold: usize,
    full_rescan_on_multi_ring: bool,
    rng: R,
    timestep: u64,
    events: EventLog,
    last_report: Option<TimestepReport>,
}

impl<P: Plant> Garden<P, StdRng> {
    /// Build a garden whose RNG is seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// See [`Garden::new`].
    pub fn seeded(config: &GardenConfig, plants: Vec<P>, control: P) -> Result<Self, GardenError> {
        Self::new(config, plants, control, StdRng::seed_from_u64(config.seed))
    }
}

impl<P: Plant, R: Rng> Garden<P, R> {
    /// Build a garden and register the initial plants in order.
    ///
    /// Initial plants sharing an origin are handled like [`Garden::add_plant`]:
    /// the first one stays and later ones are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::InvalidConfig`] for a non-positive step or a
    /// negative drainage rate, and [`GardenError::World`] for an empty grid or
    /// an initial plant that cannot be registered.
    pub fn new(config: &GardenConfig, plants: Vec<P>, mut control: P, rng: R) -> Result<Self, GardenError> {
        if !config.step.is_finite() || config.step <= 0.0 {
            return Err(GardenError::InvalidConfig {
                reason: format!("step must be positive (got {})", config.step),
            });
        }
        if !config.drainage_rate.is_finite() || config.drainage_rate < 0.0 {
            return Err(GardenError::InvalidConfig {
                reason: format!("drainage_rate must be non-negative (got {})", config.drainage_rate),
            });
        }

        let grid = Grid::new(config.rows, config.cols)?;
        let canvas = GrowthCanvas::new(config.rows, config.cols, config.plant_types.len());
        control.state_mut().id = None;

        let mut garden = Self {
            grid,
            registry: PlantRegistry::new(config.plant_types.clone()),
            canvas,
            control,
            step: config.step,
            drainage_rate: config.drainage_rate,
            irr_threshold: config.irr_threshold,
            full_rescan_on_multi_ring: config.full_rescan_on_multi_ring,
            rng,
            timestep: 0,
            events: EventLog::new(),
            last_report: None,
        };

        for plant in plants {
            garden.add_plant(plant)?;
        }

        info!(
            rows = config.rows,
            cols = config.cols,
            plant_types = config.plant_types.len(),
            plants = garden.registry.len(),
            "Garden created"
        );
        Ok(garden)
    }

    /// Register a plant.
    ///
    /// Returns `Ok(None)` without changing anything when another plant is
    /// already rooted at the same origin.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::World`] if the origin is outside the grid or
    /// the plant's type is not supported.
    pub fn add_plant(&mut self, plant: P) -> Result<Option<PlantId>, GardenError> {
        Ok(self.registry.register(&mut self.grid, plant)?)
    }

    /// Run one timestep.
    ///
    /// With no irrigation list (or an empty one) every cell's water is reset
    /// to `water_amt`. Otherwise the `i`-th amount is applied at the location
    /// `(i / rows, i % cols)` and `water_amt` is ignored.
    ///
    /// Returns the registered plants in ascending id order.
    pub fn perform_timestep(
        &mut self,
        water_amt: f64,
        irrigations: Option<&[f64]>,
    ) -> Vec<&P> {
        let irrigation = match irrigations {
            Some(amounts) if !amounts.is_empty() => Irrigation::FlatList(amounts),
            _ => Irrigation::Reset(water_amt),
        };
        self.run_timestep(irrigation);
        self.registry.plants().collect()
    }

    /// Run one timestep applying explicit located irrigations.
    ///
    /// Water left in the cells from the previous timestep is kept; an empty
    /// event list adds no water at all.
    ///
    /// Returns the registered plants in ascending id order.
    pub fn perform_timestep_with_events(
        &mut self,
        events: &[IrrigationEvent],
    ) -> Vec<&P> {
        self.run_timestep(Irrigation::Events(events));
        self.registry.plants().collect()
    }

    /// Add `amount` to every cell within `irr_threshold` cells of the grid
    /// point closest to `location`.
    ///
    /// Returns the number of cells watered.
    pub fn irrigate(&mut self, location: (f64, f64), amount: f64) -> usize {
        water::irrigate(&mut self.grid, self.step, self.irr_threshold, location, amount)
    }

    /// Set every cell's water to `water_amt`.
    pub fn reset_water(&mut self, water_amt: f64) {
        water::reset_water(&mut self.grid, water_amt);
    }

    fn run_timestep(&mut self, irrigation: Irrigation<'_>) {
        let timestep = self.timestep.saturating_add(1);

        // --- Phase 1: Irrigation ---
        let cells_irrigated = self.phase_irrigation(irrigation);
        debug!(timestep, cells_irrigated, "Irrigation phase complete");

        // --- Phase 2: Light ---
        let sunlight_points = light::distribute_light(&self.grid, &mut self.registry);
        debug!(timestep, sunlight_points, "Light phase complete");

        // --- Phase 3: Water ---
        for (id, plant) in self.registry.iter() {
            self.events.log(PlantEvent::WaterRequired, id, plant.desired_water_amt());
        }
        let water = water::distribute_water(
            &mut self.grid,
            &mut self.registry,
            self.drainage_rate,
            &mut self.rng,
        );
        debug!(
            timestep,
            absorbed = water.absorbed,
            drained = water.drained,
            "Water phase complete"
        );

        // --- Phase 4: Growth ---
        let (plants_crossed, cells_covered) = self.phase_growth();
        debug!(timestep, plants_crossed, cells_covered, "Growth phase complete");

        // --- Phase 5: Control plant ---
        self.grow_control_plant();

        self.timestep = timestep;
        self.last_report = Some(TimestepReport {
            timestep,
            cells_irrigated,
            sunlight_points,
            water,
            plants_crossed,
            cells_covered,
        });
    }

    fn phase_irrigation(&mut self, irrigation: Irrigation<'_>) -> usize {
        match irrigation {
            Irrigation::Reset(water_amt) => {
                water::reset_water(&mut self.grid, water_amt);
                self.grid.rows().saturating_mul(self.grid.cols())
            }
            Irrigation::FlatList(amounts) => {
                let (rows, cols) = (self.grid.rows(), self.grid.cols());
                let mut watered: usize = 0;
                for (i, &amount) in amounts.iter().enumerate() {
                    let location = water::flat_index_location(i, rows, cols);
                    watered = watered.saturating_add(self.irrigate(location, amount));
                }
                watered
            }
            Irrigation::Events(events) => {
                let mut watered: usize = 0;
                for event in events {
                    watered = watered.saturating_add(self.irrigate((event.x, event.y), event.amount));
                }
                watered
            }
        }
    }

    /// Grow every registered plant and extend its coverage.
    ///
    /// Returns `(plants that crossed a boundary, cells newly covered)`.
    fn phase_growth(&mut self) -> (usize, u64) {
        let mut plants_crossed: usize = 0;
        let mut cells_covered: u64 = 0;

        for id in self.registry.ids() {
            let Some((plant, slot)) = self.registry.get_mut_with_slot(id) else {
                continue;
            };

            let report = growth::grow_plant(plant, self.step, Some((&mut self.canvas, slot)));
            self.events.log(PlantEvent::WaterAbsorbed, id, report.water_absorbed);
            self.events.log(PlantEvent::RadiusUpdated, id, report.radius);
            self.events.log(PlantEvent::HeightUpdated, id, report.height);
            if report.crossed.is_some() {
                plants_crossed = plants_crossed.saturating_add(1);
            }

            let scan = if self.full_rescan_on_multi_ring && report.rings_crossed > 1 {
                CoverageScan::FullBox
            } else {
                CoverageScan::Perimeter
            };
            let added = coverage::update_plant_coverage(&mut self.grid, id, plant, self.step, scan);
            cells_covered = cells_covered.saturating_add(added);
        }

        (plants_crossed, cells_covered)
    }

    /// Grow the control plant with full light and exactly the water it asks
    /// for. Its footprint is tracked only as a count: a crossing at ring `k`
    /// adds the `8k` cells of that ring.
    fn grow_control_plant(&mut self) {
        let desired = self.control.desired_water_amt();
        {
            let state = self.control.state_mut();
            state.num_sunlight_points = state.num_grid_points;
            state.water_amt = desired;
        }
        self.events.log(PlantEvent::WaterRequired, PlantKey::Control, desired);

        let report = growth::grow_plant(&mut self.control, self.step, None);
        self.events.log(PlantEvent::WaterAbsorbed, PlantKey::Control, report.water_absorbed);
        self.events.log(PlantEvent::RadiusUpdated, PlantKey::Control, report.radius);
        self.events.log(PlantEvent::HeightUpdated, PlantKey::Control, report.height);

        if let Some(next_step) = report.crossed {
            let state = self.control.state_mut();
            state.num_grid_points = state
                .num_grid_points
                .saturating_add(next_step.saturating_mul(8));
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The grid of cells.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The plant registry.
    pub const fn registry(&self) -> &PlantRegistry<P> {
        &self.registry
    }

    /// Registered plants in ascending id order.
    pub fn plants(&self) -> impl Iterator<Item = &P> {
        self.registry.plants()
    }

    /// A registered plant.
    pub fn plant(&self, id: PlantId) -> Option<&P> {
        self.registry.get(id)
    }

    /// The per-type growth canvas.
    pub const fn canvas(&self) -> &GrowthCanvas {
        &self.canvas
    }

    /// The control plant.
    pub const fn control_plant(&self) -> &P {
        &self.control
    }

    /// The per-plant event log.
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Totals from the most recent timestep.
    pub const fn last_report(&self) -> Option<&TimestepReport> {
        self.last_report.as_ref()
    }

    /// Number of completed timesteps.
    pub const fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Number of rows (N).
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns (M).
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Distance between adjacent grid points.
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Supported plant types in channel order.
    pub fn plant_types(&self) -> &[String] {
        self.registry.plant_types()
    }
}
