//! Integration tests for the garden timestep pipeline.
//!
//! Tests drive `Garden` through its public API only, with seeded RNGs, and
//! check the properties every timestep must preserve: water never negative,
//! coverage only ever grows, one sunlight point per covered cell, one plant
//! per origin, and identical runs from identical seeds.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::collections::{BTreeMap, BTreeSet};

use garden_core::Garden;
use garden_core::config::GardenConfig;
use garden_types::{GridPos, PlantId};
use garden_world::plant::{Plant, PlantState};
use garden_world::{ReferencePlant, ReferencePlantParams};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A plant that asks for no water and grows by fixed amounts.
#[derive(Debug, Clone, PartialEq)]
struct Sprout {
    state: PlantState,
    upward: f64,
    outward: f64,
}

impl Sprout {
    fn new(row: usize, col: usize, upward: f64, outward: f64) -> Self {
        Self {
            state: PlantState::new(row, col, "basil"),
            upward,
            outward,
        }
    }
}

impl Plant for Sprout {
    fn state(&self) -> &PlantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PlantState {
        &mut self.state
    }

    fn desired_water_amt(&self) -> f64 {
        0.0
    }

    fn amount_to_grow(&mut self) -> (f64, f64) {
        (self.upward, self.outward)
    }

    fn reset(&mut self) {
        self.state.water_amt = 0.0;
        self.state.num_sunlight_points = 0;
    }
}

fn config(rows: usize, cols: usize) -> GardenConfig {
    GardenConfig {
        rows,
        cols,
        step: 1.0,
        drainage_rate: 2.0,
        irr_threshold: 2,
        plant_types: vec!["basil".to_owned(), "thyme".to_owned()],
        seed: 42,
        full_rescan_on_multi_ring: false,
    }
}

fn reference(row: usize, col: usize, kind: &str) -> ReferencePlant {
    let params = ReferencePlantParams {
        radius_rate: 0.6,
        ..ReferencePlantParams::default()
    };
    ReferencePlant::new(row, col, kind, params)
}

fn crowded_garden(seed: u64) -> Garden<ReferencePlant, SmallRng> {
    let plants = vec![
        reference(2, 2, "basil"),
        reference(2, 4, "thyme"),
        reference(4, 3, "basil"),
        reference(5, 5, "thyme"),
        reference(7, 2, "basil"),
    ];
    let control = reference(0, 0, "basil");
    Garden::new(&config(10, 10), plants, control, SmallRng::seed_from_u64(seed)).unwrap()
}

fn coverage(garden: &Garden<ReferencePlant, SmallRng>) -> BTreeMap<GridPos, BTreeSet<PlantId>> {
    garden
        .enumerate_grid()
        .map(|(pos, cell)| (pos, cell.nearby().clone()))
        .collect()
}

#[test]
fn single_plant_first_timestep() {
    let control = Sprout::new(0, 0, 0.5, 0.25);
    let mut garden = Garden::new(
        &config(10, 10),
        vec![Sprout::new(5, 5, 0.5, 0.25)],
        control,
        SmallRng::seed_from_u64(1),
    )
    .unwrap();

    garden.perform_timestep(10.0, None);

    for (pos, cell) in garden.enumerate_grid() {
        if pos == GridPos::new(5, 5) {
            assert_eq!(cell.nearby(), &BTreeSet::from([PlantId(0)]));
        } else {
            assert!(cell.nearby().is_empty(), "unexpected coverage at {pos}");
        }
        assert_eq!(cell.water(), 8.0);
    }
}

#[test]
fn water_drawing_plant_lowers_only_its_cells() {
    let control = reference(0, 0, "basil");
    let mut garden = Garden::new(
        &config(10, 10),
        vec![reference(5, 5, "basil")],
        control,
        SmallRng::seed_from_u64(1),
    )
    .unwrap();

    garden.perform_timestep(10.0, None);

    let origin = garden.grid().get(GridPos::new(5, 5)).unwrap();
    assert!(origin.water() < 8.0);
    assert!(
        garden
            .enumerate_grid()
            .filter(|(pos, _)| *pos != GridPos::new(5, 5))
            .all(|(_, cell)| cell.water() == 8.0)
    );
}

#[test]
fn water_is_never_negative_or_added() {
    let mut garden = crowded_garden(9);
    for _ in 0..40 {
        garden.perform_timestep(3.0, None);
        for (_, cell) in garden.enumerate_grid() {
            assert!(cell.water() >= 0.0);
            assert!(cell.water() <= 1.0);
        }
    }
}

#[test]
fn coverage_only_grows() {
    let mut garden = crowded_garden(3);
    let mut previous = coverage(&garden);
    for _ in 0..25 {
        garden.perform_timestep(4.0, None);
        let current = coverage(&garden);
        for (pos, before) in &previous {
            assert!(before.is_subset(current.get(pos).unwrap()), "coverage shrank at {pos}");
        }
        previous = current;
    }
    let covered: usize = previous.values().filter(|s| !s.is_empty()).count();
    assert!(covered > 5);
}

#[test]
fn one_sunlight_point_per_covered_cell() {
    let mut garden = crowded_garden(5);
    for _ in 0..20 {
        let covered = garden
            .enumerate_grid()
            .filter(|(_, cell)| !cell.nearby().is_empty())
            .count();
        garden.perform_timestep(4.0, None);
        assert_eq!(garden.last_report().unwrap().sunlight_points, covered);
    }
}

#[test]
fn one_plant_per_origin() {
    let mut garden = crowded_garden(1);
    let before = garden.registry().len();
    assert_eq!(garden.add_plant(reference(2, 2, "thyme")).unwrap(), None);
    assert_eq!(garden.registry().len(), before);
    assert_eq!(garden.registry().type_slot(PlantId(0)), Some(0));
    assert!(garden.add_plant(reference(9, 9, "thyme")).unwrap().is_some());
}

#[test]
fn unsupported_type_is_rejected() {
    let mut garden = crowded_garden(1);
    assert!(garden.add_plant(reference(9, 9, "kale")).is_err());
    assert!(garden.add_plant(reference(10, 0, "basil")).is_err());
}

#[test]
fn get_state_is_idempotent() {
    let mut garden = crowded_garden(2);
    for _ in 0..5 {
        garden.perform_timestep(4.0, None);
    }
    let first = garden.get_state();
    let second = garden.get_state();
    assert_eq!(first, second);
    assert_eq!(first.dim(), (10, 10, 3));
}

#[test]
fn same_seed_same_run() {
    let mut a = crowded_garden(77);
    let mut b = crowded_garden(77);
    for _ in 0..30 {
        a.perform_timestep(2.5, None);
        b.perform_timestep(2.5, None);
    }
    assert_eq!(a.get_state(), b.get_state());
    assert_eq!(coverage(&a), coverage(&b));
    let heights_a: Vec<f64> = a.plants().map(|p| p.state().height).collect();
    let heights_b: Vec<f64> = b.plants().map(|p| p.state().height).collect();
    assert_eq!(heights_a, heights_b);
    assert_eq!(a.events(), b.events());
}

#[test]
fn full_rescan_fills_skipped_rings() {
    let build = |full_rescan: bool| {
        let mut cfg = config(12, 12);
        cfg.full_rescan_on_multi_ring = full_rescan;
        let control = Sprout::new(0, 0, 0.0, 0.0);
        let mut garden = Garden::new(
            &cfg,
            vec![Sprout::new(6, 6, 1.0, 3.0)],
            control,
            SmallRng::seed_from_u64(0),
        )
        .unwrap();
        garden.perform_timestep(1.0, None);
        garden
    };

    let perimeter = build(false);
    let full = build(true);

    let inner = GridPos::new(6, 5);
    assert!(!perimeter.grid().get(inner).unwrap().nearby().contains(&PlantId(0)));
    assert!(full.grid().get(inner).unwrap().nearby().contains(&PlantId(0)));
    assert_eq!(full.plant(PlantId(0)).unwrap().state().num_grid_points, 29);
}
