use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use super::*;
use crate::concurrency::Workers;

fn random_points(n: usize, radius: f64, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let radii = (0..n).map(|_| rng.random_range(0.0..radius)).collect();
    let angles = (0..n).map(|_| rng.random_range(0.0..TAU)).collect();
    (radii, angles)
}

fn cell_contents(layers: &[RadiusLayer]) -> Vec<Vec<Vec<u32>>> {
    layers
        .iter()
        .map(|layer| {
            (0..layer.num_cells())
                .map(|cell| {
                    let mut ids: Vec<u32> = layer.cell_points(cell).iter().map(|p| p.id).collect();
                    ids.sort_unstable();
                    ids
                })
                .collect()
        })
        .collect()
}

#[test]
fn plan_tiles_the_disk() {
    for (radius, height) in [(10.0, 1.0), (7.3, 2.0), (0.7, 0.1), (5.0, 5.0), (12.5, 0.3)] {
        let plan = LayerPlan::new(radius, height);
        let last = plan.num_layers() - 1;
        assert_eq!(plan.r_max(0), radius);
        assert_eq!(plan.r_min(last), 0.0);
        for layer in 0..last {
            assert_eq!(plan.r_min(layer), plan.r_max(layer + 1));
        }
        for layer in 0..=last {
            assert!(plan.r_min(layer) < plan.r_max(layer));
        }
    }
}

#[test]
fn plan_ranks_run_from_the_center() {
    let plan = LayerPlan::new(10.0, 1.0);
    assert_eq!(plan.num_layers(), 10);
    assert_eq!(plan.first_cell(9), 0);
    for layer in 0..9 {
        assert_eq!(
            plan.first_cell(layer),
            plan.first_cell(layer + 1) + angle::num_cells_in_level(plan.level(layer + 1))
        );
        assert!(plan.level(layer) >= plan.level(layer + 1));
    }
    assert_eq!(
        plan.max_cell_id(),
        plan.first_cell(0) + angle::num_cells_in_level(plan.level(0))
    );
    assert!(plan.level(0) > plan.level(9));
}

#[test]
fn single_layer_when_height_equals_radius() {
    let plan = LayerPlan::new(3.0, 3.0);
    assert_eq!(plan.num_layers(), 1);
    assert_eq!(plan.level(0), 0);
    assert_eq!(plan.max_cell_id(), 1);
}

#[test]
fn layer_boundaries_are_half_open() {
    let plan = LayerPlan::new(10.0, 1.0);
    for layer in 1..plan.num_layers() {
        let boundary = plan.r_max(layer);
        let below = f64::from_bits(boundary.to_bits() - 1);
        assert_eq!(plan.layer_of_radius(boundary), layer - 1);
        assert_eq!(plan.layer_of_radius(below), layer);
    }
    assert_eq!(plan.layer_of_radius(0.0), plan.num_layers() - 1);
    assert_eq!(plan.layer_of_radius(f64::from_bits(10f64.to_bits() - 1)), 0);
}

#[test]
fn layer_lookup_matches_bounds_for_awkward_heights() {
    let plan = LayerPlan::new(9.7, 0.3);
    for step in 0..9700 {
        let r = f64::from(step) * 0.001;
        let layer = plan.layer_of_radius(r);
        assert!(plan.r_min(layer) <= r && r < plan.r_max(layer), "r = {r}");
    }
}

#[test]
#[should_panic(expected = "layer height")]
fn layer_height_above_radius_is_rejected() {
    LayerPlan::new(1.0, 2.0);
}

#[test]
fn plans_beyond_32_bit_cell_ranks_are_refused() {
    assert!(LayerPlan::try_new(200.0, 0.1).is_none());
    let plan = LayerPlan::try_new(10.0, 1.0).unwrap();
    assert_eq!(plan.max_cell_id(), LayerPlan::new(10.0, 1.0).max_cell_id());
}

#[test]
#[should_panic(expected = "32-bit ranks")]
fn oversized_plan_panics() {
    LayerPlan::new(200.0, 0.1);
}

#[test]
fn occupied_layers_stop_at_the_innermost_point() {
    let plan = LayerPlan::new(10.0, 1.0);
    assert_eq!(plan.occupied_layers(plan.first_cell(0)), 1);
    assert_eq!(plan.occupied_layers(plan.first_cell(3) + 1), 4);
    assert_eq!(plan.occupied_layers(0), plan.num_layers());
}

#[test]
fn empty_input_yields_no_layers() {
    let layers = build_partition(&[], &[], 10.0, 1.0, &Workers::new(4).unwrap());
    assert!(layers.is_empty());
}

#[test]
fn single_point_at_the_center() {
    let layers = build_partition(&[0.0], &[1.0], 1.0, 1.0, &Workers::sequential());
    assert_eq!(layers.len(), 1);
    let layer = &layers[0];
    assert_eq!(layer.num_cells(), 1);
    assert_eq!(layer.storage().first_point_in_cell(), &[0, 1]);
    assert_eq!(layer.cell_range(0), 0..1);
    assert_eq!(layer.points()[0].id, 0);
}

#[test]
fn single_center_point_in_a_layered_disk() {
    let layers = build_partition(&[0.0], &[1.0], 10.0, 1.0, &Workers::sequential());
    let innermost = layers.last().unwrap();
    assert_eq!(innermost.r_min(), 0.0);
    assert_eq!(innermost.points().len(), 1);
    for layer in &layers[..layers.len() - 1] {
        assert!(layer.points().is_empty());
    }
}

#[test]
fn outer_points_prune_inner_layers() {
    let layers = build_partition(&[9.5, 8.2], &[0.0, 3.0], 10.0, 1.0, &Workers::sequential());
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].points().len(), 1);
    assert_eq!(layers[1].points().len(), 1);
    assert_eq!(layers[1].r_min(), 8.0);
}

#[test]
fn boundary_radius_lands_in_exactly_one_layer() {
    let radii = [9.0, 8.0, 5.0];
    let angles = [0.5, 0.5, 0.5];
    let layers = build_partition(&radii, &angles, 10.0, 1.0, &Workers::new(2).unwrap());
    for (id, &r) in radii.iter().enumerate() {
        let owners: Vec<&RadiusLayer> = layers
            .iter()
            .filter(|layer| layer.points().iter().any(|p| p.id as usize == id))
            .collect();
        assert_eq!(owners.len(), 1, "point {id}");
        assert_eq!(owners[0].r_min(), r);
    }
}

#[test]
fn all_points_in_one_cell() {
    let n = 1000;
    let radii = vec![9.5; n];
    let angles = vec![0.01; n];
    let layers = build_partition(&radii, &angles, 10.0, 1.0, &Workers::new(4).unwrap());
    assert_eq!(layers.len(), 1);
    let layer = &layers[0];
    assert_eq!(layer.cell_range(0), 0..n);
    for cell in 1..layer.num_cells() {
        assert!(layer.cell_range(cell).is_empty());
    }
    let table = layer.storage().first_point_in_cell();
    assert!(table[..=layer.first_cell_rank() as usize].iter().all(|&v| v == 0));
    assert!(table[layer.first_cell_rank() as usize + 1..].iter().all(|&v| v as usize == n));
}

#[test]
fn cells_hold_their_own_points() {
    let (radii, angles) = random_points(5000, 12.0, 7);
    let layers = build_partition(&radii, &angles, 12.0, 1.0, &Workers::new(4).unwrap());
    let total: usize = layers.iter().map(|layer| layer.points().len()).sum();
    assert_eq!(total, 5000);
    for layer in &layers {
        for cell in 0..layer.num_cells() {
            for p in layer.cell_points(cell) {
                assert_eq!(p.cell_id, layer.first_cell_rank() + cell);
                assert_eq!(layer.cell_for_angle(p.angle), cell);
                assert!(layer.r_min() <= p.radius && p.radius < layer.r_max());
                assert_eq!(radii[p.id as usize], p.radius);
                assert_eq!(angles[p.id as usize], p.angle);
            }
        }
    }
}

#[test]
fn worker_count_does_not_change_cells() {
    let (radii, angles) = random_points(3000, 9.0, 11);
    let reference = cell_contents(&build_partition(&radii, &angles, 9.0, 0.7, &Workers::sequential()));
    for workers in [2, 4, 7] {
        let layers = build_partition(&radii, &angles, 9.0, 0.7, &Workers::new(workers).unwrap());
        assert_eq!(cell_contents(&layers), reference, "{workers} workers");
    }
}

#[test]
fn layers_share_one_storage() {
    let (radii, angles) = random_points(100, 6.0, 3);
    let layers = build_partition(&radii, &angles, 6.0, 1.0, &Workers::sequential());
    assert!(layers.len() > 1);
    for layer in &layers[1..] {
        assert!(std::sync::Arc::ptr_eq(layer.storage(), layers[0].storage()));
    }
    assert_eq!(layers[0].storage().num_points(), 100);
}
