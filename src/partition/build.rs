//! Parallel construction of the radius-layer partition.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::layer::{PartitionStorage, RadiusLayer};
use super::plan::LayerPlan;
use super::point::Point;
use super::sort::sort_by_bounded_key;
use crate::concurrency::Workers;
use crate::timer::ScopedTimer;

/// Marks table slots of empty cells until the gap repair resolves them.
const GAP: u32 = u32::MAX;

/// Buckets the points `(radii[i], angles[i])` into radial layers and angular
/// cells.
///
/// Returns the layers from the outermost inwards; innermost layers without
/// any point are dropped. All layers share one sorted point array and one
/// cell → point table.
///
/// # Panics
/// Panics if the slices differ in length, if there are `u32::MAX` points or
/// more, or if `radius` and `layer_height` are invalid (see
/// [`LayerPlan::new`]). Radii outside `[0, radius)` and angles outside
/// `[0, 2π)` are only caught by debug builds.
///
/// ```
/// use hyperlayer::{build_partition, Workers};
///
/// let radii = [0.5, 3.2, 9.9, 9.1];
/// let angles = [0.1, 2.0, 4.0, 6.2];
/// let layers = build_partition(&radii, &angles, 10.0, 1.0, &Workers::sequential());
///
/// let total: usize = layers.iter().map(|layer| layer.points().len()).sum();
/// assert_eq!(total, 4);
/// assert!(layers.windows(2).all(|w| w[0].level() >= w[1].level()));
/// ```
pub fn build_partition(
    radii: &[f64],
    angles: &[f64],
    radius: f64,
    layer_height: f64,
    workers: &Workers,
) -> Vec<RadiusLayer> {
    assert_eq!(radii.len(), angles.len(), "radii and angles differ in length");
    let n = radii.len();
    assert!(
        u32::try_from(n).is_ok_and(|n| n < GAP),
        "{n} points exceed the 32-bit id range"
    );

    let plan = LayerPlan::new(radius, layer_height);
    if n == 0 {
        return Vec::new();
    }

    let mut points = {
        let _timer = ScopedTimer::new("classify points");
        classify(&plan, radii, angles, workers)
    };

    {
        let _timer = ScopedTimer::new("sort points");
        sort_by_bounded_key(&mut points, |p| p.cell_id, plan.max_cell_id() + 1, workers);
        debug_assert!(points.is_sorted_by_key(|p| p.cell_id));
    }

    let num_layers = plan.occupied_layers(points[0].cell_id);
    if num_layers < plan.num_layers() {
        crate::log::debug!(
            planned = plan.num_layers(),
            kept = num_layers,
            "pruned empty inner layers"
        );
    }

    let first_point_in_cell = {
        let _timer = ScopedTimer::new("find first point in cell");
        let mut table = mark_cell_starts(&points, plan.max_cell_id(), workers);
        repair_gaps(&mut table, workers);
        #[cfg(debug_assertions)]
        check_prefix_table(&points, &table);
        table
    };

    let _timer = ScopedTimer::new("build layers");
    let storage = Arc::new(PartitionStorage::new(points, first_point_in_cell));
    (0..num_layers)
        .map(|layer| {
            RadiusLayer::new(
                plan.r_min(layer),
                plan.r_max(layer),
                plan.level(layer),
                plan.first_cell(layer),
                Arc::clone(&storage),
            )
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn classify(plan: &LayerPlan, radii: &[f64], angles: &[f64], workers: &Workers) -> Vec<Point> {
    workers.map_collect(radii, |i, &r| {
        let angle = angles[i];
        debug_assert!(
            (0.0..plan.radius()).contains(&r),
            "radius {r} of point {i} outside [0, {})",
            plan.radius()
        );
        debug_assert!(
            (0.0..std::f64::consts::TAU).contains(&angle),
            "angle {angle} of point {i} outside [0, 2π)"
        );
        Point::new(i as u32, r, angle, plan.cell_of(r, angle))
    })
}

/// Allocates the `max_cell_id + 1` slot table and stores, for every occupied
/// cell, the index of its first point. Empty cells are left as [`GAP`].
#[allow(clippy::cast_possible_truncation)]
fn mark_cell_starts(points: &[Point], max_cell_id: u32, workers: &Workers) -> Vec<u32> {
    let len = max_cell_id as usize + 1;
    let table: Vec<AtomicU32> = (0..len).map(|_| AtomicU32::new(GAP)).collect();

    table[max_cell_id as usize].store(points.len() as u32, Ordering::Relaxed);
    table[points[0].cell_id as usize].store(0, Ordering::Relaxed);

    // Every occupied cell has exactly one first point, so the stores never
    // collide.
    workers.for_each_index(1..points.len(), |i| {
        let cell = points[i].cell_id;
        if points[i - 1].cell_id != cell {
            table[cell as usize].store(i as u32, Ordering::Relaxed);
        }
    });

    table.into_iter().map(AtomicU32::into_inner).collect()
}

/// Replaces every gap with its nearest non-gap successor.
///
/// The last slot is never a gap. The slots before it are cut into one
/// contiguous chunk per worker; the last slot of each chunk is first resolved
/// sequentially by scanning ahead, after which every chunk can be repaired
/// independently from right to left.
fn repair_gaps(table: &mut [u32], workers: &Workers) {
    let max = table.len() - 1;
    debug_assert_ne!(table[max], GAP);
    if max == 0 {
        return;
    }
    let chunk_len = max.div_ceil(workers.count()).max(1);

    for chunk_end in (1..=max.div_ceil(chunk_len)).map(|k| (k * chunk_len).min(max)) {
        let last = chunk_end - 1;
        if table[last] == GAP {
            if let Some(resolved) = table[chunk_end..].iter().copied().find(|&v| v != GAP) {
                table[last] = resolved;
            }
        }
    }

    let cells = &mut table[..max];
    workers.for_each_chunk_mut(cells, chunk_len, |_, chunk| {
        for i in (0..chunk.len().saturating_sub(1)).rev() {
            chunk[i] = chunk[i].min(chunk[i + 1]);
        }
    });
}

#[cfg(debug_assertions)]
fn check_prefix_table(points: &[Point], table: &[u32]) {
    let max = table.len() - 1;
    debug_assert_eq!(table[0], 0);
    debug_assert_eq!(table[max] as usize, points.len());
    debug_assert!(table.is_sorted());
    debug_assert!(points.last().is_some_and(|p| (p.cell_id as usize) < max));
    for (cell, bounds) in table.windows(2).enumerate() {
        let range = bounds[0] as usize..bounds[1] as usize;
        debug_assert!(points[range].iter().all(|p| p.cell_id as usize == cell));
    }
}
