//! Edge enumeration for the threshold model (`T = 0`) on top of a
//! radius-layer partition.
//!
//! Two points are adjacent iff their hyperbolic distance is below `R`. For a
//! point `u` and a layer `L`, every neighbour of `u` in `L` lies within the
//! angle `θ(r_u, L.r_min)` of `u`, since the connecting angle shrinks as the
//! second radius grows. Only the cells of `L` overlapping that window are
//! scanned.

use std::f64::consts::{PI, TAU};

use crate::concurrency::{static_chunk, EdgeSink, Workers};
use crate::edge::{Edge, Node};
use crate::partition::{angle, Point, RadiusLayer};

/// Widening of the angular window against rounding in `acos`.
const ANGLE_SLACK: f64 = 1e-9;

/// Precomputed hyperbolic and trigonometric terms of one point.
#[derive(Copy, Clone, Debug, Default)]
struct Trig {
    cosh_r: f64,
    sinh_r: f64,
    cos_phi: f64,
    sin_phi: f64,
}

impl Trig {
    #[inline]
    fn new(radius: f64, angle: f64) -> Self {
        Self {
            cosh_r: radius.cosh(),
            sinh_r: radius.sinh(),
            cos_phi: angle.cos(),
            sin_phi: angle.sin(),
        }
    }

    /// `cosh` of the hyperbolic distance between the two points.
    #[inline]
    fn cosh_distance(&self, other: &Self) -> f64 {
        self.cosh_r * other.cosh_r
            - self.sinh_r
                * other.sinh_r
                * (self.cos_phi * other.cos_phi + self.sin_phi * other.sin_phi)
    }
}

/// Threshold edge enumeration over the layers of one partition.
pub struct ThresholdTraversal<'a> {
    layers: &'a [RadiusLayer],
    radius: f64,
    cosh_radius: f64,
    /// Indexed like the partition's sorted point array.
    trig: Vec<Trig>,
}

impl<'a> ThresholdTraversal<'a> {
    /// Prepares the traversal of `layers`, which must all come from one
    /// partition of a disk with radius `radius`.
    pub fn new(layers: &'a [RadiusLayer], radius: f64, workers: &Workers) -> Self {
        let trig = layers.first().map_or_else(Vec::new, |layer| {
            workers.map_collect(layer.storage().points(), |_, p| Trig::new(p.radius, p.angle))
        });
        Self {
            layers,
            radius,
            cosh_radius: radius.cosh(),
            trig,
        }
    }

    /// Number of points in the partition.
    pub fn num_points(&self) -> usize {
        self.trig.len()
    }

    fn points(&self) -> &[Point] {
        match self.layers.first() {
            Some(layer) => layer.storage().points(),
            None => &[],
        }
    }

    /// Emits every edge `{u, v}` with `u < v` whose smaller endpoint lies in
    /// the `worker`-th of `num_workers` contiguous slices of the sorted points.
    pub fn visit_worker<S: EdgeSink + ?Sized>(&self, worker: usize, num_workers: usize, sink: &mut S) {
        for index in static_chunk(self.num_points(), num_workers, worker) {
            self.visit_point(index, sink);
        }
    }

    /// Emits every edge of the partition.
    pub fn visit_all<S: EdgeSink + ?Sized>(&self, sink: &mut S) {
        self.visit_worker(0, 1, sink);
    }

    fn visit_point<S: EdgeSink + ?Sized>(&self, index: usize, sink: &mut S) {
        let points = self.points();
        let u = &points[index];
        let tu = &self.trig[index];

        for layer in self.layers {
            let layer_points = layer.point_range();
            if layer_points.is_empty() {
                continue;
            }

            let window = angle::max_connecting_angle(u.radius, layer.r_min(), self.radius)
                .map(|theta| theta + ANGLE_SLACK)
                .filter(|&theta| theta < PI && 2.0 * theta + angle::cell_width(layer.level()) < TAU);

            match window {
                None => self.scan(u, tu, layer_points, sink),
                Some(theta) => {
                    let cells = layer.num_cells();
                    let first = layer.cell_for_angle((u.angle - theta).rem_euclid(TAU));
                    let last = layer.cell_for_angle((u.angle + theta).rem_euclid(TAU));
                    let count = (last + cells - first) % cells + 1;
                    for step in 0..count {
                        let cell = (first + step) % cells;
                        self.scan(u, tu, layer.cell_range(cell), sink);
                    }
                }
            }
        }
    }

    #[inline]
    fn scan<S: EdgeSink + ?Sized>(
        &self,
        u: &Point,
        tu: &Trig,
        candidates: std::ops::Range<usize>,
        sink: &mut S,
    ) {
        let points = self.points();
        for index in candidates {
            let v = &points[index];
            if u.id < v.id && tu.cosh_distance(&self.trig[index]) < self.cosh_radius {
                sink.add_edge(u.id, v.id);
            }
        }
    }
}

/// All edges of the threshold graph on `(radii[i], angles[i])`, found by
/// testing every pair. Quadratic; meant as a reference for small inputs.
///
/// # Panics
/// Panics if the slices differ in length.
#[allow(clippy::cast_possible_truncation)]
pub fn naive_edges(radii: &[f64], angles: &[f64], radius: f64) -> Vec<Edge> {
    assert_eq!(radii.len(), angles.len(), "radii and angles differ in length");
    let trig: Vec<Trig> = radii
        .iter()
        .zip(angles)
        .map(|(&r, &phi)| Trig::new(r, phi))
        .collect();
    let cosh_radius = radius.cosh();

    let mut edges = Vec::new();
    for (u, tu) in trig.iter().enumerate() {
        for (v, tv) in trig.iter().enumerate().skip(u + 1) {
            if tu.cosh_distance(tv) < cosh_radius {
                edges.push(Edge(u as Node, v as Node));
            }
        }
    }
    edges
}
