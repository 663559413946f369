//! Radius-layer spatial partition of points in the hyperbolic disk.
//!
//! The disk of radius `R` is cut into concentric bands of height `h`. Each
//! band is split angularly into `2^level` cells, with finer levels towards the
//! boundary where points are dense and connect only over small angles. Every
//! cell of every band gets a global rank, all points are sorted by rank, and a
//! prefix table maps each rank to the half-open range of its points.
//!
//! ```text
//!   rank:   0 ............ first_cell(1) ............ first_cell(0) ...... max_cell_id
//!           | inner layers |        layer 1           |      layer 0       |
//!   first_point_in_cell[rank] -> index of the rank's first point in `points`
//! ```
//!
//! Building happens in phases separated by joins: plan, classify, sort, prune,
//! mark cell starts, repair gaps, instantiate layers.

pub mod angle;
mod build;
mod layer;
mod plan;
mod point;
pub mod sort;

#[cfg(test)]
mod tests;

pub use build::build_partition;
pub use layer::{PartitionStorage, RadiusLayer};
pub use plan::LayerPlan;
pub use point::Point;
