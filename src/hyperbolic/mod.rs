//! Threshold hyperbolic random graphs.
//!
//! Nodes are placed on a hyperbolic disk of radius `R`: angles uniformly,
//! radii with density proportional to `sinh(alpha * r)`. Two nodes are
//! adjacent iff their hyperbolic distance is below `R`. The radius-layer
//! partition keeps the candidate set of every node close to its actual
//! neighbourhood.

mod generator;
mod model;
mod sampling;
mod threshold;

pub use generator::{HyperbolicGenerator, HyperbolicGraph};
pub use model::{approximate_radius, expected_degree, hyperbolic_distance, target_radius};
pub use sampling::{sample_angles, sample_radii};
pub use threshold::{naive_edges, ThresholdTraversal};
