//! End-to-end generation of threshold hyperbolic random graphs.

use crate::concurrency::{count_edges, emit_edges, Workers};
use crate::config::{check_layer_count, GeneratorConfig};
use crate::edge::Edge;
use crate::error::ConfigError;
use crate::partition::build_partition;
use crate::timer::ScopedTimer;

use super::model::target_radius;
use super::sampling::{sample_angles, sample_radii};
use super::threshold::ThresholdTraversal;

/// A generated graph together with the coordinates of its nodes.
#[derive(Clone, Debug)]
pub struct HyperbolicGraph {
    /// Radius of the disk the nodes were placed on.
    pub radius: f64,
    /// Radial coordinate of every node, indexed by node id.
    pub radii: Vec<f64>,
    /// Angular coordinate of every node, indexed by node id.
    pub angles: Vec<f64>,
    /// Undirected edges `(u, v)` with `u < v`, in unspecified order.
    pub edges: Vec<Edge>,
}

impl HyperbolicGraph {
    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.radii.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Average degree `2m / n`; zero for an empty graph.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_degree(&self) -> f64 {
        if self.radii.is_empty() {
            0.0
        } else {
            2.0 * self.edges.len() as f64 / self.radii.len() as f64
        }
    }
}

/// Samples node coordinates and enumerates the edges of the resulting
/// threshold hyperbolic graph.
///
/// ```
/// use hyperlayer::{GeneratorConfig, HyperbolicGenerator};
///
/// let config = GeneratorConfig::new().nodes(2000).avg_deg(8.0).seed(3).workers(2);
/// let graph = HyperbolicGenerator::new(config).unwrap().generate();
/// assert_eq!(graph.num_nodes(), 2000);
/// assert!(graph.edges.iter().all(|e| e.0 < e.1));
/// ```
#[derive(Clone, Debug)]
pub struct HyperbolicGenerator {
    config: GeneratorConfig,
    radius: f64,
    workers: Workers,
}

impl HyperbolicGenerator {
    /// Validates `config`, derives the disk radius and builds the worker pool.
    ///
    /// # Errors
    /// Any [`ConfigError`] raised by validation, by the radius search or by
    /// the pool construction.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let workers = match config.workers {
            Some(count) => Workers::new(count)?,
            None => Workers::available()?,
        };
        Self::with_workers(config, workers)
    }

    /// Like [`HyperbolicGenerator::new`], but runs on an existing pool and
    /// ignores `config.workers`.
    ///
    /// # Errors
    /// Any [`ConfigError`] raised by validation or by the radius search.
    pub fn with_workers(config: GeneratorConfig, workers: Workers) -> Result<Self, ConfigError> {
        config.validate()?;
        let radius = match config.radius {
            Some(radius) => radius,
            None => {
                let radius = target_radius(config.nodes, config.avg_deg, config.alpha)?;
                check_layer_count(radius, config.layer_height)?;
                radius
            }
        };
        crate::log::debug!(
            nodes = config.nodes,
            alpha = config.alpha,
            radius,
            workers = workers.count(),
            "generator configured"
        );
        Ok(Self {
            config,
            radius,
            workers,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The pool generation runs on.
    pub fn workers(&self) -> &Workers {
        &self.workers
    }

    /// Radius of the hyperbolic disk.
    pub fn disk_radius(&self) -> f64 {
        self.radius
    }

    fn coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        let _timer = ScopedTimer::new("sample coordinates");
        let config = &self.config;
        let radii = sample_radii(config.nodes, config.alpha, self.radius, config.seed, &self.workers);
        let angles = sample_angles(config.nodes, config.seed.wrapping_add(1), &self.workers);
        (radii, angles)
    }

    /// Samples the coordinates and emits every edge.
    ///
    /// The result depends only on the configuration, not on the number of
    /// workers, up to the order of `edges`.
    pub fn generate(&self) -> HyperbolicGraph {
        let _timer = ScopedTimer::new("generate");
        let (radii, angles) = self.coordinates();
        let layer_height = self.config.layer_height.min(self.radius);
        let layers = build_partition(&radii, &angles, self.radius, layer_height, &self.workers);

        let edges = {
            let _timer = ScopedTimer::new("emit edges");
            let traversal = ThresholdTraversal::new(&layers, self.radius, &self.workers);
            emit_edges(&self.workers, self.config.block_size, |sink| {
                traversal.visit_worker(sink.worker(), sink.num_workers(), sink);
            })
        };

        let graph = HyperbolicGraph {
            radius: self.radius,
            radii,
            angles,
            edges,
        };
        crate::log::info!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            average_degree = graph.average_degree(),
            layers = layers.len(),
            "graph generated"
        );
        graph
    }

    /// Samples the coordinates and counts the edges without storing them.
    pub fn count_edges(&self) -> u64 {
        let _timer = ScopedTimer::new("count edges");
        let (radii, angles) = self.coordinates();
        let layer_height = self.config.layer_height.min(self.radius);
        let layers = build_partition(&radii, &angles, self.radius, layer_height, &self.workers);
        let traversal = ThresholdTraversal::new(&layers, self.radius, &self.workers);
        count_edges(&self.workers, |sink| {
            traversal.visit_worker(sink.worker(), sink.num_workers(), sink);
        })
    }
}
