//! Generator configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! parameters it changes:
//!
//! ```
//! use hyperlayer::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_json(r#"{ "nodes": 5000, "avg_deg": 8.0 }"#).unwrap();
//! assert_eq!(config.nodes, 5000);
//! assert_eq!(config.alpha, 1.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::concurrency::DEFAULT_BLOCK_SIZE;
use crate::error::ConfigError;
use crate::partition::LayerPlan;

/// Parameters of a threshold hyperbolic random graph and of its generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes.
    pub nodes: usize,
    /// Radial dispersion; the degree distribution follows a power law with
    /// exponent `2 * alpha + 1`.
    pub alpha: f64,
    /// Target average degree, used to derive the disk radius when `radius`
    /// is not set.
    pub avg_deg: f64,
    /// Explicit disk radius; overrides `avg_deg`.
    pub radius: Option<f64>,
    /// Height of one radial layer of the spatial partition.
    pub layer_height: f64,
    /// Seed for the coordinate samplers.
    pub seed: u64,
    /// Worker count; the available parallelism when unset.
    pub workers: Option<usize>,
    /// Edges buffered per worker before they are merged into the result.
    pub block_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 10_000,
            alpha: 1.0,
            avg_deg: 10.0,
            radius: None,
            layer_height: 1.0,
            seed: 0,
            workers: None,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// [`ConfigError::Json`] if the document is malformed. The result is not
    /// validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the number of nodes.
    #[must_use]
    pub fn nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Sets the radial dispersion.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the target average degree and clears an explicit radius.
    #[must_use]
    pub fn avg_deg(mut self, avg_deg: f64) -> Self {
        self.avg_deg = avg_deg;
        self.radius = None;
        self
    }

    /// Sets an explicit disk radius.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the layer height.
    #[must_use]
    pub fn layer_height(mut self, layer_height: f64) -> Self {
        self.layer_height = layer_height;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the per-worker edge block size.
    #[must_use]
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Checks every parameter against its valid range.
    ///
    /// # Errors
    /// The first violated constraint, as [`ConfigError`].
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(name: &'static str, value: f64, expected: &'static str) -> ConfigError {
            ConfigError::InvalidParameter {
                name,
                value,
                expected,
            }
        }

        if !matches!(u32::try_from(self.nodes), Ok(n) if n < u32::MAX) {
            return Err(ConfigError::TooManyNodes(self.nodes));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(invalid("alpha", self.alpha, "a positive number"));
        }
        if !(self.layer_height.is_finite() && self.layer_height > 0.0) {
            return Err(invalid("layer_height", self.layer_height, "a positive number"));
        }
        match self.radius {
            Some(radius) => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(invalid("radius", radius, "a positive number"));
                }
                check_layer_count(radius, self.layer_height)?;
            }
            None => {
                if self.alpha <= 0.5 {
                    return Err(invalid(
                        "alpha",
                        self.alpha,
                        "a value above 0.5 when the radius is derived from avg_deg",
                    ));
                }
                if !(self.avg_deg > 0.0 && self.avg_deg < self.nodes as f64) {
                    return Err(invalid("avg_deg", self.avg_deg, "a value in (0, nodes)"));
                }
            }
        }
        if self.block_size == 0 {
            return Err(invalid("block_size", 0.0, "at least 1"));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Rejects layer heights that cut a disk of `radius` into more cells than
/// 32-bit ranks can address. Heights above the radius are capped to it.
pub(crate) fn check_layer_count(radius: f64, layer_height: f64) -> Result<(), ConfigError> {
    if LayerPlan::try_new(radius, layer_height.min(radius)).is_none() {
        return Err(ConfigError::InvalidParameter {
            name: "layer_height",
            value: layer_height,
            expected: "a height whose layers fit into 32-bit cell ranks",
        });
    }
    Ok(())
}
