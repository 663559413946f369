//! Error types for the configurable surfaces of the crate.
//!
//! The partition builder and the interleaving primitives have no recoverable
//! error path: their preconditions are assertions. Everything that can fail
//! for reasons outside the caller's control (building a thread pool, parsing
//! or validating a generator configuration) reports a [`ConfigError`].

use std::fmt;

/// Errors raised while configuring workers or a graph generator.
#[derive(Debug)]
pub enum ConfigError {
    /// A worker pool was requested with zero workers.
    ZeroWorkers,

    /// The underlying thread pool could not be created.
    ThreadPool(String),

    /// A numeric parameter lies outside its valid range.
    InvalidParameter {
        /// Parameter name as it appears in [`GeneratorConfig`](crate::GeneratorConfig).
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human readable constraint that was violated.
        expected: &'static str,
    },

    /// The requested node count does not fit into 32-bit point ids.
    TooManyNodes(usize),

    /// No disk radius yields the requested average degree.
    UnreachableDegree {
        /// Number of nodes.
        nodes: usize,
        /// Requested average degree.
        avg_deg: f64,
        /// Radial dispersion parameter.
        alpha: f64,
    },

    /// The configuration could not be parsed.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWorkers => write!(f, "worker count must be at least 1"),
            ConfigError::ThreadPool(msg) => write!(f, "failed to build worker pool: {msg}"),
            ConfigError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(f, "invalid {name} = {value}: expected {expected}"),
            ConfigError::TooManyNodes(n) => {
                write!(f, "{n} nodes exceed the 32-bit point id range")
            }
            ConfigError::UnreachableDegree {
                nodes,
                avg_deg,
                alpha,
            } => write!(
                f,
                "no radius reaches average degree {avg_deg} for n = {nodes}, alpha = {alpha}"
            ),
            ConfigError::Json(err) => write!(f, "malformed configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}
