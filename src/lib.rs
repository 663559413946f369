//! # `hyperlayer` - Parallel Spatial Partitioning for Hyperbolic Random Graphs
//!
//! Building blocks for generating large threshold hyperbolic random graphs on
//! many cores, plus a generator that wires them together.
//!
//! ## Key Features
//!
//! - **Morton interleaving**: bitwise, shift-and-mask and bit-deposit
//!   strategies that produce identical codes for 2 and 4 dimensions.
//! - **Radius-layer partition**: points are bucketed into concentric layers,
//!   each split into equal angular cells, with a prefix table that maps every
//!   cell to its slice of one globally sorted point array.
//! - **Padded per-worker state**: one cache line per worker, so concurrent
//!   counters never share a line.
//! - **Block-buffered edge emission**: workers fill private buffers and merge
//!   full blocks into the result under a lock taken once per block.
//!
//! ## Architecture
//!
//! Every parallel phase is a fork-join region on a [`Workers`] pool. A region
//! returns only after all of its tasks finished, which is the only
//! synchronization the algorithms rely on. With the `parallel` feature
//! disabled, every region runs on the calling thread.
//!
//! Layers are ordered from the rim inwards; cell ranks grow from the center
//! outwards, so the innermost layer owns ranks `0..`.
//!
//! ## Example
//!
//! ```rust
//! use hyperlayer::{build_partition, Workers};
//!
//! let workers = Workers::new(2).unwrap();
//! let radii = [0.3, 2.5, 4.2, 4.8];
//! let angles = [0.0, 1.0, 3.0, 5.0];
//! let layers = build_partition(&radii, &angles, 5.0, 1.0, &workers);
//!
//! let outermost = &layers[0];
//! assert_eq!(outermost.r_max(), 5.0);
//! assert_eq!(outermost.points().len(), 2);
//! assert_eq!(layers.last().unwrap().r_min(), 0.0);
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature (on by default), phases are instrumented with
//! `tracing` spans and events at `debug` level and the generator reports a
//! summary at `info`. Install any subscriber to see them. Without the
//! feature, logging compiles away.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod log;

pub mod concurrency;
pub mod config;
pub mod edge;
pub mod error;
pub mod hyperbolic;
pub mod interleave;
pub mod partition;

mod timer;

pub use concurrency::{
    count_edges, emit_edges, CountingSink, EdgeSink, PaddedAccumulator, PerWorker, WorkerSink, Workers,
    DEFAULT_BLOCK_SIZE,
};
pub use config::GeneratorConfig;
pub use edge::{Edge, Node};
pub use error::ConfigError;
pub use hyperbolic::{HyperbolicGenerator, HyperbolicGraph, ThresholdTraversal};
pub use interleave::{interleave, InterleaveStrategy};
pub use partition::{build_partition, LayerPlan, PartitionStorage, Point, RadiusLayer};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Edges are two packed 32-bit ids.
    assert!(mem::size_of::<Edge>() == 8);

    // Sorted point records stay at three words.
    assert!(mem::size_of::<Point>() == 24);
};
