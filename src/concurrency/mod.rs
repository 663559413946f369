//! Worker pools, per-worker padded state and parallel edge emission.
//!
//! Parallel phases are plain fork-join regions on a [`Workers`] pool. Shared
//! state inside a region is either disjoint (`&mut` slices or per-worker slots)
//! or written with relaxed atomics whose results are only read after the
//! region joins.

pub mod emit;
pub mod per_worker;
pub mod workers;

pub use emit::{count_edges, emit_edges, CountingSink, EdgeSink, WorkerSink, DEFAULT_BLOCK_SIZE};
pub use per_worker::{PaddedAccumulator, PerWorker};
pub use workers::{static_chunk, Workers};
