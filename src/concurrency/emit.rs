//! Parallel edge emission with per-worker block buffers.
//!
//! Every worker appends edges to a private buffer. Once the buffer holds a
//! full block it is appended to the shared result under a mutex and reused,
//! so the lock is taken once per block instead of once per edge. Partial
//! buffers are flushed after the parallel region has joined.

use std::sync::{Mutex, PoisonError};

use super::{PaddedAccumulator, PerWorker, Workers};
use crate::edge::{Edge, Node};

/// Edges buffered per worker before a flush into the shared result.
pub const DEFAULT_BLOCK_SIZE: usize = 1 << 20;

/// Receives the edges discovered by one worker.
pub trait EdgeSink {
    /// Records the undirected edge `{u, v}`.
    fn add_edge(&mut self, u: Node, v: Node);
}

/// Per-worker sink that buffers edges and flushes full blocks into the shared
/// result.
pub struct WorkerSink<'a> {
    worker: usize,
    num_workers: usize,
    block_size: usize,
    buffer: &'a mut Vec<Edge>,
    shared: &'a Mutex<Vec<Edge>>,
}

impl WorkerSink<'_> {
    /// Index of the worker owning this sink.
    #[inline]
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Number of workers participating in the emission.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Edges currently waiting in the local buffer.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn flush(&mut self) {
        append_locked(self.shared, self.buffer);
    }
}

impl EdgeSink for WorkerSink<'_> {
    #[inline]
    fn add_edge(&mut self, u: Node, v: Node) {
        self.buffer.push(Edge(u, v));
        if self.buffer.len() >= self.block_size {
            self.flush();
        }
    }
}

/// Per-worker sink that only counts edges.
pub struct CountingSink<'a> {
    worker: usize,
    num_workers: usize,
    count: &'a mut u64,
}

impl CountingSink<'_> {
    /// Index of the worker owning this sink.
    #[inline]
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Number of workers participating in the count.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }
}

impl EdgeSink for CountingSink<'_> {
    #[inline]
    fn add_edge(&mut self, _u: Node, _v: Node) {
        *self.count += 1;
    }
}

/// Moves every edge of `batch` to the end of `shared`, leaving `batch` empty
/// with its capacity intact.
fn append_locked(shared: &Mutex<Vec<Edge>>, batch: &mut Vec<Edge>) {
    if batch.is_empty() {
        return;
    }
    let mut result = shared.lock().unwrap_or_else(PoisonError::into_inner);
    result.append(batch);
}

/// Runs `produce` once per worker and gathers every edge it emits.
///
/// Edges of a single flushed block stay contiguous and in emission order;
/// blocks of different workers interleave in lock acquisition order, so the
/// overall order is unspecified. No edge is lost or duplicated.
///
/// # Panics
/// Panics if `block_size == 0`.
pub fn emit_edges<F>(workers: &Workers, block_size: usize, produce: F) -> Vec<Edge>
where
    F: Fn(&mut WorkerSink<'_>) + Sync + Send,
{
    assert!(block_size > 0, "block_size must be positive");

    let num_workers = workers.count();
    let shared = Mutex::new(Vec::new());
    let mut buffers = PerWorker::new_with(num_workers, |_| Vec::with_capacity(block_size.min(1 << 16)));

    workers.for_each_worker(&mut buffers, |worker, buffer| {
        let mut sink = WorkerSink {
            worker,
            num_workers,
            block_size,
            buffer,
            shared: &shared,
        };
        produce(&mut sink);
    });

    for buffer in buffers.iter_mut() {
        append_locked(&shared, buffer);
    }

    let edges = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    crate::log::debug!(edges = edges.len(), workers = num_workers, "edge emission finished");
    edges
}

/// Runs `produce` once per worker and returns the number of edges it emits.
pub fn count_edges<F>(workers: &Workers, produce: F) -> u64
where
    F: Fn(&mut CountingSink<'_>) + Sync + Send,
{
    let num_workers = workers.count();
    let mut counter = PaddedAccumulator::<u64>::for_workers(workers);
    workers.for_each_worker(counter.per_worker_mut(), |worker, count| {
        let mut sink = CountingSink {
            worker,
            num_workers,
            count,
        };
        produce(&mut sink);
    });
    counter.total()
}
