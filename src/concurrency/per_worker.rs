//! Cache-padded per-worker slots.
//!
//! Each worker owns one slot for the lifetime of a parallel region. Slots are
//! wrapped in [`CachePadded`] so that neighbouring workers never write to the
//! same cache line, which removes false sharing between counters or buffers
//! that are otherwise completely independent.

use core::fmt;
use core::ops::AddAssign;

use crossbeam_utils::CachePadded;
use num_traits::Zero;

use super::Workers;

/// One cache-padded value per worker.
pub struct PerWorker<T> {
    slots: Box<[CachePadded<T>]>,
}

impl<T> PerWorker<T> {
    /// Creates `workers` slots initialised by `init(worker)`.
    ///
    /// # Panics
    /// Panics if `workers == 0`.
    pub fn new_with(workers: usize, mut init: impl FnMut(usize) -> T) -> Self {
        assert!(workers > 0, "PerWorker needs at least one slot");
        Self {
            slots: (0..workers).map(|w| CachePadded::new(init(w))).collect(),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; a `PerWorker` has at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Shared access to `worker`'s slot.
    ///
    /// # Panics
    /// Panics if `worker >= self.len()`.
    #[inline]
    pub fn get(&self, worker: usize) -> &T {
        &self.slots[worker]
    }

    /// Exclusive access to `worker`'s slot.
    ///
    /// # Panics
    /// Panics if `worker >= self.len()`.
    #[inline]
    pub fn get_mut(&mut self, worker: usize) -> &mut T {
        &mut self.slots[worker]
    }

    /// Iterates over the slots in worker order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().map(|slot| &**slot)
    }

    /// Iterates mutably over the slots in worker order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().map(|slot| &mut **slot)
    }

    /// Unwraps the slots, dropping the padding.
    pub fn into_vec(self) -> Vec<T> {
        self.slots
            .into_vec()
            .into_iter()
            .map(CachePadded::into_inner)
            .collect()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [CachePadded<T>] {
        &mut self.slots
    }
}

impl<T: Default> PerWorker<T> {
    /// Creates `workers` default-initialised slots.
    ///
    /// # Panics
    /// Panics if `workers == 0`.
    pub fn new(workers: usize) -> Self {
        Self::new_with(workers, |_| T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for PerWorker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// A counter split into one padded slot per worker.
///
/// Workers add into their own slot without synchronization; the total is a
/// sequential reduction over all slots once the workers are done. Exclusive
/// slot ownership is enforced by the borrow checker: concurrent updates go
/// through [`Workers::for_each_worker`] on [`PaddedAccumulator::per_worker_mut`].
///
/// ```
/// use hyperlayer::{PaddedAccumulator, Workers};
///
/// let workers = Workers::new(4).unwrap();
/// let mut edges = PaddedAccumulator::<u64>::for_workers(&workers);
/// workers.for_each_worker(edges.per_worker_mut(), |worker, slot| {
///     *slot += worker as u64 + 1;
/// });
/// assert_eq!(edges.total(), 1 + 2 + 3 + 4);
/// ```
pub struct PaddedAccumulator<T> {
    slots: PerWorker<T>,
}

impl<T> PaddedAccumulator<T>
where
    T: Copy + Zero + AddAssign,
{
    /// Creates an accumulator with `workers` zeroed slots.
    ///
    /// # Panics
    /// Panics if `workers == 0`.
    pub fn new(workers: usize) -> Self {
        Self {
            slots: PerWorker::new_with(workers, |_| T::zero()),
        }
    }

    /// Creates an accumulator with one slot per worker of `workers`.
    pub fn for_workers(workers: &Workers) -> Self {
        Self::new(workers.count())
    }

    /// Number of slots.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.slots.len()
    }

    /// Adds `delta` to `worker`'s slot.
    ///
    /// # Panics
    /// Panics if `worker >= self.num_workers()`.
    #[inline]
    pub fn add(&mut self, worker: usize, delta: T) {
        *self.slots.get_mut(worker) += delta;
    }

    /// Current value of `worker`'s slot.
    #[inline]
    pub fn get(&self, worker: usize) -> T {
        *self.slots.get(worker)
    }

    /// Sum over all slots.
    pub fn total(&self) -> T {
        self.slots.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    /// The underlying slots, for handing out to a parallel region.
    pub fn per_worker_mut(&mut self) -> &mut PerWorker<T> {
        &mut self.slots
    }
}

impl<T: fmt::Debug> fmt::Debug for PaddedAccumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedAccumulator")
            .field("slots", &self.slots)
            .finish()
    }
}
