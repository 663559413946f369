//! Fixed-size worker pools and the fork-join loops that run on them.
//!
//! Every parallel region returns only after all of its tasks finished, so a
//! phase can rely on everything the previous phase wrote. A pool with a single
//! worker (and every pool when the `parallel` feature is disabled) runs each
//! region inline on the calling thread.

use core::fmt;
use core::num::NonZeroUsize;
use core::ops::Range;

#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::PerWorker;
use crate::error::ConfigError;

/// A fixed set of workers that data-parallel phases are scheduled on.
///
/// The worker count is an explicit parameter: it decides how many slots a
/// [`PerWorker`] needs, how the gap repair of the partition builder is
/// chunked, and how many threads the dedicated pool owns. Cloning is cheap and
/// shares the pool.
#[derive(Clone)]
pub struct Workers {
    count: NonZeroUsize,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Workers {
    /// A single worker that runs every region on the calling thread.
    pub fn sequential() -> Self {
        Self {
            count: NonZeroUsize::MIN,
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Builds a dedicated pool with exactly `count` threads.
    ///
    /// # Errors
    /// [`ConfigError::ZeroWorkers`] if `count == 0`, [`ConfigError::ThreadPool`]
    /// if the operating system refuses to spawn the threads.
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        let count = NonZeroUsize::new(count).ok_or(ConfigError::ZeroWorkers)?;
        if count == NonZeroUsize::MIN {
            return Ok(Self::sequential());
        }

        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(count.get())
                .thread_name(|i| format!("hyperlayer-worker-{i}"))
                .build()
                .map_err(|err| ConfigError::ThreadPool(err.to_string()))?;
            crate::log::debug!(workers = count.get(), "worker pool ready");
            Ok(Self {
                count,
                pool: Some(Arc::new(pool)),
            })
        }

        #[cfg(not(feature = "parallel"))]
        {
            crate::log::warn!(
                requested = count.get(),
                "built without the `parallel` feature, falling back to one worker"
            );
            Ok(Self::sequential())
        }
    }

    /// Builds a pool sized to the platform's available parallelism.
    ///
    /// # Errors
    /// See [`Workers::new`].
    pub fn available() -> Result<Self, ConfigError> {
        let count = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::new(count)
    }

    /// Number of workers.
    #[inline]
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Returns `true` if regions run inline on the calling thread.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        #[cfg(feature = "parallel")]
        {
            self.pool.is_none()
        }
        #[cfg(not(feature = "parallel"))]
        {
            true
        }
    }

    /// Runs `f` with the pool installed as the current rayon context.
    pub fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(f);
        }
        f()
    }

    /// Maps every element (with its index) and collects the results in order.
    pub fn map_collect<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(usize, &T) -> U + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(|| items.par_iter().enumerate().map(|(i, x)| f(i, x)).collect());
        }
        items.iter().enumerate().map(|(i, x)| f(i, x)).collect()
    }

    /// Calls `f(i)` for every index of `range`.
    pub fn for_each_index<F>(&self, range: Range<usize>, f: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            pool.install(|| range.into_par_iter().for_each(&f));
            return;
        }
        range.for_each(f);
    }

    /// Splits `data` into contiguous chunks of `chunk_len` (the last one may be
    /// shorter) and hands each chunk, with its index, to `f`.
    ///
    /// # Panics
    /// Panics if `chunk_len == 0`.
    pub fn for_each_chunk_mut<T, F>(&self, data: &mut [T], chunk_len: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        assert!(chunk_len > 0, "chunk_len must be positive");

        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            pool.install(|| {
                data.par_chunks_mut(chunk_len)
                    .enumerate()
                    .for_each(|(i, chunk)| f(i, chunk));
            });
            return;
        }
        data.chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }

    /// Runs `f` once per slot, handing each invocation exclusive access to
    /// its worker's slot.
    ///
    /// Slots are disjoint `&mut` borrows, so workers never synchronize with each
    /// other while mutating them.
    pub fn for_each_worker<T, F>(&self, slots: &mut PerWorker<T>, f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            let slots = slots.slots_mut();
            pool.install(|| {
                slots
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(worker, slot)| f(worker, &mut **slot));
            });
            return;
        }
        for (worker, slot) in slots.iter_mut().enumerate() {
            f(worker, slot);
        }
    }

    /// Sorts `data` by `key`; not stable.
    pub fn sort_unstable_by_key<T, K, F>(&self, data: &mut [T], key: F)
    where
        T: Send,
        K: Ord,
        F: Fn(&T) -> K + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            pool.install(|| data.par_sort_unstable_by_key(key));
            return;
        }
        data.sort_unstable_by_key(key);
    }
}

impl Default for Workers {
    fn default() -> Self {
        Self::sequential()
    }
}

impl fmt::Debug for Workers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workers")
            .field("count", &self.count)
            .field("sequential", &self.is_sequential())
            .finish()
    }
}

/// Returns the `part`-th of `parts` contiguous, equally sized ranges over
/// `0..len` (the trailing ones may be shorter or empty).
#[inline]
pub fn static_chunk(len: usize, parts: usize, part: usize) -> Range<usize> {
    debug_assert!(parts > 0 && part < parts);
    let chunk = len.div_ceil(parts);
    let begin = (chunk * part).min(len);
    let end = (begin + chunk).min(len);
    begin..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(Workers::new(0), Err(ConfigError::ZeroWorkers)));
    }

    #[test]
    fn one_worker_runs_inline() {
        let workers = Workers::new(1).unwrap();
        assert!(workers.is_sequential());
        assert_eq!(workers.count(), 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn pool_has_requested_size() {
        let workers = Workers::new(3).unwrap();
        assert_eq!(workers.count(), 3);
        assert!(!workers.is_sequential());
        assert_eq!(workers.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn map_collect_keeps_order() {
        let workers = Workers::new(4).unwrap();
        let items: Vec<u32> = (0..1000).collect();
        let doubled = workers.map_collect(&items, |i, &x| (i as u32) + x);
        assert_eq!(doubled, (0..1000).map(|x| 2 * x).collect::<Vec<_>>());
    }

    #[test]
    fn chunks_cover_every_element_once() {
        let workers = Workers::new(4).unwrap();
        let mut data = vec![0u32; 103];
        workers.for_each_chunk_mut(&mut data, 10, |chunk_idx, chunk| {
            for x in chunk {
                *x += 1 + chunk_idx as u32;
            }
        });
        for (i, &x) in data.iter().enumerate() {
            assert_eq!(x, 1 + (i / 10) as u32);
        }
    }

    #[test]
    fn static_chunks_partition_the_range() {
        for len in [0usize, 1, 7, 64, 65] {
            for parts in 1..9 {
                let mut next = 0;
                for part in 0..parts {
                    let r = static_chunk(len, parts, part);
                    assert_eq!(r.start, next.min(len));
                    next = r.end;
                }
                assert_eq!(next, len);
            }
        }
    }
}
