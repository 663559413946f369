//! Sorting by small integer keys.
//!
//! Cell ranks are dense integers below a known bound, so a single-threaded
//! build uses a counting sort whenever the bound is small relative to the
//! input; otherwise, and for every parallel build, it defers to a comparison
//! sort. Neither variant is stable.

use crate::concurrency::Workers;

/// Sorts `items` ascending by `key`, where every key is below `key_bound`.
pub fn sort_by_bounded_key<T, F>(items: &mut [T], key: F, key_bound: u32, workers: &Workers)
where
    T: Copy + Send,
    F: Fn(&T) -> u32 + Sync + Send,
{
    if items.len() < 2 {
        return;
    }
    if !workers.is_sequential() {
        workers.sort_unstable_by_key(items, key);
    } else if key_bound as usize <= items.len().saturating_mul(4) {
        counting_sort(items, key, key_bound);
    } else {
        items.sort_unstable_by_key(key);
    }
}

/// Counting sort over keys in `0..key_bound`.
///
/// # Panics
/// Panics if some key is `>= key_bound`.
pub fn counting_sort<T, F>(items: &mut [T], key: F, key_bound: u32)
where
    T: Copy,
    F: Fn(&T) -> u32,
{
    let Some(&first) = items.first() else {
        return;
    };

    let mut offsets = vec![0usize; key_bound as usize + 1];
    for item in items.iter() {
        offsets[key(item) as usize + 1] += 1;
    }
    for k in 1..offsets.len() {
        offsets[k] += offsets[k - 1];
    }

    let mut sorted = vec![first; items.len()];
    for item in items.iter() {
        let slot = &mut offsets[key(item) as usize];
        sorted[*slot] = *item;
        *slot += 1;
    }
    items.copy_from_slice(&sorted);
}
