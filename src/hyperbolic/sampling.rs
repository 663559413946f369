//! Seeded, parallel sampling of polar coordinates.
//!
//! The output is split into fixed-size chunks and every chunk draws from its
//! own generator, seeded from `(seed, stream, chunk index)`. The samples are
//! therefore identical for every worker count.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::concurrency::Workers;

/// Samples drawn from one generator.
const CHUNK_LEN: usize = 1 << 14;

const RADII_STREAM: u64 = 1;
const ANGLES_STREAM: u64 = 2;

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn chunk_rng(seed: u64, stream: u64, chunk: usize) -> Pcg64Mcg {
    let mixed = splitmix64(splitmix64(seed ^ stream.rotate_left(32)) ^ chunk as u64);
    Pcg64Mcg::seed_from_u64(mixed)
}

fn fill_chunked<F>(len: usize, seed: u64, stream: u64, workers: &Workers, sample: F) -> Vec<f64>
where
    F: Fn(&mut Pcg64Mcg) -> f64 + Sync + Send,
{
    let mut out = vec![0.0; len];
    if len == 0 {
        return out;
    }
    workers.for_each_chunk_mut(&mut out, CHUNK_LEN, |chunk, values| {
        let mut rng = chunk_rng(seed, stream, chunk);
        for value in values {
            *value = sample(&mut rng);
        }
    });
    out
}

/// Samples `n` radii in `[0, radius)` with density proportional to
/// `sinh(alpha * r)`.
///
/// # Panics
/// Panics unless `alpha` and `radius` are positive.
pub fn sample_radii(n: usize, alpha: f64, radius: f64, seed: u64, workers: &Workers) -> Vec<f64> {
    assert!(alpha > 0.0, "alpha must be positive, got {alpha}");
    assert!(radius > 0.0, "disk radius must be positive, got {radius}");

    let inv_alpha = 1.0 / alpha;
    let factor = (alpha * radius).cosh() - 1.0;
    let below_radius = radius.next_down();

    fill_chunked(n, seed, RADII_STREAM, workers, |rng| {
        let p = loop {
            let p: f64 = rng.random();
            if p > 0.0 {
                break p;
            }
        };
        ((p * factor + 1.0).acosh() * inv_alpha).min(below_radius)
    })
}

/// Samples `n` angles uniformly from `[0, 2π)`.
pub fn sample_angles(n: usize, seed: u64, workers: &Workers) -> Vec<f64> {
    let below_tau = TAU.next_down();
    fill_chunked(n, seed, ANGLES_STREAM, workers, |rng| {
        rng.random_range(0.0..TAU).min(below_tau)
    })
}
