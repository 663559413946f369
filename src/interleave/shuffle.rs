//! Mask-and-shift interleaving.
//!
//! Two coordinates are packed into the low and high 32-bit lanes of one `u64`
//! and spread in both lanes at once; the lanes are then merged with a single
//! shift. Four coordinates use two such words.

use super::direct;

const SPREAD2_MASKS: [(u32, u64); 4] = [
    (8, 0x00FF_00FF_00FF_00FF),
    (4, 0x0F0F_0F0F_0F0F_0F0F),
    (2, 0x3333_3333_3333_3333),
    (1, 0x5555_5555_5555_5555),
];

/// Interleaves 1, 2 or 4 coordinates; any other `D` uses the direct loop.
#[inline]
pub fn interleave<const D: usize>(coords: [u32; D], target_level: u32) -> u32 {
    match *coords.as_slice() {
        [x] => x,
        [x, y] => interleave2(x, y),
        [a, b, c, d] => interleave4(a, b, c, d),
        _ => direct::interleave(coords, target_level),
    }
}

/// `x` lands on the even bits, `y` on the odd bits. Both must be below `2^16`.
#[inline]
pub fn interleave2(x: u32, y: u32) -> u32 {
    let mut z = u64::from(x) | (u64::from(y) << 32);
    for (shift, mask) in SPREAD2_MASKS {
        z = (z | (z << shift)) & mask;
    }
    (z | (z >> 31)) as u32
}

/// Spreads the low byte of each 32-bit lane so that bit `k` moves to bit `4k`.
#[inline]
fn spread4(z: u64) -> u64 {
    let z = (z | (z << 12)) & 0x000F_000F_000F_000F;
    let z = (z | (z << 6)) & 0x0303_0303_0303_0303;
    (z | (z << 3)) & 0x1111_1111_1111_1111
}

/// Interleaves four coordinates, each below `2^8`.
#[inline]
pub fn interleave4(a: u32, b: u32, c: u32, d: u32) -> u32 {
    let ab = spread4(u64::from(a & 0xFF) | (u64::from(b & 0xFF) << 32));
    let cd = spread4(u64::from(c & 0xFF) | (u64::from(d & 0xFF) << 32));
    let (a, b) = (ab as u32, (ab >> 32) as u32);
    let (c, d) = (cd as u32, (cd >> 32) as u32);
    a | (b << 1) | (c << 2) | (d << 3)
}
