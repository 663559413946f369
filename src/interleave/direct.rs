//! Bit-by-bit reference implementation.

/// Interleaves `coords` one bit at a time. Works for every `D`.
#[inline]
pub fn interleave<const D: usize>(coords: [u32; D], target_level: u32) -> u32 {
    let dims = D as u32;
    let mut address = 0u32;
    for level in 0..target_level {
        for (d, &coord) in (0u32..).zip(coords.iter()) {
            address |= ((coord >> level) & 1) << (dims * level + d);
        }
    }
    address
}
