//! Interleaving with the BMI2 parallel bit deposit instruction.
//!
//! `pdep` scatters the low bits of its source into the set positions of a mask,
//! which is exactly one coordinate's share of an interleaved address. Support is
//! detected at runtime; without it every call is answered by the shuffle
//! strategy.

use super::shuffle;

/// Returns `true` if the running CPU supports BMI2.
#[inline]
pub fn is_supported() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::is_x86_feature_detected!("bmi2")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Interleaves `coords` with `pdep` if available.
#[inline]
pub fn interleave<const D: usize>(coords: [u32; D], target_level: u32) -> u32 {
    #[cfg(target_arch = "x86_64")]
    if is_supported() {
        // SAFETY: BMI2 support was checked above.
        return unsafe { bmi2::interleave(coords) };
    }
    shuffle::interleave(coords, target_level)
}

/// Positions `offset, offset + stride, ...` below 32.
const fn every_nth_bit(stride: usize, offset: usize) -> u32 {
    let mut mask = 0u32;
    let mut bit = offset;
    while bit < 32 {
        mask |= 1 << bit;
        bit += stride;
    }
    mask
}

struct DepositMasks<const D: usize>;

impl<const D: usize> DepositMasks<D> {
    const MASKS: [u32; D] = {
        let mut masks = [0u32; D];
        let mut d = 0;
        while d < D {
            masks[d] = every_nth_bit(D, d);
            d += 1;
        }
        masks
    };
}

#[cfg(target_arch = "x86_64")]
mod bmi2 {
    use core::arch::x86_64::{_pdep_u32, _pdep_u64};

    use super::DepositMasks;

    /// `x` on the even bits, `y` on the odd bits; both below `2^16`.
    #[target_feature(enable = "bmi2")]
    unsafe fn pair(x: u32, y: u32) -> u32 {
        let packed = (u64::from(y) << 16) | u64::from(x & 0xFFFF);
        let spread = _pdep_u64(packed, 0x5555_5555_5555_5555);
        (spread | (spread >> 31)) as u32
    }

    #[target_feature(enable = "bmi2")]
    pub(super) unsafe fn interleave<const D: usize>(coords: [u32; D]) -> u32 {
        match *coords.as_slice() {
            [x] => x,
            [x, y] => pair(x, y),
            // (a, c) and (b, d) fill the even and odd positions of a pair.
            [a, b, c, d] => pair(pair(a, c), pair(b, d)),
            _ => {
                let mut address = 0;
                for (coord, mask) in coords.into_iter().zip(DepositMasks::<D>::MASKS) {
                    address |= _pdep_u32(coord, mask);
                }
                address
            }
        }
    }
}
