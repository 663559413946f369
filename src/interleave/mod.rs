//! Morton (Z-order) bit interleaving.
//!
//! For `D` coordinates and a target level `L`, bit `D * l + d` of the result is
//! bit `l` of `coords[d]`, for every `l < L` and `d < D`. Nearby points in
//! `D`-dimensional space therefore map to nearby addresses, which is what makes
//! the address usable as a sort key for spatial cells.
//!
//! Three strategies compute the same function:
//!
//! | Strategy | Dimensions | Technique |
//! |----------|------------|-----------|
//! | [`Direct`](InterleaveStrategy::Direct) | any | bit-by-bit double loop |
//! | [`Shuffle`](InterleaveStrategy::Shuffle) | 1, 2, 4 (others fall back to `Direct`) | mask-and-shift spreading over packed 64-bit lanes |
//! | [`Deposit`](InterleaveStrategy::Deposit) | any | BMI2 `pdep`, runtime detected |
//!
//! All of them require `target_level * D <= 32` and every coordinate to fit in
//! `target_level` bits. Violations are caller bugs and are only checked in
//! debug builds; release builds return an unspecified value.
//!
//! ```
//! use hyperlayer::interleave::{interleave, InterleaveStrategy};
//!
//! assert_eq!(interleave([0b11, 0b00], 2), 0b0101);
//! assert_eq!(interleave([0b00, 0b11], 2), 0b1010);
//!
//! let strategy = InterleaveStrategy::detect();
//! assert_eq!(strategy.interleave([1, 2, 3, 4], 3), interleave([1, 2, 3, 4], 3));
//! ```

pub mod deposit;
pub mod direct;
pub mod shuffle;

#[cfg(test)]
mod tests;

use core::fmt;

/// Selects how [`InterleaveStrategy::interleave`] computes the address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InterleaveStrategy {
    /// Reference double loop over levels and dimensions.
    Direct,
    /// Portable mask-and-shift spreading.
    #[default]
    Shuffle,
    /// Hardware bit deposit. Falls back to [`Shuffle`](Self::Shuffle) when the
    /// CPU lacks BMI2.
    Deposit,
}

impl InterleaveStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 3] = [Self::Direct, Self::Shuffle, Self::Deposit];

    /// The fastest strategy supported by the running CPU.
    pub fn detect() -> Self {
        if deposit::is_supported() {
            Self::Deposit
        } else {
            Self::Shuffle
        }
    }

    /// Returns `true` if the strategy runs natively on this CPU instead of
    /// falling back to another one.
    pub fn is_native(self) -> bool {
        match self {
            Self::Direct | Self::Shuffle => true,
            Self::Deposit => deposit::is_supported(),
        }
    }

    /// Interleaves `coords` up to `target_level` bits per coordinate.
    #[inline]
    pub fn interleave<const D: usize>(self, coords: [u32; D], target_level: u32) -> u32 {
        debug_check(&coords, target_level);
        match self {
            Self::Direct => direct::interleave(coords, target_level),
            Self::Shuffle => shuffle::interleave(coords, target_level),
            Self::Deposit => deposit::interleave(coords, target_level),
        }
    }
}

impl fmt::Display for InterleaveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::Shuffle => "shuffle",
            Self::Deposit => "deposit",
        })
    }
}

/// Interleaves `coords` with the portable [`InterleaveStrategy::Shuffle`].
#[inline]
pub fn interleave<const D: usize>(coords: [u32; D], target_level: u32) -> u32 {
    InterleaveStrategy::Shuffle.interleave(coords, target_level)
}

/// Largest target level usable with `D` dimensions.
#[inline]
pub const fn max_level(dims: usize) -> u32 {
    if dims == 0 {
        u32::MAX
    } else {
        (32 / dims) as u32
    }
}

#[inline]
fn debug_check<const D: usize>(coords: &[u32; D], target_level: u32) {
    debug_assert!(
        target_level <= max_level(D),
        "target_level {target_level} too large for {D} dimensions"
    );
    debug_assert!(
        coords.iter().all(|&c| u64::from(c) >> target_level == 0),
        "coordinates {coords:?} exceed {target_level} bits"
    );
}
