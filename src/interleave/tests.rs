use super::*;

fn all_agree<const D: usize>(coords: [u32; D], level: u32) {
    let expected = direct::interleave(coords, level);
    for strategy in InterleaveStrategy::ALL {
        assert_eq!(
            strategy.interleave(coords, level),
            expected,
            "{strategy} disagrees for {coords:?} at level {level}"
        );
    }
}

#[test]
fn hand_computed_addresses() {
    assert_eq!(direct::interleave([0b11u32, 0b00], 2), 0b0101);
    assert_eq!(direct::interleave([0u32, 1], 1), 0b10);
    // c0=1 -> bit 0, c1=2 -> bit 5, c2=3 -> bits 2 and 6, c3=4 -> bit 11.
    assert_eq!(direct::interleave([1u32, 2, 3, 4], 3), 2149);
    assert_eq!(direct::interleave([0b101u32], 3), 0b101);
}

#[test]
fn level_zero_is_zero() {
    for strategy in InterleaveStrategy::ALL {
        assert_eq!(strategy.interleave([0u32, 0], 0), 0);
        assert_eq!(strategy.interleave([0u32, 0, 0, 0], 0), 0);
    }
}

#[test]
fn exhaustive_two_dimensions() {
    for x in 0..16 {
        for y in 0..16 {
            all_agree([x, y], 4);
        }
    }
}

#[test]
fn exhaustive_four_dimensions() {
    for bits in 0..256u32 {
        let coords = [bits & 3, (bits >> 2) & 3, (bits >> 4) & 3, (bits >> 6) & 3];
        all_agree(coords, 2);
    }
}

#[test]
fn three_dimensions_use_direct_fallback() {
    for x in 0..8 {
        for y in 0..8 {
            for z in 0..8 {
                all_agree([x, y, z], 3);
            }
        }
    }
}

#[test]
fn full_width_extremes() {
    all_agree([u32::MAX], 32);
    all_agree([0xFFFFu32, 0xFFFF], 16);
    all_agree([0xFFu32, 0xFF, 0xFF, 0xFF], 8);
    assert_eq!(interleave([0xFFFFu32, 0xFFFF], 16), u32::MAX);
    assert_eq!(interleave([0xFFu32, 0xFF, 0xFF, 0xFF], 8), u32::MAX);
    assert_eq!(interleave([0xFFFFu32, 0], 16), 0x5555_5555);
    assert_eq!(interleave([0u32, 0, 0, 0xFF], 8), 0x8888_8888);
}

#[test]
fn single_bit_probes() {
    for l in 0..16 {
        all_agree([1u32 << l, 0], 16);
        all_agree([0, 1u32 << l], 16);
        assert_eq!(interleave([0, 1u32 << l], 16), 1 << (2 * l + 1));
    }
    for l in 0..8 {
        for d in 0..4 {
            let mut coords = [0u32; 4];
            coords[d] = 1 << l;
            all_agree(coords, 8);
            assert_eq!(interleave(coords, 8), 1 << (4 * l + d as u32));
        }
    }
}

#[test]
fn max_level_per_dimension() {
    assert_eq!(max_level(1), 32);
    assert_eq!(max_level(2), 16);
    assert_eq!(max_level(3), 10);
    assert_eq!(max_level(4), 8);
}

#[test]
fn detect_returns_a_native_strategy() {
    assert!(InterleaveStrategy::detect().is_native());
    assert_eq!(InterleaveStrategy::default(), InterleaveStrategy::Shuffle);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "exceed")]
fn oversized_coordinate_is_caught_in_debug() {
    interleave([4u32, 0], 2);
}
