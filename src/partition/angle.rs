//! Angular cell arithmetic.
//!
//! Level `l` splits the circle into `2^l` equally wide cells; cell `k` covers
//! the angles `[k * w, (k + 1) * w)` with `w = 2π / 2^l`.

use std::f64::consts::TAU;

/// Finest level a layer is ever subdivided into.
pub const MAX_LEVEL: u32 = 24;

/// Number of cells at `level`.
#[inline]
pub const fn num_cells_in_level(level: u32) -> u32 {
    debug_assert!(level <= MAX_LEVEL);
    1 << level
}

/// Angular width of one cell at `level`.
#[inline]
pub fn cell_width(level: u32) -> f64 {
    TAU / f64::from(num_cells_in_level(level))
}

/// The cell of `level` that contains `angle` (expected in `[0, 2π)`).
///
/// Angles that round onto `2π` land in the last cell.
#[inline]
pub fn cell_for_point(angle: f64, level: u32) -> u32 {
    let cells = num_cells_in_level(level);
    #[allow(clippy::cast_sign_loss)]
    let cell = (angle / TAU * f64::from(cells)) as u32;
    cell.min(cells - 1)
}

/// Largest angle between two points at radii `r1` and `r2` that are still
/// within hyperbolic distance `radius`, or `None` if every angle qualifies.
#[inline]
pub fn max_connecting_angle(r1: f64, r2: f64, radius: f64) -> Option<f64> {
    if r1 <= 0.0 || r2 <= 0.0 {
        return None;
    }
    let cos = (r1.cosh() * r2.cosh() - radius.cosh()) / (r1.sinh() * r2.sinh());
    if cos <= -1.0 {
        None
    } else {
        Some(cos.min(1.0).acos())
    }
}

/// Coarsest useful level for a layer whose innermost radius is `r_min`.
///
/// Cells of the returned level are at least as wide as the largest angle at
/// which a point at `r_min` can connect to a point of the outermost layer
/// (inner radius `r_min_outer`) in a disk of radius `radius`. The result is
/// non-decreasing in `r_min`.
#[allow(clippy::cast_sign_loss)]
pub fn partitioning_base_level(r_min: f64, r_min_outer: f64, radius: f64) -> u32 {
    match max_connecting_angle(r_min, r_min_outer, radius) {
        None => 0,
        Some(angle) if angle <= 0.0 => MAX_LEVEL,
        Some(angle) => {
            let level = (TAU / angle).log2().floor();
            level.clamp(0.0, f64::from(MAX_LEVEL)) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_cover_the_circle() {
        assert_eq!(num_cells_in_level(0), 1);
        assert_eq!(num_cells_in_level(5), 32);
        assert_eq!(cell_for_point(0.0, 3), 0);
        assert_eq!(cell_for_point(TAU - 1e-12, 3), 7);
        assert_eq!(cell_for_point(TAU, 3), 7);
        assert_eq!(cell_for_point(std::f64::consts::PI, 1), 1);
        assert_eq!(cell_for_point(1.0, 0), 0);
    }

    #[test]
    fn bounds_contain_classified_angles() {
        for level in 0..8 {
            for i in 0..100 {
                let angle = TAU * f64::from(i) / 100.0;
                let cell = cell_for_point(angle, level);
                let (begin, end) = (f64::from(cell) * cell_width(level), f64::from(cell + 1) * cell_width(level));
                assert!(begin <= angle && angle < end + 1e-12);
            }
        }
    }

    #[test]
    fn center_layers_use_a_single_cell() {
        assert_eq!(partitioning_base_level(0.0, 9.0, 10.0), 0);
        assert_eq!(partitioning_base_level(0.5, 9.0, 10.0), 0);
    }

    #[test]
    fn level_grows_with_radius() {
        let radius = 12.0;
        let mut previous = 0;
        for step in 0..=110 {
            let r = f64::from(step) * 0.1;
            let level = partitioning_base_level(r, radius - 1.0, radius);
            assert!(level >= previous, "level dropped at r = {r}");
            assert!(level <= MAX_LEVEL);
            previous = level;
        }
        assert!(previous > 0);
    }

    #[test]
    fn cells_are_wide_enough() {
        let (r1, r2, radius) = (8.0, 9.0, 10.0);
        let level = partitioning_base_level(r1, r2, radius);
        let angle = max_connecting_angle(r1, r2, radius).unwrap();
        assert!(cell_width(level) >= angle);
        assert!(cell_width(level + 1) < angle);
    }
}
