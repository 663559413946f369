//! Classified sample points.

/// A sampled point together with the global rank of the cell it falls into.
///
/// Points are created once during classification and never modified after
/// the partition is built.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// Index into the radius and angle arrays the partition was built from.
    pub id: u32,
    /// Global cell rank, unique across all layers.
    pub cell_id: u32,
    /// Radial coordinate in `[0, R)`.
    pub radius: f64,
    /// Angular coordinate in `[0, 2π)`.
    pub angle: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub fn new(id: u32, radius: f64, angle: f64, cell_id: u32) -> Self {
        Self {
            id,
            cell_id,
            radius,
            angle,
        }
    }
}
