//! Shared partition storage and the per-layer views over it.

use core::fmt;
use core::ops::Range;
use std::sync::Arc;

use super::angle;
use super::point::Point;

/// The sorted point array and the cell → first point table of one partition.
///
/// `first_point_in_cell[c]..first_point_in_cell[c + 1]` is the index range of
/// the points of global cell `c`. The table has one extra trailing slot holding
/// the number of points.
pub struct PartitionStorage {
    points: Vec<Point>,
    first_point_in_cell: Vec<u32>,
}

impl PartitionStorage {
    pub(crate) fn new(points: Vec<Point>, first_point_in_cell: Vec<u32>) -> Self {
        debug_assert!(!first_point_in_cell.is_empty());
        Self {
            points,
            first_point_in_cell,
        }
    }

    /// All points, sorted by cell rank.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The cell → first point table, `max_cell_id + 1` entries long.
    #[inline]
    pub fn first_point_in_cell(&self) -> &[u32] {
        &self.first_point_in_cell
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// One past the highest cell rank.
    #[inline]
    pub fn max_cell_id(&self) -> u32 {
        u32::try_from(self.first_point_in_cell.len() - 1).unwrap_or(u32::MAX)
    }

    /// Index range of the points in global cell `cell_id`.
    #[inline]
    pub fn cell_range(&self, cell_id: u32) -> Range<usize> {
        let cell = cell_id as usize;
        self.first_point_in_cell[cell] as usize..self.first_point_in_cell[cell + 1] as usize
    }
}

impl fmt::Debug for PartitionStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionStorage")
            .field("points", &self.points.len())
            .field("cells", &self.max_cell_id())
            .finish()
    }
}

/// One radial band of the partition, subdivided into `2^level` angular cells.
///
/// Layers are cheap handles into a shared [`PartitionStorage`]; cloning a
/// layer never copies points.
#[derive(Clone)]
pub struct RadiusLayer {
    r_min: f64,
    r_max: f64,
    level: u32,
    first_cell: u32,
    storage: Arc<PartitionStorage>,
}

impl RadiusLayer {
    pub(crate) fn new(
        r_min: f64,
        r_max: f64,
        level: u32,
        first_cell: u32,
        storage: Arc<PartitionStorage>,
    ) -> Self {
        let layer = Self {
            r_min,
            r_max,
            level,
            first_cell,
            storage,
        };
        debug_assert!(
            layer
                .points()
                .iter()
                .all(|p| r_min <= p.radius && p.radius < r_max),
            "layer [{r_min}, {r_max}) holds a point outside its band"
        );
        layer
    }

    /// Inner radial bound, inclusive.
    #[inline]
    pub fn r_min(&self) -> f64 {
        self.r_min
    }

    /// Outer radial bound, exclusive.
    #[inline]
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Quadtree level of the layer's cells.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of cells in the layer.
    #[inline]
    pub fn num_cells(&self) -> u32 {
        angle::num_cells_in_level(self.level)
    }

    /// Global rank of the layer's first cell.
    #[inline]
    pub fn first_cell_rank(&self) -> u32 {
        self.first_cell
    }

    /// Local cell containing `angle`.
    #[inline]
    pub fn cell_for_angle(&self, angle: f64) -> u32 {
        angle::cell_for_point(angle, self.level)
    }

    /// Index range, into [`PartitionStorage::points`], of local cell `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= self.num_cells()`.
    #[inline]
    pub fn cell_range(&self, cell: u32) -> Range<usize> {
        assert!(cell < self.num_cells(), "cell {cell} outside level {}", self.level);
        self.storage.cell_range(self.first_cell + cell)
    }

    /// Points of local cell `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= self.num_cells()`.
    #[inline]
    pub fn cell_points(&self, cell: u32) -> &[Point] {
        &self.storage.points()[self.cell_range(cell)]
    }

    /// Index range of all points in the layer.
    #[inline]
    pub fn point_range(&self) -> Range<usize> {
        let table = self.storage.first_point_in_cell();
        let first = self.first_cell as usize;
        table[first] as usize..table[first + self.num_cells() as usize] as usize
    }

    /// All points in the layer, grouped by cell.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.storage.points()[self.point_range()]
    }

    /// The storage shared by all layers of the partition.
    #[inline]
    pub fn storage(&self) -> &Arc<PartitionStorage> {
        &self.storage
    }
}

impl fmt::Debug for RadiusLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiusLayer")
            .field("r_min", &self.r_min)
            .field("r_max", &self.r_max)
            .field("level", &self.level)
            .field("first_cell", &self.first_cell)
            .field("points", &self.point_range().len())
            .finish()
    }
}
