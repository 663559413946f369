//! Radial layers, their quadtree levels and global cell ranks.
//!
//! Layer `0` is the outermost band `[R - h, R)`; layer `l` covers
//! `[R - (l + 1) h, R - l h)` and the innermost layer extends down to the
//! center. Outer layers are subdivided into finer angular cells.
//!
//! Cell ranks are assigned right to left: the innermost layer starts at rank
//! `0`, and layer `0` owns the highest ranks. A single table indexed by rank
//! therefore serves every layer.

use super::angle;

/// Layer bounds, levels and rank offsets for one `(R, h)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerPlan {
    radius: f64,
    layer_height: f64,
    levels: Vec<u32>,
    first_cell: Vec<u32>,
    max_cell_id: u32,
}

impl LayerPlan {
    /// Plans the layers of a disk of radius `radius` cut into bands of
    /// `layer_height`.
    ///
    /// # Panics
    /// Panics unless `radius` is positive and finite and
    /// `0 < layer_height <= radius`, or if the layers hold more cells than
    /// 32-bit ranks can address.
    pub fn new(radius: f64, layer_height: f64) -> Self {
        Self::try_new(radius, layer_height).unwrap_or_else(|| {
            panic!("layers of height {layer_height} on a disk of radius {radius} need more cells than 32-bit ranks allow")
        })
    }

    /// Like [`LayerPlan::new`], but returns `None` if the layers hold more
    /// cells than 32-bit ranks can address.
    ///
    /// # Panics
    /// Panics unless `radius` is positive and finite and
    /// `0 < layer_height <= radius`.
    pub fn try_new(radius: f64, layer_height: f64) -> Option<Self> {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "disk radius must be positive and finite, got {radius}"
        );
        assert!(
            layer_height > 0.0 && layer_height <= radius,
            "layer height must lie in (0, {radius}], got {layer_height}"
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut num_layers = ((radius / layer_height).ceil() as usize).max(1);
        // Rounding in the division may add a layer with an empty radial range.
        while num_layers > 1 && radius - (num_layers - 1) as f64 * layer_height <= 0.0 {
            num_layers -= 1;
        }

        let mut plan = Self {
            radius,
            layer_height,
            levels: Vec::with_capacity(num_layers),
            first_cell: vec![0; num_layers],
            max_cell_id: 0,
        };

        let r_min_outer = plan.r_min_of(0, num_layers);
        for layer in 0..num_layers {
            let r_min = plan.r_min_of(layer, num_layers);
            plan.levels
                .push(angle::partitioning_base_level(r_min, r_min_outer, radius));
        }
        debug_assert!(
            plan.levels.windows(2).all(|w| w[0] >= w[1]),
            "levels must not increase towards the center: {:?}",
            plan.levels
        );

        let mut sum = 0u64;
        for layer in (0..num_layers).rev() {
            plan.first_cell[layer] = u32::try_from(sum).unwrap_or(u32::MAX);
            sum += u64::from(angle::num_cells_in_level(plan.levels[layer]));
        }
        if sum >= u64::from(u32::MAX) {
            return None;
        }
        plan.max_cell_id = plan.first_cell[0] + angle::num_cells_in_level(plan.levels[0]);
        Some(plan)
    }

    /// Disk radius `R`.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Layer height `h`.
    #[inline]
    pub fn layer_height(&self) -> f64 {
        self.layer_height
    }

    /// Number of planned layers, including ones that may end up empty.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.levels.len()
    }

    /// Outer radial bound (exclusive) of `layer`.
    #[inline]
    pub fn r_max(&self, layer: usize) -> f64 {
        self.radius - layer as f64 * self.layer_height
    }

    /// Inner radial bound (inclusive) of `layer`.
    #[inline]
    pub fn r_min(&self, layer: usize) -> f64 {
        self.r_min_of(layer, self.num_layers())
    }

    fn r_min_of(&self, layer: usize, num_layers: usize) -> f64 {
        if layer + 1 >= num_layers {
            0.0
        } else {
            self.r_max(layer + 1)
        }
    }

    /// Quadtree level of `layer`.
    #[inline]
    pub fn level(&self, layer: usize) -> u32 {
        self.levels[layer]
    }

    /// Global rank of the first cell of `layer`.
    #[inline]
    pub fn first_cell(&self, layer: usize) -> u32 {
        self.first_cell[layer]
    }

    /// One past the highest rank of any cell.
    #[inline]
    pub fn max_cell_id(&self) -> u32 {
        self.max_cell_id
    }

    /// The layer whose half-open band `[r_min, r_max)` contains `r`.
    pub fn layer_of_radius(&self, r: f64) -> usize {
        let last = self.num_layers() - 1;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut layer = (((self.radius - r) / self.layer_height) as usize).min(last);
        while layer > 0 && r >= self.r_max(layer) {
            layer -= 1;
        }
        while layer < last && r < self.r_min(layer) {
            layer += 1;
        }
        layer
    }

    /// Global rank of the cell containing the point `(r, angle)`.
    #[inline]
    pub fn cell_of(&self, r: f64, angle: f64) -> u32 {
        let layer = self.layer_of_radius(r);
        self.first_cell[layer] + angle::cell_for_point(angle, self.levels[layer])
    }

    /// Number of layers, counted from the outside, needed to reach the cell
    /// `min_cell_id`. Layers further in hold no ranks at or above it.
    pub fn occupied_layers(&self, min_cell_id: u32) -> usize {
        let mut layers = 1;
        while layers < self.num_layers() && self.first_cell[layers - 1] > min_cell_id {
            layers += 1;
        }
        layers
    }
}
