//! Bucket geometry shared by the accumulation and reduction passes.
use super::DemParams;

/// Flat index of the cell `(index_column, index_disparity)` in a grid that
/// is `resolution_column` cells wide.
#[inline]
pub fn cell_index(index_column: usize, index_disparity: usize, resolution_column: usize) -> usize {
    index_column + index_disparity * resolution_column
}

/// Column and disparity bucket sizes for one disparity map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketLayout {
    pub resolution_column: usize,
    pub resolution_disparity: usize,
    /// Pixels per column bucket, `ceil(width / resolution_column)` (at least 1).
    pub column_step: usize,
    /// Disparity span per bucket.
    pub disparity_step: f32,
    pub disparity_min: f32,
    pub disparity_max: f32,
}

impl BucketLayout {
    /// Expects parameters that passed [`DemParams::validate`]. An empty
    /// window yields a zero or negative `disparity_step`; a window wider
    /// than `f32::MAX` yields an infinite one, which routes every accepted
    /// pixel to disparity bucket 0.
    pub fn new(params: &DemParams, disparity_map_width: usize) -> Self {
        let column_step = disparity_map_width.saturating_sub(1) / params.resolution_column + 1;
        let disparity_step = (params.disparity_threshold_max - params.disparity_threshold_min)
            / params.resolution_disparity as f32;
        Self {
            resolution_column: params.resolution_column,
            resolution_disparity: params.resolution_disparity,
            column_step,
            disparity_step,
            disparity_min: params.disparity_threshold_min,
            disparity_max: params.disparity_threshold_max,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.resolution_column * self.resolution_disparity
    }

    #[inline]
    pub fn accepts(&self, disparity: f32) -> bool {
        self.disparity_min < disparity && disparity < self.disparity_max
    }

    /// Flat cell index for a pixel column and an accepted disparity.
    #[inline]
    pub fn bucket(&self, column: usize, disparity: f32) -> usize {
        let index_column = column / self.column_step;
        let mut index_disparity = ((disparity - self.disparity_min) / self.disparity_step) as usize;
        // Rounding just below the upper bound can produce `resolution_disparity`.
        if index_disparity >= self.resolution_disparity {
            index_disparity = self.resolution_disparity - 1;
        }
        cell_index(index_column, index_disparity, self.resolution_column)
    }

    /// Representative pixel column and disparity of a cell (its lower edges).
    /// Bucket 0 is always anchored at `disparity_min`, also for an infinite
    /// step where `0 · ∞` would be NaN.
    #[inline]
    pub fn representative(&self, index_column: usize, index_disparity: usize) -> (usize, f32) {
        let disparity = if index_disparity == 0 {
            self.disparity_min
        } else {
            self.disparity_min + index_disparity as f32 * self.disparity_step
        };
        (index_column * self.column_step, disparity)
    }
}
