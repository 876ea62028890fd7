use crate::types::PointCloud;
use serde::Serialize;

/// One elevation-map cell.
///
/// `x`/`z` locate the cell on the ground plane. `y` and `intensity` are
/// histogram modes; both variances are `-1.0` when the cell did not collect
/// enough samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DemCell {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub height_variance: f32,
    pub intensity_variance: f32,
}

impl DemCell {
    pub const INVALID_HEIGHT: f32 = 0.0;
    pub const INVALID_INTENSITY: f32 = 255.0;
    pub const INVALID_VARIANCE: f32 = -1.0;

    /// Placeholder for a cell without enough samples.
    pub fn invalid(x: f32, z: f32) -> Self {
        Self {
            x,
            y: Self::INVALID_HEIGHT,
            z,
            intensity: Self::INVALID_INTENSITY,
            height_variance: Self::INVALID_VARIANCE,
            intensity_variance: Self::INVALID_VARIANCE,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.height_variance != Self::INVALID_VARIANCE
    }
}

/// Grid of `resolution_column × resolution_disparity` cells, addressed by
/// `(column_index, disparity_index)`.
pub type DemGrid = PointCloud<DemCell>;

impl PointCloud<DemCell> {
    pub fn valid_cells(&self) -> impl Iterator<Item = &DemCell> + '_ {
        self.points.iter().filter(|c| c.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.valid_cells().count()
    }
}
