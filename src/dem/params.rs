//! Parameters controlling the elevation-map grid.
//!
//! The grid has `resolution_column` buckets across the image width and
//! `resolution_disparity` buckets across the disparity window
//! `(disparity_threshold_min, disparity_threshold_max)`. A cell is reported
//! as valid once its height histogram collected `min_points_in_cell`
//! samples.

use crate::error::DemError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemParams {
    /// Number of column buckets (grid width).
    pub resolution_column: usize,
    /// Number of disparity buckets (grid height).
    pub resolution_disparity: usize,
    /// Minimum accepted samples for a cell to be valid.
    pub min_points_in_cell: usize,
    /// Exclusive lower bound of accepted disparities.
    pub disparity_threshold_min: f32,
    /// Exclusive upper bound of accepted disparities.
    pub disparity_threshold_max: f32,
    /// Split the accumulation pass across rayon workers. Ignored unless the
    /// crate is built with the `parallel` feature.
    pub parallel_accumulation: bool,
}

impl Default for DemParams {
    fn default() -> Self {
        Self {
            resolution_column: 64,
            resolution_disparity: 32,
            min_points_in_cell: 1,
            disparity_threshold_min: 0.0,
            disparity_threshold_max: f32::MAX,
            parallel_accumulation: false,
        }
    }
}

impl DemParams {
    /// Rejects zero grid resolutions. Any disparity window is accepted: an
    /// empty or NaN window simply admits no pixels.
    pub fn validate(&self) -> Result<(), DemError> {
        if self.resolution_column == 0 || self.resolution_disparity == 0 {
            return Err(DemError::InvalidParams(format!(
                "grid resolution must be positive, got {}x{}",
                self.resolution_column, self.resolution_disparity
            )));
        }
        Ok(())
    }

    /// `true` when no disparity can lie strictly inside the window.
    pub fn window_is_empty(&self) -> bool {
        !(self.disparity_threshold_min < self.disparity_threshold_max)
    }
}
