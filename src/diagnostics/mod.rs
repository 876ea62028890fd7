//! Run diagnostics for the elevation-map builder.
pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::dem::{DemGrid, DemParams};
use serde::Serialize;

/// Elevation map together with the counters and timings of the run that
/// produced it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemReport {
    pub params: DemParams,
    pub input: InputDescriptor,
    /// Pixels whose disparity fell inside the acceptance window.
    pub accepted_pixels: usize,
    pub valid_cells: usize,
    pub total_cells: usize,
    pub column_step: usize,
    pub disparity_step: f32,
    pub timing: TimingBreakdown,
    pub grid: DemGrid,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}
