use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Disparity-to-3D mapping used by the converters.
///
/// Implementations are shared read-only across accumulation workers.
pub trait CoordinateTransform: Sync {
    fn translate(&self, row: usize, column: usize, disparity: f32) -> Point3<f32>;
}

impl<F> CoordinateTransform for F
where
    F: Fn(usize, usize, f32) -> Point3<f32> + Sync,
{
    #[inline]
    fn translate(&self, row: usize, column: usize, disparity: f32) -> Point3<f32> {
        self(row, column, disparity)
    }
}

/// Rectified stereo pair parameters, in pixels (center, focal length) and
/// metres (baseline).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoCamera {
    pub center_x: f32,
    pub center_y: f32,
    pub focal_length: f32,
    pub baseline: f32,
}

impl StereoCamera {
    pub fn new(center_x: f32, center_y: f32, focal_length: f32, baseline: f32) -> Self {
        Self {
            center_x,
            center_y,
            focal_length,
            baseline,
        }
    }
}

impl CoordinateTransform for StereoCamera {
    /// `z = f·b/d`, `x = (column − cx)·b/d`, `y = (row − cy)·b/d`.
    /// A zero disparity maps to the origin.
    fn translate(&self, row: usize, column: usize, disparity: f32) -> Point3<f32> {
        if disparity == 0.0 {
            return Point3::origin();
        }
        let scale = self.baseline / disparity;
        Point3::new(
            (column as f32 - self.center_x) * scale,
            (row as f32 - self.center_y) * scale,
            self.focal_length * self.baseline / disparity,
        )
    }
}
