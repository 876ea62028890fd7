use super::CoordinateTransform;
use crate::error::{DemError, Result};
use crate::image::{ImageF32, ImageRgb8, ImageView};
use crate::types::{PointCloud, PointXyzi};
use log::{debug, error};
use std::time::Instant;

/// Converts a disparity map into an organized point cloud.
///
/// Pixels whose disparity lies outside the open window
/// `(disparity_threshold_min, disparity_threshold_max)` become NaN points.
pub struct DisparityMapConverter<T> {
    transform: T,
    disparity_map: Option<ImageF32>,
    image: Option<ImageRgb8>,
    disparity_threshold_min: f32,
    disparity_threshold_max: f32,
}

impl<T: CoordinateTransform> DisparityMapConverter<T> {
    pub fn new(transform: T) -> Self {
        Self {
            transform,
            disparity_map: None,
            image: None,
            disparity_threshold_min: 0.0,
            disparity_threshold_max: f32::MAX,
        }
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn set_disparity_map(&mut self, disparity_map: ImageF32) {
        self.disparity_map = Some(disparity_map);
    }

    pub fn disparity_map(&self) -> Option<&ImageF32> {
        self.disparity_map.as_ref()
    }

    /// Attach a registered color image. Without one, intensities are 0.
    pub fn set_image(&mut self, image: ImageRgb8) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageRgb8> {
        self.image.as_ref()
    }

    pub fn set_disparity_thresholds(&mut self, min: f32, max: f32) {
        self.disparity_threshold_min = min;
        self.disparity_threshold_max = max;
    }

    pub fn disparity_threshold_min(&self) -> f32 {
        self.disparity_threshold_min
    }

    pub fn disparity_threshold_max(&self) -> f32 {
        self.disparity_threshold_max
    }

    pub fn compute(&self) -> Result<PointCloud<PointXyzi>> {
        let t0 = Instant::now();
        let disparity = self.disparity_map.as_ref().ok_or_else(|| {
            error!("DisparityMapConverter::compute: no disparity map attached");
            DemError::MissingDisparityMap
        })?;
        if let Some(image) = &self.image {
            if image.dimensions() != disparity.dimensions() {
                error!(
                    "DisparityMapConverter::compute: image {}x{} does not match disparity map {}x{}",
                    image.w, image.h, disparity.w, disparity.h
                );
                return Err(DemError::DimensionMismatch {
                    disparity_w: disparity.w,
                    disparity_h: disparity.h,
                    image_w: image.w,
                    image_h: image.h,
                });
            }
        }

        let mut cloud = PointCloud::new(disparity.w, disparity.h);
        let mut valid = 0usize;
        for (row, values) in disparity.rows().enumerate() {
            for (column, &d) in values.iter().enumerate() {
                let mut point = PointXyzi::nan();
                point.intensity = self
                    .image
                    .as_ref()
                    .map_or(0.0, |img| img.get(column, row).gray());
                if self.disparity_threshold_min < d && d < self.disparity_threshold_max {
                    let p = self.transform.translate(row, column, d);
                    point.x = p.x;
                    point.y = p.y;
                    point.z = p.z;
                    valid += 1;
                }
                *cloud.at_mut(column, row) = point;
            }
        }
        cloud.is_dense = cloud.iter().all(PointXyzi::is_finite);
        debug!(
            "DisparityMapConverter: {}x{} valid={} elapsed_ms={:.3}",
            disparity.w,
            disparity.h,
            valid,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(cloud)
    }
}
