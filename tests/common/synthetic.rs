use nalgebra::Point3;
use stereo_dem::image::{ImageF32, ImageRgb8, RgbPixel};
use stereo_dem::StereoCamera;

/// Camera whose heights stay inside the height histogram range for small
/// images: `y = row · 0.1 / d`.
pub fn small_camera() -> StereoCamera {
    StereoCamera::new(0.0, 0.0, 1.0, 0.1)
}

/// Transform that ignores disparity for height: `y = row · 0.01`.
pub fn row_transform(row: usize, column: usize, disparity: f32) -> Point3<f32> {
    Point3::new(column as f32, row as f32 * 0.01, disparity)
}

pub fn constant_disparity(width: usize, height: usize, value: f32) -> ImageF32 {
    ImageF32::filled(width, height, value)
}

/// Color image whose gray level varies with the column.
pub fn column_gradient_rgb(width: usize, height: usize) -> ImageRgb8 {
    let mut img = ImageRgb8::filled(width, height, RgbPixel::default());
    for y in 0..height {
        for x in 0..width {
            let v = (10 + 7 * x).min(250) as u8;
            img.set(x, y, RgbPixel::new(v, v.saturating_add(1), v.saturating_add(2)));
        }
    }
    img
}

/// Ground plane occupying the lower half of the frame, with disparity
/// growing towards the bottom row.
pub fn ground_plane_disparity(width: usize, height: usize, max_disparity: f32) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    let horizon = height / 2;
    for y in horizon..height {
        let d = max_disparity * (y - horizon + 1) as f32 / (height - horizon) as f32;
        for x in 0..width {
            img.set(x, y, d);
        }
    }
    img
}
