//! I/O helpers for disparity maps, color images and JSON.
//!
//! - `load_disparity_map`: read a whitespace-separated text file of floats.
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned RGB buffer.
//! - `save_disparity_preview`: write a disparity map as a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageRgb8, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a `width × height` disparity map stored as whitespace-separated
/// floats in row-major order. Extra trailing values are rejected too.
pub fn load_disparity_map(path: &Path, width: usize, height: usize) -> Result<ImageF32, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read disparity map {}: {e}", path.display()))?;
    parse_disparity_map(&text, width, height)
        .map_err(|e| format!("Invalid disparity map {}: {e}", path.display()))
}

pub(crate) fn parse_disparity_map(
    text: &str,
    width: usize,
    height: usize,
) -> Result<ImageF32, String> {
    let expected = width * height;
    let mut data = Vec::with_capacity(expected);
    for (i, token) in text.split_whitespace().enumerate() {
        let value: f32 = token
            .parse()
            .map_err(|e| format!("value #{i} ({token:?}) is not a number: {e}"))?;
        data.push(value);
    }
    if data.len() != expected {
        return Err(format!(
            "expected {expected} values for {width}x{height}, found {}",
            data.len()
        ));
    }
    ImageF32::from_vec(width, height, data).ok_or_else(|| "buffer size mismatch".to_string())
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<ImageRgb8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageRgb8::from_interleaved(width, height, img.as_raw())
        .ok_or_else(|| format!("Unexpected pixel layout in {}", path.display()))
}

/// Save a disparity map as a grayscale PNG, mapping `[0, max_disparity]`
/// linearly onto `[0, 255]`.
pub fn save_disparity_preview(
    disparity: &ImageF32,
    max_disparity: f32,
    path: &Path,
) -> Result<(), String> {
    if !(max_disparity > 0.0) {
        return Err(format!("max_disparity must be positive, got {max_disparity}"));
    }
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(disparity.w as u32, disparity.h as u32);
    for (y, row) in disparity.rows().enumerate() {
        for (x, &d) in row.iter().enumerate() {
            let v = (d / max_disparity * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
