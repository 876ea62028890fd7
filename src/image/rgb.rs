//! Owned 3-channel 8-bit color image registered with the disparity map.
use serde::{Deserialize, Serialize};

/// One RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbPixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbPixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level as the truncated integer mean of the three channels.
    ///
    /// The division happens in integer arithmetic before the conversion to
    /// `f32`, so `(1, 1, 2)` yields `1.0`, not `1.333`.
    #[inline]
    pub fn gray(self) -> f32 {
        let sum = self.r as u32 + self.g as u32 + self.b as u32;
        (sum / 3) as f32
    }
}

/// Row-major RGB buffer (stride == width).
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRgb8 {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: Vec<RgbPixel>,
}

impl ImageRgb8 {
    /// Construct a `w × h` image with every pixel set to `pixel`.
    pub fn filled(w: usize, h: usize, pixel: RgbPixel) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![pixel; w * h],
        }
    }

    /// Wrap existing pixels. Returns `None` when `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<RgbPixel>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Build from interleaved `RGBRGB...` bytes.
    pub fn from_interleaved(w: usize, h: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != w * h * 3 {
            return None;
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| RgbPixel::new(c[0], c[1], c[2]))
            .collect();
        Self::from_vec(w, h, data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> RgbPixel {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: RgbPixel) {
        let i = y * self.stride + x;
        self.data[i] = pixel;
    }
}

impl crate::image::traits::ImageView for ImageRgb8 {
    type Pixel = RgbPixel;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[RgbPixel] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
