//! Input buffers consumed by the elevation-map builder.
//!
//! - [`ImageF32`]: dense disparity map, one `f32` per pixel.
//! - [`ImageRgb8`]: registered color image with identical dimensions.
//! - [`io`]: loaders for disparity text files and color images, plus JSON output.
pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::rgb::{ImageRgb8, RgbPixel};
pub use self::traits::{ImageView, Rows};
