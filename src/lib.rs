#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod dem;
pub mod diagnostics;
pub mod error;
pub mod histogram;
pub mod image;
pub mod stereo;
pub mod types;

// Demo tool configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::dem::{build_dem, DemCell, DemGrid, DemParams, DigitalElevationMapBuilder};
pub use crate::diagnostics::DemReport;
pub use crate::error::DemError;
pub use crate::histogram::{FeatureHistogram, HistogramSpec};
pub use crate::stereo::{CoordinateTransform, DisparityMapConverter, StereoCamera};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use stereo_dem::prelude::*;
///
/// # fn main() -> Result<(), DemError> {
/// let (w, h) = (640usize, 480usize);
/// let mut builder = DigitalElevationMapBuilder::new(StereoCamera::new(320.0, 240.0, 500.0, 0.12));
/// builder.set_disparity_thresholds(5.0, 60.0);
/// builder.set_disparity_map(ImageF32::filled(w, h, 20.0));
/// builder.set_image(ImageRgb8::filled(w, h, RgbPixel::new(120, 120, 120)));
///
/// let grid = builder.compute()?;
/// println!("valid cells: {}/{}", grid.valid_count(), grid.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageRgb8, RgbPixel};
    pub use crate::{
        DemCell, DemError, DemGrid, DemParams, DigitalElevationMapBuilder, StereoCamera,
    };
}
