//! Digital elevation maps from stereo disparity.
//!
//! Overview
//! - The image is split into `resolution_column` column buckets of
//!   `ceil(width / resolution_column)` pixels and the disparity window into
//!   `resolution_disparity` equal buckets. Each `(column, disparity)` bucket
//!   pair is one grid cell.
//! - Accumulation: every pixel with a disparity strictly inside the window is
//!   triangulated through a [`CoordinateTransform`](crate::stereo::CoordinateTransform);
//!   its height (`y`) and gray level go into the cell's height and intensity
//!   histograms.
//! - Reduction: each cell reports the histogram modes and their
//!   count-weighted spread. Cells with fewer than `min_points_in_cell`
//!   height samples get `y = 0`, `intensity = 255` and variances of `-1`.
//!   The cell position (`x`, `z`) is the transform of the bucket's lower
//!   column/disparity edge at row 0.
//!
//! Modules
//! - [`params`] – grid configuration.
//! - [`layout`] – bucket geometry and the flat cell index shared by both passes.
//! - [`cells`] – per-cell histogram storage.
//! - [`grid`] – output cell and grid types.
//! - `builder` – [`DigitalElevationMapBuilder`] and the free [`build_dem`].

mod builder;
pub mod cells;
pub mod grid;
pub mod layout;
pub mod params;

pub use builder::{build_dem, build_dem_with_report, DigitalElevationMapBuilder};
pub use grid::{DemCell, DemGrid};
pub use layout::{cell_index, BucketLayout};
pub use params::DemParams;
