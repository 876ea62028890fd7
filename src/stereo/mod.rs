//! Stereo geometry collaborators.
//!
//! - [`CoordinateTransform`]: maps `(row, column, disparity)` to a 3-D point.
//!   The elevation-map builder only talks to this trait.
//! - [`StereoCamera`]: pinhole stereo rig (principal point, focal length,
//!   baseline) implementing the transform.
//! - [`DisparityMapConverter`]: turns a whole disparity map into an organized
//!   point cloud with per-pixel intensity.

mod camera;
mod converter;

pub use camera::{CoordinateTransform, StereoCamera};
pub use converter::DisparityMapConverter;
