//! Error types shared by the converter and the elevation-map builder.

use crate::histogram::HistogramError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemError {
    #[error("no color image attached")]
    MissingImage,

    #[error("no disparity map attached")]
    MissingDisparityMap,

    #[error("image is {image_w}x{image_h} but the disparity map is {disparity_w}x{disparity_h}")]
    DimensionMismatch {
        disparity_w: usize,
        disparity_h: usize,
        image_w: usize,
        image_h: usize,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Histogram(#[from] HistogramError),
}
