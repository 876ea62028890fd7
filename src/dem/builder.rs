use super::cells::CellHistograms;
use super::grid::{DemCell, DemGrid};
use super::layout::{cell_index, BucketLayout};
use super::DemParams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DemReport, InputDescriptor, TimingBreakdown};
use crate::error::{DemError, Result};
use crate::image::{ImageF32, ImageRgb8, ImageView, RgbPixel};
use crate::stereo::CoordinateTransform;
use log::{debug, error};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds elevation maps from an attached disparity map and color image.
///
/// The builder only stores configuration and inputs; every call to
/// [`compute`](Self::compute) works on a snapshot of the current parameters
/// and allocates its own histograms.
#[derive(Clone, Debug)]
pub struct DigitalElevationMapBuilder<T> {
    transform: T,
    params: DemParams,
    disparity_map: Option<ImageF32>,
    image: Option<ImageRgb8>,
}

impl<T: CoordinateTransform> DigitalElevationMapBuilder<T> {
    pub fn new(transform: T) -> Self {
        Self::with_params(transform, DemParams::default())
    }

    pub fn with_params(transform: T, params: DemParams) -> Self {
        Self {
            transform,
            params,
            disparity_map: None,
            image: None,
        }
    }

    pub fn params(&self) -> &DemParams {
        &self.params
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn set_resolution(&mut self, resolution_column: usize, resolution_disparity: usize) {
        self.params.resolution_column = resolution_column;
        self.params.resolution_disparity = resolution_disparity;
    }

    pub fn column_resolution(&self) -> usize {
        self.params.resolution_column
    }

    pub fn disparity_resolution(&self) -> usize {
        self.params.resolution_disparity
    }

    pub fn set_min_points_in_cell(&mut self, min_points_in_cell: usize) {
        self.params.min_points_in_cell = min_points_in_cell;
    }

    pub fn min_points_in_cell(&self) -> usize {
        self.params.min_points_in_cell
    }

    pub fn set_disparity_thresholds(&mut self, min: f32, max: f32) {
        self.params.disparity_threshold_min = min;
        self.params.disparity_threshold_max = max;
    }

    pub fn disparity_threshold_min(&self) -> f32 {
        self.params.disparity_threshold_min
    }

    pub fn disparity_threshold_max(&self) -> f32 {
        self.params.disparity_threshold_max
    }

    pub fn set_disparity_map(&mut self, disparity_map: ImageF32) {
        self.disparity_map = Some(disparity_map);
    }

    pub fn disparity_map(&self) -> Option<&ImageF32> {
        self.disparity_map.as_ref()
    }

    pub fn set_image(&mut self, image: ImageRgb8) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageRgb8> {
        self.image.as_ref()
    }

    /// Compute the elevation map for the attached inputs.
    pub fn compute(&self) -> Result<DemGrid> {
        self.compute_with_report().map(|report| report.grid)
    }

    /// Like [`compute`](Self::compute), also returning counters and timings.
    pub fn compute_with_report(&self) -> Result<DemReport> {
        let params = self.params.clone();
        let image = self.image.as_ref().ok_or_else(|| {
            error!("DigitalElevationMapBuilder::compute: no color image attached");
            DemError::MissingImage
        })?;
        let disparity = self.disparity_map.as_ref().ok_or_else(|| {
            error!("DigitalElevationMapBuilder::compute: no disparity map attached");
            DemError::MissingDisparityMap
        })?;
        build_dem_with_report(&params, &self.transform, disparity, image)
    }
}

/// Build an elevation map from explicit inputs.
pub fn build_dem<T: CoordinateTransform + ?Sized>(
    params: &DemParams,
    transform: &T,
    disparity: &ImageF32,
    image: &ImageRgb8,
) -> Result<DemGrid> {
    build_dem_with_report(params, transform, disparity, image).map(|report| report.grid)
}

pub fn build_dem_with_report<T: CoordinateTransform + ?Sized>(
    params: &DemParams,
    transform: &T,
    disparity: &ImageF32,
    image: &ImageRgb8,
) -> Result<DemReport> {
    let t_total = Instant::now();
    params.validate().map_err(|e| {
        error!("build_dem: {e}");
        e
    })?;
    if image.dimensions() != disparity.dimensions() {
        error!(
            "build_dem: image {}x{} does not match disparity map {}x{}",
            image.w, image.h, disparity.w, disparity.h
        );
        return Err(DemError::DimensionMismatch {
            disparity_w: disparity.w,
            disparity_h: disparity.h,
            image_w: image.w,
            image_h: image.h,
        });
    }

    let mut timing = TimingBreakdown::default();
    let layout = BucketLayout::new(params, disparity.w);
    let mut stage = Instant::now();
    let cells = CellHistograms::new(layout.cell_count())?;
    stage = timing.lap("allocate", stage);

    let (cells, accepted_pixels) = if params.window_is_empty() {
        debug!(
            "DEM: empty disparity window ({}, {}), skipping accumulation",
            params.disparity_threshold_min, params.disparity_threshold_max
        );
        (cells, 0)
    } else if params.parallel_accumulation {
        accumulate_parallel(&layout, transform, disparity, image, cells)?
    } else {
        let mut cells = cells;
        let accepted = accumulate(&layout, transform, disparity, image, &mut cells);
        (cells, accepted)
    };
    stage = timing.lap("accumulate", stage);

    let grid = reduce(&layout, params.min_points_in_cell, transform, &cells);
    timing.lap("reduce", stage);
    timing.total_ms = elapsed_ms(t_total);

    let valid_cells = grid.valid_count();
    debug!(
        "DEM: input={}x{} grid={}x{} accepted={} valid_cells={}/{} column_step={} disparity_step={:.4} elapsed_ms={:.3}",
        disparity.w,
        disparity.h,
        layout.resolution_column,
        layout.resolution_disparity,
        accepted_pixels,
        valid_cells,
        grid.len(),
        layout.column_step,
        layout.disparity_step,
        timing.total_ms
    );

    Ok(DemReport {
        params: params.clone(),
        input: InputDescriptor {
            width: disparity.w,
            height: disparity.h,
        },
        accepted_pixels,
        valid_cells,
        total_cells: grid.len(),
        column_step: layout.column_step,
        disparity_step: layout.disparity_step,
        timing,
        grid,
    })
}

/// Route one image row into the cell histograms. Returns the number of
/// pixels inside the disparity window.
fn accumulate_row<T: CoordinateTransform + ?Sized>(
    layout: &BucketLayout,
    transform: &T,
    row: usize,
    disparities: &[f32],
    pixels: &[RgbPixel],
    cells: &mut CellHistograms,
) -> usize {
    let mut accepted = 0usize;
    for (column, (&d, &px)) in disparities.iter().zip(pixels).enumerate() {
        if !layout.accepts(d) {
            continue;
        }
        let height = transform.translate(row, column, d).y;
        cells.insert(layout.bucket(column, d), height, px.gray());
        accepted += 1;
    }
    accepted
}

fn accumulate<T: CoordinateTransform + ?Sized>(
    layout: &BucketLayout,
    transform: &T,
    disparity: &ImageF32,
    image: &ImageRgb8,
    cells: &mut CellHistograms,
) -> usize {
    disparity
        .rows()
        .zip(image.rows())
        .enumerate()
        .map(|(row, (d, px))| accumulate_row(layout, transform, row, d, px, cells))
        .sum()
}

#[cfg(feature = "parallel")]
fn accumulate_parallel<T: CoordinateTransform + ?Sized>(
    layout: &BucketLayout,
    transform: &T,
    disparity: &ImageF32,
    image: &ImageRgb8,
    cells: CellHistograms,
) -> Result<(CellHistograms, usize)> {
    let partials: Vec<(CellHistograms, usize)> = (0..disparity.h)
        .into_par_iter()
        .fold(
            || (cells.cleared_like(), 0usize),
            |(mut local, accepted), row| {
                let n = accumulate_row(
                    layout,
                    transform,
                    row,
                    disparity.row(row),
                    image.row(row),
                    &mut local,
                );
                (local, accepted + n)
            },
        )
        .collect();

    let mut merged = cells;
    let mut accepted = 0usize;
    for (local, n) in &partials {
        merged.merge(local)?;
        accepted += n;
    }
    Ok((merged, accepted))
}

#[cfg(not(feature = "parallel"))]
fn accumulate_parallel<T: CoordinateTransform + ?Sized>(
    layout: &BucketLayout,
    transform: &T,
    disparity: &ImageF32,
    image: &ImageRgb8,
    mut cells: CellHistograms,
) -> Result<(CellHistograms, usize)> {
    debug!("DEM: built without the `parallel` feature, accumulating sequentially");
    let accepted = accumulate(layout, transform, disparity, image, &mut cells);
    Ok((cells, accepted))
}

/// Collapse every cell's histograms into one [`DemCell`].
fn reduce<T: CoordinateTransform + ?Sized>(
    layout: &BucketLayout,
    min_points: usize,
    transform: &T,
    cells: &CellHistograms,
) -> DemGrid {
    let mut grid = DemGrid::new(layout.resolution_column, layout.resolution_disparity);
    for index_column in 0..layout.resolution_column {
        for index_disparity in 0..layout.resolution_disparity {
            let index = cell_index(index_column, index_disparity, layout.resolution_column);
            let (column, disparity) = layout.representative(index_column, index_disparity);
            let anchor = transform.translate(0, column, disparity);

            let height_hist = cells.height(index);
            let cell = if height_hist.number_of_elements() >= min_points {
                let intensity_hist = cells.intensity(index);
                let y = height_hist.mean_value();
                let intensity = intensity_hist.mean_value();
                DemCell {
                    x: anchor.x,
                    y,
                    z: anchor.z,
                    intensity,
                    height_variance: height_hist.variance(y),
                    intensity_variance: intensity_hist.variance(intensity),
                }
            } else {
                DemCell::invalid(anchor.x, anchor.z)
            };
            *grid.at_mut(index_column, index_disparity) = cell;
        }
    }
    grid
}
