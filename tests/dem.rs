mod common;

use common::synthetic::{
    column_gradient_rgb, constant_disparity, ground_plane_disparity, row_transform, small_camera,
};
use stereo_dem::dem::{build_dem_with_report, cell_index, BucketLayout};
use stereo_dem::image::{ImageF32, ImageRgb8, RgbPixel};
use stereo_dem::{build_dem, DemCell, DemError, DemParams, DigitalElevationMapBuilder};

fn small_params() -> DemParams {
    DemParams {
        resolution_column: 2,
        resolution_disparity: 1,
        disparity_threshold_min: 0.0,
        disparity_threshold_max: 4.0,
        ..Default::default()
    }
}

#[test]
fn uniform_disparity_fills_every_cell() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut builder = DigitalElevationMapBuilder::with_params(small_camera(), small_params());
    builder.set_disparity_map(constant_disparity(4, 4, 1.0));
    builder.set_image(column_gradient_rgb(4, 4));

    let grid = builder.compute().expect("inputs attached");
    assert_eq!((grid.width, grid.height), (2, 1));
    for cell in grid.iter() {
        assert!(cell.is_valid(), "cell should be valid: {cell:?}");
        assert_ne!(cell.height_variance, -1.0);
        assert_ne!(cell.intensity_variance, -1.0);
        assert!(cell.y >= -0.5 && cell.y < 1.5);
    }
}

#[test]
fn background_only_map_yields_invalid_cells() {
    let params = DemParams {
        resolution_column: 4,
        resolution_disparity: 3,
        disparity_threshold_min: 2.0,
        disparity_threshold_max: 10.0,
        ..Default::default()
    };
    let mut disparity = constant_disparity(8, 6, 2.0);
    disparity.set(3, 3, -5.0);
    let grid = build_dem(&params, &small_camera(), &disparity, &column_gradient_rgb(8, 6)).unwrap();
    assert_eq!(grid.len(), 12);
    assert_eq!(grid.valid_count(), 0);
    for cell in grid.iter() {
        assert_eq!(cell.y, 0.0);
        assert_eq!(cell.intensity, 255.0);
        assert_eq!(cell.height_variance, -1.0);
        assert_eq!(cell.intensity_variance, -1.0);
    }
}

#[test]
fn repeated_compute_is_bit_identical() {
    let params = DemParams {
        resolution_column: 8,
        resolution_disparity: 4,
        disparity_threshold_min: 0.5,
        disparity_threshold_max: 20.0,
        ..Default::default()
    };
    let mut builder = DigitalElevationMapBuilder::with_params(small_camera(), params);
    builder.set_disparity_map(ground_plane_disparity(32, 24, 16.0));
    builder.set_image(column_gradient_rgb(32, 24));

    let a = builder.compute().unwrap();
    let b = builder.compute().unwrap();
    assert_eq!(a.len(), b.len());
    for (ca, cb) in a.iter().zip(b.iter()) {
        assert_eq!(ca.x.to_bits(), cb.x.to_bits());
        assert_eq!(ca.y.to_bits(), cb.y.to_bits());
        assert_eq!(ca.z.to_bits(), cb.z.to_bits());
        assert_eq!(ca.intensity.to_bits(), cb.intensity.to_bits());
        assert_eq!(ca.height_variance.to_bits(), cb.height_variance.to_bits());
        assert_eq!(ca.intensity_variance.to_bits(), cb.intensity_variance.to_bits());
    }
}

#[test]
fn single_pixel_lands_in_its_column_bucket() {
    let params = DemParams {
        resolution_column: 3,
        resolution_disparity: 2,
        disparity_threshold_min: 0.0,
        disparity_threshold_max: 8.0,
        ..Default::default()
    };
    let (w, h) = (9usize, 2usize);
    let image = ImageRgb8::filled(w, h, RgbPixel::new(40, 40, 40));
    let layout = BucketLayout::new(&params, w);
    assert_eq!(layout.column_step, 3);

    for column in 0..w {
        for (disparity, index_disparity) in [(1.0f32, 0usize), (6.0, 1)] {
            let mut map = ImageF32::new(w, h);
            map.set(column, 1, disparity);
            let grid = build_dem(&params, &row_transform, &map, &image).unwrap();

            let expected = cell_index(column / layout.column_step, index_disparity, 3);
            for (idx, cell) in grid.iter().enumerate() {
                assert_eq!(
                    cell.is_valid(),
                    idx == expected,
                    "pixel column={column} d={disparity}: cell {idx} validity mismatch"
                );
            }
            let hit = grid.points[expected];
            assert!((hit.y - 0.01).abs() < 1e-4, "y={}", hit.y);
            // One sample: the spread around its own bin is zero.
            assert_eq!(hit.height_variance, 0.0);
            assert_eq!(hit.intensity_variance, 0.0);
        }
    }
}

#[test]
fn cell_positions_follow_bucket_edges() {
    let params = DemParams {
        resolution_column: 2,
        resolution_disparity: 4,
        disparity_threshold_min: 1.0,
        disparity_threshold_max: 9.0,
        ..Default::default()
    };
    let grid = build_dem(
        &params,
        &row_transform,
        &constant_disparity(6, 2, 0.0),
        &column_gradient_rgb(6, 2),
    )
    .unwrap();
    // column_step = 3, disparity_step = 2
    assert_eq!(grid.at(1, 0).x, 3.0);
    assert_eq!(grid.at(0, 3).z, 7.0);
    assert_eq!(*grid.at(1, 2), DemCell::invalid(3.0, 5.0));
}

#[test]
fn min_points_threshold_gates_validity() {
    let params = DemParams {
        min_points_in_cell: 9,
        ..small_params()
    };
    let image = column_gradient_rgb(4, 4);
    // 4x4 map with column_step 2: every cell sees 8 samples.
    let grid = build_dem(&params, &row_transform, &constant_disparity(4, 4, 1.0), &image).unwrap();
    assert_eq!(grid.valid_count(), 0);

    let params = DemParams {
        min_points_in_cell: 8,
        ..small_params()
    };
    let grid = build_dem(&params, &row_transform, &constant_disparity(4, 4, 1.0), &image).unwrap();
    assert_eq!(grid.valid_count(), 2);
}

/// With the `parallel` feature off this compares the fallback path only; run
/// with `--features parallel` to exercise rayon.
#[test]
fn parallel_flag_matches_sequential_counts() {
    let base = DemParams {
        resolution_column: 16,
        resolution_disparity: 8,
        disparity_threshold_min: 0.5,
        disparity_threshold_max: 40.0,
        ..Default::default()
    };
    let disparity = ground_plane_disparity(64, 48, 32.0);
    let image = column_gradient_rgb(64, 48);

    let sequential = build_dem_with_report(&base, &small_camera(), &disparity, &image).unwrap();
    let parallel_params = DemParams {
        parallel_accumulation: true,
        ..base
    };
    let parallel =
        build_dem_with_report(&parallel_params, &small_camera(), &disparity, &image).unwrap();

    assert_eq!(sequential.accepted_pixels, parallel.accepted_pixels);
    assert_eq!(sequential.valid_cells, parallel.valid_cells);
    assert_eq!(sequential.grid, parallel.grid);
}

#[test]
fn builder_requires_an_image() {
    let mut builder = DigitalElevationMapBuilder::new(small_camera());
    builder.set_disparity_map(constant_disparity(4, 4, 1.0));
    assert_eq!(builder.compute().unwrap_err(), DemError::MissingImage);

    builder.set_image(column_gradient_rgb(4, 4));
    builder.set_resolution(2, 1);
    builder.set_disparity_thresholds(0.0, 4.0);
    assert!(builder.compute().is_ok());
}

#[test]
fn empty_disparity_window_gives_all_invalid_grid() {
    let params = DemParams {
        resolution_column: 2,
        resolution_disparity: 1,
        disparity_threshold_min: 5.0,
        disparity_threshold_max: 5.0,
        ..Default::default()
    };
    let disparity = constant_disparity(4, 4, 5.0);
    let image = column_gradient_rgb(4, 4);
    let report = build_dem_with_report(&params, &row_transform, &disparity, &image).unwrap();
    assert_eq!(report.accepted_pixels, 0);
    assert_eq!(report.valid_cells, 0);
    assert_eq!(report.grid.len(), 2);
    assert!(report.grid.iter().all(|cell| !cell.is_valid()));
}

