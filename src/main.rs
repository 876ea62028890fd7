use stereo_dem::image::{ImageF32, ImageRgb8, RgbPixel};
use stereo_dem::{DigitalElevationMapBuilder, StereoCamera};

fn main() {
    env_logger::init();

    // Demo stub: a ground plane filling the lower half of a 640x480 frame.
    let w = 640usize;
    let h = 480usize;
    let camera = StereoCamera::new(320.0, 240.0, 500.0, 0.12);
    let mut disparity = ImageF32::new(w, h);
    for y in h / 2..h {
        let d = 2.0 + 60.0 * (y - h / 2) as f32 / (h / 2) as f32;
        for x in 0..w {
            disparity.set(x, y, d);
        }
    }
    let image = ImageRgb8::filled(w, h, RgbPixel::new(96, 128, 64));

    let mut builder = DigitalElevationMapBuilder::new(camera);
    builder.set_disparity_thresholds(1.0, 64.0);
    builder.set_disparity_map(disparity);
    builder.set_image(image);
    match builder.compute_with_report() {
        Ok(report) => println!(
            "valid_cells={}/{} accepted_pixels={} latency_ms={:.3}",
            report.valid_cells, report.total_cells, report.accepted_pixels, report.timing.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
