use std::env;
use std::path::Path;
use stereo_dem::config::dem;
use stereo_dem::image::io::{
    load_disparity_map, load_rgb_image, save_disparity_preview, write_json_file,
};
use stereo_dem::DigitalElevationMapBuilder;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = dem::load_config(Path::new(&config_path))?;

    let disparity = load_disparity_map(
        &config.input.disparity,
        config.input.width,
        config.input.height,
    )?;
    let image = load_rgb_image(&config.input.image)?;

    if let Some(preview) = &config.output.disparity_preview {
        let max = disparity
            .data
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0f32, f32::max);
        save_disparity_preview(&disparity, max.max(1.0), preview)?;
    }

    let mut builder = DigitalElevationMapBuilder::with_params(config.camera, config.dem);
    builder.set_disparity_map(disparity);
    builder.set_image(image);
    let report = builder.compute_with_report().map_err(|e| e.to_string())?;

    println!(
        "grid={}x{} valid_cells={}/{} accepted_pixels={} latency_ms={:.3}",
        report.grid.width,
        report.grid.height,
        report.valid_cells,
        report.total_cells,
        report.accepted_pixels,
        report.timing.total_ms
    );
    write_json_file(&config.output.result_json, &report)?;
    println!("Saved DEM report to {}", config.output.result_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: dem_demo <config.json>".to_string()
}
