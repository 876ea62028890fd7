use crate::dem::DemParams;
use crate::stereo::StereoCamera;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DemDemoConfig {
    pub input: DemInputConfig,
    #[serde(default)]
    pub camera: StereoCamera,
    #[serde(default)]
    pub dem: DemParams,
    pub output: DemOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DemInputConfig {
    /// Whitespace-separated disparity values, row-major.
    pub disparity: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Color image registered with the disparity map.
    pub image: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DemOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
    /// Optional grayscale rendering of the disparity map.
    #[serde(default)]
    pub disparity_preview: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DemDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<DemDemoConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::parse_config;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(
            r#"{
                "input": {"disparity": "d.txt", "width": 4, "height": 3, "image": "c.png"},
                "dem": {"resolution_column": 2},
                "output": {"result_json": "out/dem.json"}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.input.width, 4);
        assert_eq!(cfg.dem.resolution_column, 2);
        assert_eq!(cfg.dem.resolution_disparity, 32);
        assert_eq!(cfg.camera.focal_length, 0.0);
        assert!(cfg.output.disparity_preview.is_none());
    }

    #[test]
    fn missing_output_is_an_error() {
        let err = parse_config(
            r#"{"input": {"disparity": "d.txt", "width": 1, "height": 1, "image": "c.png"}}"#,
        );
        assert!(err.is_err());
    }
}
