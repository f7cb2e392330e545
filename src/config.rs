//! Configuration file handling.
//!
//! Loads configuration from `~/.config/phonespotter/config.toml` or a custom
//! path. Every field is optional; CLI flags override config values, which
//! override built-in defaults. A missing file is not an error, and a
//! malformed one degrades to defaults with a warning.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraSection,
    #[serde(default)]
    pub detector: DetectorSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct CameraSection {
    /// Camera device index
    pub device: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DetectorSection {
    /// Model identifier (path, cached name, or downloadable name)
    pub model: Option<String>,
    /// Confidence threshold (0..1)
    pub confidence: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct UiSection {
    /// Show the preview window
    #[serde(default = "default_true")]
    pub preview: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { preview: true }
    }
}

fn default_true() -> bool {
    true
}

/// Default config file path: ~/.config/phonespotter/config.toml
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("phonespotter")
        .join("config.toml")
}

/// Load and parse a config file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Load the config at `path` (or the default location), degrading to
/// defaults if the file is missing or malformed.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    if !path.exists() {
        return Config::default();
    }
    match load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.camera.device.is_none());
        assert!(config.detector.model.is_none());
        assert!(config.detector.confidence.is_none());
        assert!(config.ui.preview);
    }

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            device = 2

            [detector]
            model = "yolov8s.onnx"
            confidence = 0.5

            [ui]
            preview = false
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.device, Some(2));
        assert_eq!(config.detector.model.as_deref(), Some("yolov8s.onnx"));
        assert_eq!(config.detector.confidence, Some(0.5));
        assert!(!config.ui.preview);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_or_default(Some(Path::new("/definitely/missing/config.toml")));
        assert!(config.camera.device.is_none());
    }

    #[test]
    fn test_load_or_default_malformed_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"not [ valid toml").unwrap();

        let config = load_or_default(Some(&path));
        assert!(config.camera.device.is_none());
        assert!(config.ui.preview);
    }
}
