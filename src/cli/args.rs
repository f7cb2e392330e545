//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

pub const DEFAULT_CAMERA: u32 = 0;
pub const DEFAULT_CONFIDENCE: f32 = 0.35;
pub const DEFAULT_MODEL: &str = "yolov8n.onnx";

/// Detect phones from a webcam feed using a YOLO model
#[derive(Parser, Debug)]
#[command(name = "phonespotter")]
#[command(version, about = "Detect phones from a webcam feed using a YOLO model", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera index (default: 0)
    #[arg(long)]
    pub cam: Option<u32>,

    /// Confidence threshold, 0..1 (default: 0.35)
    #[arg(long, value_parser = parse_confidence)]
    pub conf: Option<f32>,

    /// YOLO model: a path, a cached name, or a downloadable name
    /// (default: yolov8n.onnx)
    #[arg(long)]
    pub model: Option<String>,

    /// Disable the preview window and print status lines instead
    #[arg(long)]
    pub no_show: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub cam: u32,
    pub conf: f32,
    pub model: String,
    pub show: bool,
}

impl Args {
    /// Merge: CLI flag, then config value, then built-in default.
    pub fn resolve(&self, config: &Config) -> RunSettings {
        RunSettings {
            cam: self
                .cam
                .or(config.camera.device)
                .unwrap_or(DEFAULT_CAMERA),
            conf: self
                .conf
                .or(config.detector.confidence)
                .unwrap_or(DEFAULT_CONFIDENCE),
            model: self
                .model
                .clone()
                .or_else(|| config.detector.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            show: !self.no_show && config.ui.preview,
        }
    }
}

/// Parse and validate a confidence threshold (0.0-1.0)
fn parse_confidence(s: &str) -> Result<f32, String> {
    let conf: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=1.0).contains(&conf) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            conf
        ));
    }
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["phonespotter"]);
        assert!(args.command.is_none());
        assert!(args.cam.is_none());
        assert!(args.conf.is_none());
        assert!(args.model.is_none());
        assert!(!args.no_show);
        assert!(args.config.is_none());

        let settings = args.resolve(&Config::default());
        assert_eq!(settings.cam, 0);
        assert_eq!(settings.conf, 0.35);
        assert_eq!(settings.model, "yolov8n.onnx");
        assert!(settings.show);
    }

    #[test]
    fn test_args_all_flags() {
        let args = Args::parse_from([
            "phonespotter",
            "--cam",
            "2",
            "--conf",
            "0.6",
            "--model",
            "yolov8s.onnx",
            "--no-show",
        ]);
        let settings = args.resolve(&Config::default());
        assert_eq!(settings.cam, 2);
        assert_eq!(settings.conf, 0.6);
        assert_eq!(settings.model, "yolov8s.onnx");
        assert!(!settings.show);
    }

    #[test]
    fn test_args_conf_out_of_range_rejected() {
        assert!(Args::try_parse_from(["phonespotter", "--conf", "1.5"]).is_err());
        assert!(Args::try_parse_from(["phonespotter", "--conf", "-0.1"]).is_err());
        assert!(Args::try_parse_from(["phonespotter", "--conf", "abc"]).is_err());
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["phonespotter", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["phonespotter", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));
    }

    #[test]
    fn test_resolve_prefers_cli_over_config() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            device = 3

            [detector]
            model = "from-config.onnx"
            confidence = 0.7
            "#,
        )
        .unwrap();

        let args = Args::parse_from(["phonespotter", "--cam", "1"]);
        let settings = args.resolve(&config);
        assert_eq!(settings.cam, 1);
        assert_eq!(settings.conf, 0.7);
        assert_eq!(settings.model, "from-config.onnx");
    }

    #[test]
    fn test_resolve_config_can_disable_preview() {
        let config: Config = toml::from_str("[ui]\npreview = false\n").unwrap();
        let args = Args::parse_from(["phonespotter"]);
        assert!(!args.resolve(&config).show);
    }
}
