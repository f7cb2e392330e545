//! Human-readable camera name resolution.
//!
//! Probing (`camera::list_camera_indexes`) tells us which indexes work; this
//! module tries to attach display names to them. Each operating system has its
//! own best-effort source, selected at startup via [`platform_source`]. A
//! source never fails the caller: missing tools and parse problems degrade to
//! a partial (possibly empty) mapping.

use std::collections::HashMap;
use std::process::{Command, Stdio};

/// Placeholder shown for indexes without a resolved name.
pub const UNKNOWN_NAME: &str = "(unknown name)";

/// Result of a name lookup: either a fully resolved mapping or a degraded one
/// carrying whatever partial mapping was built plus the reason.
#[derive(Debug)]
pub enum NameResolution {
    Resolved(HashMap<u32, String>),
    Degraded {
        names: HashMap<u32, String>,
        reason: String,
    },
}

impl NameResolution {
    fn degraded_empty(reason: impl Into<String>) -> Self {
        NameResolution::Degraded {
            names: HashMap::new(),
            reason: reason.into(),
        }
    }

    /// The index-to-name mapping, complete or partial.
    pub fn names(&self) -> &HashMap<u32, String> {
        match self {
            NameResolution::Resolved(names) => names,
            NameResolution::Degraded { names, .. } => names,
        }
    }

    /// Display name for `index`, falling back to [`UNKNOWN_NAME`].
    pub fn display_name(&self, index: u32) -> &str {
        self.names()
            .get(&index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, NameResolution::Degraded { .. })
    }
}

/// A per-platform source of camera display names.
///
/// Implementations are best-effort and must not panic or propagate errors;
/// callers only ever see a [`NameResolution`].
pub trait NameSource {
    fn resolve(&self) -> NameResolution;
}

/// Select the name source for the host operating system.
pub fn platform_source() -> Box<dyn NameSource> {
    #[cfg(target_os = "linux")]
    {
        Box::new(V4l2NameSource)
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(SystemProfilerNameSource)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        Box::new(DeviceGraphNameSource)
    }
}

/// Linux: `v4l2-ctl --list-devices`.
pub struct V4l2NameSource;

impl NameSource for V4l2NameSource {
    fn resolve(&self) -> NameResolution {
        let output = Command::new("v4l2-ctl")
            .arg("--list-devices")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return NameResolution::degraded_empty(
                        "v4l2-ctl not found. Install it with your package manager \
                         (e.g. apt install v4l-utils) to see camera names.",
                    );
                }
                return NameResolution::degraded_empty(format!("Failed to run v4l2-ctl: {}", e));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        NameResolution::Resolved(parse_v4l2_devices(&stdout))
    }
}

/// Parse `v4l2-ctl --list-devices` output.
///
/// Non-indented lines are device names; the indented lines below each name
/// are device paths. The trailing number of a `/dev/videoN` path becomes the
/// index for the preceding name. Malformed indexes are silently skipped.
pub fn parse_v4l2_devices(stdout: &str) -> HashMap<u32, String> {
    let mut names = HashMap::new();
    let mut current_name: Option<String> = None;

    for line in stdout.lines() {
        if line.starts_with('\t') || line.starts_with(' ') {
            if let (Some(name), Some(index)) = (&current_name, parse_video_index(line.trim())) {
                names.insert(index, name.clone());
            }
        } else if !line.trim().is_empty() {
            current_name = Some(line.trim().to_string());
        }
    }

    names
}

/// Extract `N` from a `/dev/videoN` device path, if well-formed.
pub fn parse_video_index(path: &str) -> Option<u32> {
    let rest = path.split("/dev/video").nth(1)?;
    rest.parse().ok()
}

/// macOS: `system_profiler SPCameraDataType`.
pub struct SystemProfilerNameSource;

impl NameSource for SystemProfilerNameSource {
    fn resolve(&self) -> NameResolution {
        let output = Command::new("system_profiler")
            .arg("SPCameraDataType")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                return NameResolution::degraded_empty(format!(
                    "Failed to run system_profiler: {}",
                    e
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let cameras = parse_system_profiler_cameras(&stdout);
        if !cameras.is_empty() {
            // The profiler does not report device indexes, so positions in its
            // output are assigned sequentially. These may not line up with the
            // indexes the capture library probes.
            log::warn!(
                "camera names from system_profiler are assigned positionally and \
                 may not match probe indexes"
            );
        }
        NameResolution::Resolved(
            cameras
                .into_iter()
                .enumerate()
                .map(|(i, name)| (i as u32, name))
                .collect(),
        )
    }
}

/// Parse `system_profiler SPCameraDataType` output: camera entries are the
/// lines ending in `Camera:`, in report order.
pub fn parse_system_profiler_cameras(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.ends_with("Camera:"))
        .map(|line| line.replace(':', ""))
        .collect()
}

/// Windows (and any other backend nokhwa supports): the capture library's own
/// device graph.
pub struct DeviceGraphNameSource;

impl NameSource for DeviceGraphNameSource {
    fn resolve(&self) -> NameResolution {
        match nokhwa::query(nokhwa::utils::ApiBackend::Auto) {
            Ok(devices) => NameResolution::Resolved(
                devices
                    .into_iter()
                    .enumerate()
                    .map(|(position, d)| {
                        let index = d.index().as_index().unwrap_or(position as u32);
                        (index, d.human_name())
                    })
                    .collect(),
            ),
            Err(e) => {
                println!("(Tip: camera name lookup needs a working capture backend)");
                NameResolution::degraded_empty(format!("Failed to query capture devices: {}", e))
            }
        }
    }
}
