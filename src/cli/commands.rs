//! Subcommand handlers.

use crate::camera;
use crate::devices;

/// How many indexes the lister probes.
pub const DEFAULT_PROBE_LIMIT: u32 = 10;

/// Probe camera indexes, resolve display names, and print the merged result.
pub fn list_cameras() {
    let available = camera::list_camera_indexes(DEFAULT_PROBE_LIMIT);
    let resolution = devices::platform_source().resolve();

    if let devices::NameResolution::Degraded { reason, .. } = &resolution {
        println!("Could not read camera names: {}", reason);
    }

    if available.is_empty() {
        println!("No cameras found.");
        return;
    }

    println!("Detected cameras:");
    for index in available {
        println!("  Index {}: {}", index, resolution.display_name(index));
    }
}
