//! Camera capture module for webcam access and frame capture.
//!
//! This module provides a small synchronous API on top of nokhwa:
//! - Index probing via [`list_camera_indexes`]
//! - Blocking capture via [`CameraCapture`]

mod capture;
mod probe;
mod types;

pub use capture::CameraCapture;
pub use probe::list_camera_indexes;
pub use types::CameraError;
