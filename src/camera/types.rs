//! Camera error types.

use thiserror::Error;

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Failed to open the camera device
    #[error("Failed to open camera: {0}")]
    OpenFailed(String),
    /// Camera permission denied (macOS)
    #[error("Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera")]
    PermissionDenied,
    /// Failed to start the video stream
    #[error("Failed to start camera stream: {0}")]
    StreamFailed(String),
    /// Failed to read a frame from an open stream
    #[error("Failed to read frame: {0}")]
    FrameRead(String),
    /// A captured frame could not be decoded to RGB
    #[error("Failed to decode frame: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_display() {
        assert_eq!(
            format!("{}", CameraError::OpenFailed("busy".to_string())),
            "Failed to open camera: busy"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert_eq!(
            format!("{}", CameraError::StreamFailed("no stream".to_string())),
            "Failed to start camera stream: no stream"
        );
        assert_eq!(
            format!("{}", CameraError::FrameRead("timeout".to_string())),
            "Failed to read frame: timeout"
        );
    }
}
