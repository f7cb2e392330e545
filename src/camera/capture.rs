//! Synchronous camera capture handle.

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use super::types::CameraError;

/// Preferred capture resolution. The camera may negotiate something else.
const REQUESTED_WIDTH: u32 = 640;
const REQUESTED_HEIGHT: u32 = 480;
const REQUESTED_FPS: u32 = 30;

/// Camera capture handle.
///
/// Wraps a nokhwa [`Camera`] with an open stream. Reads are blocking and happen
/// on the calling thread; the stream is stopped when the handle is dropped, so
/// every exit path releases the device exactly once.
pub struct CameraCapture {
    camera: Camera,
    index: u32,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Open the camera at `index` and start its stream.
    ///
    /// # Errors
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::OpenFailed` - If no supported format could be opened
    /// * `CameraError::StreamFailed` - If the stream fails to start
    pub fn open(index: u32) -> Result<Self, CameraError> {
        let mut camera = open_camera_with_fallback(&CameraIndex::Index(index))?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;
        Ok(Self { camera, index })
    }

    /// The device index this handle was opened with.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The resolution the camera actually negotiated.
    pub fn resolution(&self) -> (u32, u32) {
        let res = self.camera.resolution();
        (res.width(), res.height())
    }

    /// Read and decode a single frame. Blocks until a frame is available.
    ///
    /// # Errors
    /// * `CameraError::FrameRead` - If the device did not deliver a frame
    /// * `CameraError::Decode` - If the frame could not be converted to RGB
    pub fn read_frame(&mut self) -> Result<RgbImage, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::FrameRead(e.to_string()))?;
        let decoded = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::Decode(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        // Rebuild through the raw buffer so the frame uses our `image` version,
        // independent of the one nokhwa decodes with.
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| CameraError::Decode("decoded buffer has wrong length".to_string()))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(index: &CameraIndex) -> Result<Camera, CameraError> {
    // Format strategies in order of preference:
    // 1. Closest match with NV12 (common on macOS)
    // 2. Closest match with MJPEG (widely supported)
    // 3. Highest resolution available (let the camera decide)
    let format_attempts: Vec<RequestedFormat> = vec![
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            Resolution::new(REQUESTED_WIDTH, REQUESTED_HEIGHT),
            NokhwaFrameFormat::NV12,
            REQUESTED_FPS,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            Resolution::new(REQUESTED_WIDTH, REQUESTED_HEIGHT),
            NokhwaFrameFormat::MJPEG,
            REQUESTED_FPS,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;

    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    let e = last_error.expect("at least one format attempt was made");
    let msg = e.to_string().to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_invalid_device_fails() {
        // Use a device index that is very unlikely to exist
        let result = CameraCapture::open(999);
        assert!(result.is_err());
    }
}
