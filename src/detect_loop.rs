//! The per-frame detection loop.
//!
//! The loop is generic over its frame source and detector so the exact
//! console protocol can be exercised in tests without a camera or a model.
//! All exit paths (end-of-stream, quit key, interrupt) fall through to the
//! same place; resource release is handled by the handles' own `Drop` impls.

use std::io::Write;

use image::RgbImage;
use thiserror::Error;

use crate::camera::CameraCapture;
use crate::detector::{DetectError, Detection, Detector};
use crate::display::{DisplayError, PreviewWindow};
use crate::interrupt;
use crate::overlay;
use crate::stats::FpsTracker;

/// Anything that yields frames until the stream ends.
///
/// A read failure is end-of-stream, not an error: implementations return
/// `None` and the loop performs its normal cleanup.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<RgbImage>;
}

impl FrameSource for CameraCapture {
    fn next_frame(&mut self) -> Option<RgbImage> {
        match self.read_frame() {
            Ok(frame) => Some(frame),
            Err(e) => {
                log::debug!("frame read failed, treating as end of stream: {}", e);
                None
            }
        }
    }
}

/// Anything that turns a frame into detections.
pub trait Detect {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, DetectError>;
}

impl Detect for Detector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, DetectError> {
        Detector::detect(self, frame)
    }
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("Failed to write status output: {0}")]
    Output(#[from] std::io::Error),
}

/// What a finished loop run processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub phone_frames: u64,
}

pub fn status_text(detected: bool) -> &'static str {
    if detected {
        "PHONE DETECTED"
    } else {
        "no phone"
    }
}

/// Console status line for one frame.
pub fn status_line(frame: u64, detected: bool) -> String {
    format!("[{}] {}", frame, status_text(detected))
}

/// Run the detection loop until end-of-stream, quit key, or interrupt.
///
/// With a window, annotated frames are presented and the quit key polled;
/// without one, a status line per frame goes to `out` instead.
pub fn run_loop<S, D>(
    source: &mut S,
    detector: &mut D,
    mut window: Option<&mut PreviewWindow>,
    out: &mut dyn Write,
) -> Result<LoopSummary, LoopError>
where
    S: FrameSource,
    D: Detect,
{
    let mut stats = FpsTracker::new();
    let mut summary = LoopSummary::default();

    loop {
        if interrupt::interrupted() {
            break;
        }

        let Some(mut frame) = source.next_frame() else {
            println!("Failed to read frame from camera.");
            break;
        };
        summary.frames += 1;

        let detections = detector.detect(&frame)?;

        let mut phone_seen = false;
        for detection in detections.iter().filter(|d| d.is_phone()) {
            overlay::draw_detection(&mut frame, detection);
            phone_seen = true;
        }
        if phone_seen {
            summary.phone_frames += 1;
        }

        overlay::draw_status(&mut frame, phone_seen);

        if let Some(fps) = stats.tick() {
            overlay::draw_fps(&mut frame, fps);
        }

        if let Some(win) = window.as_mut() {
            win.present(&frame)?;
            if win.quit_requested() {
                break;
            }
        } else {
            writeln!(out, "{}", status_line(summary.frames, phone_seen))?;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(true), "PHONE DETECTED");
        assert_eq!(status_text(false), "no phone");
    }

    #[test]
    fn test_status_line_format() {
        assert_eq!(status_line(5, true), "[5] PHONE DETECTED");
        assert_eq!(status_line(23, false), "[23] no phone");
    }
}
