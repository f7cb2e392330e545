//! Preview window for annotated frames.

use image::RgbImage;
use minifb::{Key, Window, WindowOptions};
use thiserror::Error;

pub const WINDOW_TITLE: &str = "Phone Detector";

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Failed to open preview window: {0}")]
    Open(String),
    #[error("Failed to present frame: {0}")]
    Present(String),
}

/// A minifb window presenting RGB frames.
///
/// Key state is polled as part of each present, so quit detection is
/// non-blocking. The window closes when the handle is dropped.
pub struct PreviewWindow {
    window: Window,
}

impl PreviewWindow {
    /// Open a window sized to the camera resolution.
    pub fn open(width: u32, height: u32) -> Result<Self, DisplayError> {
        let mut window = Window::new(
            &format!("{} - press 'q' to quit", WINDOW_TITLE),
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| DisplayError::Open(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Present one frame, updating window input state.
    pub fn present(&mut self, frame: &RgbImage) -> Result<(), DisplayError> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let buffer = rgb_to_argb(frame.as_raw(), width, height);
        self.window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| DisplayError::Present(e.to_string()))
    }

    /// Whether the user asked to quit (q, Escape, or window closed).
    pub fn quit_requested(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_down(Key::Q)
            || self.window.is_key_down(Key::Escape)
    }
}

/// Convert an HWC RGB buffer to packed ARGB u32 for minifb.
pub fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    buf.chunks_exact(3)
        .take(width * height)
        .map(|px| {
            let r = px[0] as u32;
            let g = px[1] as u32;
            let b = px[2] as u32;
            (r << 16) | (g << 8) | b
        })
        .collect()
}
