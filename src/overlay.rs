//! Frame annotation: boxes, labels, status line, FPS readout.
//!
//! Everything draws in place on the captured `RgbImage`. Text uses the 8x8
//! bitmap font so no font asset ships with the binary; rectangle drawing is
//! imageproc, which clips to the frame for us.

use font8x8::legacy::BASIC_LEGACY;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::detector::Detection;

pub const BOX_COLOR: Rgb<u8> = Rgb([255, 150, 12]);
pub const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const STATUS_DETECTED_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
pub const STATUS_CLEAR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const FPS_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Fixed screen positions for the status line and FPS readout.
const STATUS_POS: (i32, i32) = (10, 30);
const FPS_POS: (i32, i32) = (10, 60);

const GLYPH_SIZE: u32 = 8;
const STATUS_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 1;

/// Label text for a detection overlay, confidence to two decimals.
pub fn label_text(label: &str, score: f32) -> String {
    format!("{} {:.2}", label, score)
}

/// Pixel extent of `text` at the given scale.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    (
        text.chars().count() as u32 * GLYPH_SIZE * scale,
        GLYPH_SIZE * scale,
    )
}

/// Draw one detection: 2px bounding box, filled label background sized to the
/// text extent, and the label text itself.
pub fn draw_detection(frame: &mut RgbImage, detection: &Detection) {
    let x1 = detection.x1 as i32;
    let y1 = detection.y1 as i32;
    let x2 = detection.x2 as i32;
    let y2 = detection.y2 as i32;
    let w = (x2 - x1).max(1) as u32;
    let h = (y2 - y1).max(1) as u32;

    draw_hollow_rect_mut(frame, Rect::at(x1, y1).of_size(w, h), BOX_COLOR);
    if w > 2 && h > 2 {
        draw_hollow_rect_mut(frame, Rect::at(x1 + 1, y1 + 1).of_size(w - 2, h - 2), BOX_COLOR);
    }

    let text = label_text(&detection.label, detection.score);
    let (tw, th) = text_size(&text, LABEL_SCALE);
    let bg_y = y1 - th as i32 - 8;
    draw_filled_rect_mut(
        frame,
        Rect::at(x1, bg_y).of_size(tw + 6, th + 8),
        BOX_COLOR,
    );
    draw_text(frame, &text, x1 + 3, bg_y + 4, LABEL_SCALE, LABEL_TEXT_COLOR);
}

/// Overlay the per-frame status line at its fixed position.
pub fn draw_status(frame: &mut RgbImage, detected: bool) {
    let (text, color) = if detected {
        ("PHONE DETECTED", STATUS_DETECTED_COLOR)
    } else {
        ("no phone", STATUS_CLEAR_COLOR)
    };
    draw_text(frame, text, STATUS_POS.0, STATUS_POS.1, STATUS_SCALE, color);
}

/// Overlay the rolling FPS estimate, one decimal.
pub fn draw_fps(frame: &mut RgbImage, fps: f32) {
    let text = format!("FPS: {:.1}", fps);
    draw_text(frame, &text, FPS_POS.0, FPS_POS.1, LABEL_SCALE, FPS_COLOR);
}

/// Blit bitmap-font text at (x, y), top-left anchored. Pixels outside the
/// frame are skipped, so partially off-screen text is safe.
pub fn draw_text(frame: &mut RgbImage, text: &str, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = BASIC_LEGACY
            .get(ch as usize)
            .copied()
            .unwrap_or(BASIC_LEGACY[b'?' as usize]);
        for (row, bits) in glyph.iter().enumerate() {
            let bits = *bits as u32;
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = cursor_x + (col * scale + dx) as i32;
                        let py = y + (row as u32 * scale + dy) as i32;
                        if px >= 0
                            && py >= 0
                            && (px as u32) < frame.width()
                            && (py as u32) < frame.height()
                        {
                            frame.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += (GLYPH_SIZE * scale) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::class_label;

    fn blank_frame() -> RgbImage {
        RgbImage::from_pixel(320, 240, Rgb([0, 0, 0]))
    }

    fn count_pixels(frame: &RgbImage, color: Rgb<u8>) -> usize {
        frame.pixels().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_label_text_two_decimals() {
        assert_eq!(label_text("cell phone", 0.82), "cell phone 0.82");
        assert_eq!(label_text("cell phone", 0.5), "cell phone 0.50");
    }

    #[test]
    fn test_text_size_scales_with_length_and_scale() {
        assert_eq!(text_size("abc", 1), (24, 8));
        assert_eq!(text_size("abc", 2), (48, 16));
        assert_eq!(text_size("", 1), (0, 8));
    }

    #[test]
    fn test_draw_status_uses_distinct_colors() {
        let mut detected = blank_frame();
        draw_status(&mut detected, true);
        assert!(count_pixels(&detected, STATUS_DETECTED_COLOR) > 0);
        assert_eq!(count_pixels(&detected, STATUS_CLEAR_COLOR), 0);

        let mut clear = blank_frame();
        draw_status(&mut clear, false);
        assert!(count_pixels(&clear, STATUS_CLEAR_COLOR) > 0);
        assert_eq!(count_pixels(&clear, STATUS_DETECTED_COLOR), 0);
    }

    #[test]
    fn test_draw_detection_paints_box() {
        let mut frame = blank_frame();
        let detection = Detection {
            x1: 50.0,
            y1: 60.0,
            x2: 150.0,
            y2: 160.0,
            class_id: 67,
            label: class_label(67),
            score: 0.82,
        };
        draw_detection(&mut frame, &detection);
        // Box corner pixels painted (right edge is x1 + w - 1)
        assert_eq!(*frame.get_pixel(50, 60), BOX_COLOR);
        assert_eq!(*frame.get_pixel(149, 60), BOX_COLOR);
        // Label background sits above the box
        assert_eq!(*frame.get_pixel(52, 55), BOX_COLOR);
        assert!(count_pixels(&frame, LABEL_TEXT_COLOR) > 0);
    }

    #[test]
    fn test_draw_detection_at_frame_edge_does_not_panic() {
        let mut frame = blank_frame();
        let detection = Detection {
            x1: 0.0,
            y1: 0.0,
            x2: 319.0,
            y2: 239.0,
            class_id: 67,
            label: class_label(67),
            score: 0.99,
        };
        // Label background would sit above y=0; drawing must clip, not panic.
        draw_detection(&mut frame, &detection);
    }

    #[test]
    fn test_draw_text_off_screen_is_clipped() {
        let mut frame = blank_frame();
        draw_text(&mut frame, "clip", -20, -20, 2, LABEL_TEXT_COLOR);
        draw_text(&mut frame, "clip", 310, 235, 2, LABEL_TEXT_COLOR);
    }
}
