//! YOLO object detection on single frames.
//!
//! The detector owns an ONNX Runtime session and hides the whole model
//! contract behind [`Detector::detect`]: letterbox preprocessing, inference,
//! confidence filtering, and non-max suppression all happen here. Callers get
//! back plain pixel-space [`Detection`] values.

mod fetch;
mod names;

pub use fetch::{cache_dir, resolve_model};
pub use names::{class_label, COCO_CLASSES};

use image::imageops::FilterType;
use image::RgbImage;
use ndarray::{s, Array4, ArrayView3, Axis, Ix3};
use ort::{GraphOptimizationLevel, Session};
use thiserror::Error;

/// Model input size. Stock YOLOv8 detection exports are 640x640.
pub const INPUT_WIDTH: u32 = 640;
pub const INPUT_HEIGHT: u32 = 640;

/// IoU threshold for non-max suppression.
const IOU_THRESHOLD: f32 = 0.45;

/// Letterbox padding value (gray), normalized.
const PAD_FILL: f32 = 144.0 / 255.0;

/// Errors from model loading and inference.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Model '{0}' not found locally and not a downloadable model name")]
    ModelNotFound(String),
    #[error("Failed to fetch model: {0}")]
    Fetch(String),
    #[error("Model cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Inference error: {0}")]
    Inference(#[from] ort::Error),
    #[error("Model output has unexpected shape: {0}")]
    BadOutput(String),
}

/// One detected object in a single frame.
///
/// Coordinates are pixel-space corners in the original frame, already clamped
/// to its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub class_id: usize,
    pub label: String,
    pub score: f32,
}

impl Detection {
    /// Whether this detection is a phone-like class. The stock COCO label is
    /// "cell phone"; any label containing "phone" is accepted to stay
    /// flexible across name tables.
    pub fn is_phone(&self) -> bool {
        self.label.to_lowercase().contains("phone")
    }
}

/// YOLO detector bound to one loaded ONNX session.
pub struct Detector {
    session: Session,
    conf: f32,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("conf", &self.conf)
            .finish_non_exhaustive()
    }
}

impl Detector {
    /// Load a model by identifier (path, cached name, or downloadable name)
    /// and bind it to the given confidence threshold.
    ///
    /// # Errors
    /// * `DetectError::ModelNotFound` / `DetectError::Fetch` - If the
    ///   identifier cannot be resolved to a local ONNX file
    /// * `DetectError::Inference` - If the session fails to build
    pub fn load(identifier: &str, conf: f32) -> Result<Self, DetectError> {
        let path = fetch::resolve_model(identifier)?;
        log::info!("loading model from {}", path.display());
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(&path)?;
        Ok(Self { session, conf })
    }

    /// The confidence threshold this detector applies.
    pub fn confidence(&self) -> f32 {
        self.conf
    }

    /// Run the model on one frame and return the surviving detections.
    pub fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, DetectError> {
        let input = preprocess(frame);
        let outputs = self.session.run(ort::inputs!["images" => input.view()]?)?;
        let preds = outputs["output0"].try_extract_tensor::<f32>()?;
        let preds = preds
            .into_dimensionality::<Ix3>()
            .map_err(|e| DetectError::BadOutput(e.to_string()))?;
        Ok(postprocess(
            preds.view(),
            frame.width(),
            frame.height(),
            self.conf,
            IOU_THRESHOLD,
        ))
    }
}

/// Ratio by which a `w0`x`h0` frame is scaled to fit the model input.
fn scale_ratio(w0: u32, h0: u32) -> f32 {
    (INPUT_WIDTH as f32 / w0 as f32).min(INPUT_HEIGHT as f32 / h0 as f32)
}

/// Letterbox a frame into a normalized NCHW tensor, anchored top-left and
/// padded with gray.
pub(crate) fn preprocess(frame: &RgbImage) -> Array4<f32> {
    let (w0, h0) = frame.dimensions();
    let ratio = scale_ratio(w0, h0);
    let w_new = (w0 as f32 * ratio).round() as u32;
    let h_new = (h0 as f32 * ratio).round() as u32;
    let resized = image::imageops::resize(frame, w_new, h_new, FilterType::Triangle);

    let mut input = Array4::from_elem(
        (1, 3, INPUT_HEIGHT as usize, INPUT_WIDTH as usize),
        PAD_FILL,
    );
    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        input[[0, 0, y as usize, x as usize]] = r as f32 / 255.0;
        input[[0, 1, y as usize, x as usize]] = g as f32 / 255.0;
        input[[0, 2, y as usize, x as usize]] = b as f32 / 255.0;
    }
    input
}

/// Decode a raw `[1, 4 + nc, anchors]` prediction tensor into detections for
/// a `frame_w`x`frame_h` frame: confidence filter, coordinate rescale, clamp,
/// then non-max suppression.
pub fn postprocess(
    preds: ArrayView3<f32>,
    frame_w: u32,
    frame_h: u32,
    conf: f32,
    iou_threshold: f32,
) -> Vec<Detection> {
    let ratio = scale_ratio(frame_w, frame_h);
    let anchors = preds.index_axis(Axis(0), 0);
    let mut detections = Vec::new();

    for pred in anchors.axis_iter(Axis(1)) {
        let class_scores = pred.slice(s![4..]);
        let best = class_scores
            .into_iter()
            .enumerate()
            .reduce(|max, x| if x.1 > max.1 { x } else { max });
        let Some((class_id, &score)) = best else {
            continue;
        };
        if score < conf {
            continue;
        }

        let cx = pred[0] / ratio;
        let cy = pred[1] / ratio;
        let w = pred[2] / ratio;
        let h = pred[3] / ratio;
        let x1 = (cx - w / 2.0).clamp(0.0, frame_w as f32);
        let y1 = (cy - h / 2.0).clamp(0.0, frame_h as f32);
        let x2 = (cx + w / 2.0).clamp(0.0, frame_w as f32);
        let y2 = (cy + h / 2.0).clamp(0.0, frame_h as f32);

        detections.push(Detection {
            x1,
            y1,
            x2,
            y2,
            class_id,
            label: class_label(class_id),
            score,
        });
    }

    non_max_suppression(&mut detections, iou_threshold);
    detections
}

/// Greedy non-max suppression, highest score first.
pub(crate) fn non_max_suppression(detections: &mut Vec<Detection>, iou_threshold: f32) {
    detections.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept = 0;
    for index in 0..detections.len() {
        let mut drop = false;
        for prev in 0..kept {
            if iou(&detections[prev], &detections[index]) > iou_threshold {
                drop = true;
                break;
            }
        }
        if !drop {
            detections.swap(kept, index);
            kept += 1;
        }
    }
    detections.truncate(kept);
}

fn iou(a: &Detection, b: &Detection) -> f32 {
    let left = a.x1.max(b.x1);
    let right = a.x2.min(b.x2);
    let top = a.y1.max(b.y1);
    let bottom = a.y2.min(b.y2);
    let intersection = (right - left).max(0.0) * (bottom - top).max(0.0);
    let area_a = (a.x2 - a.x1) * (a.y2 - a.y1);
    let area_b = (b.x2 - b.x1) * (b.y2 - b.y1);
    let union = area_a + area_b - intersection;
    if union <= 0.0 {
        0.0
    } else {
        intersection / union
    }
}
