//! COCO class name table.
//!
//! YOLOv8 detection exports are trained on COCO; the ONNX file itself is the
//! source of truth for class count, but the 80-class table below covers every
//! stock model. Unknown ids render as their number.

pub const COCO_CLASSES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// Resolve a class id to its label, falling back to the id itself.
pub fn class_label(id: usize) -> String {
    COCO_CLASSES
        .get(id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_phone_class() {
        assert_eq!(class_label(67), "cell phone");
    }

    #[test]
    fn test_first_and_last_classes() {
        assert_eq!(class_label(0), "person");
        assert_eq!(class_label(79), "toothbrush");
    }

    #[test]
    fn test_unknown_class_renders_id() {
        assert_eq!(class_label(80), "80");
        assert_eq!(class_label(9999), "9999");
    }
}
