//! Core data types for detection annotations and evaluation results.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in corner format.
///
/// Coordinates are 0-based image pixel coordinates where:
/// - `x_min`, `y_min`: top-left corner
/// - `x_max`, `y_max`: bottom-right corner
///
/// The invariant `x_min <= x_max`, `y_min <= y_max` is expected but not
/// enforced; an inverted box contributes zero IoU everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    /// Get the box width (`x_max - x_min`).
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Get the box height (`y_max - y_min`).
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check that all coordinates are finite and the box has positive area.
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.x_max.is_finite()
            && self.y_max.is_finite()
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

/// Ground-truth annotations for a single image.
///
/// `boxes`, `classes` and `difficult` are parallel arrays: entry `i`
/// describes one annotated object. Order is significant and preserved
/// through aggregation, since matching indexes into it positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotations {
    pub image_id: String,
    pub boxes: Vec<BoundingBox>,
    /// Integer class indices; index 0 is reserved for background.
    pub classes: Vec<usize>,
    /// Difficulty flags; difficult objects are excluded from the recall
    /// denominator and from match scoring.
    pub difficult: Vec<bool>,
}

impl ImageAnnotations {
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            boxes: Vec::new(),
            classes: Vec::new(),
            difficult: Vec::new(),
        }
    }

    /// Append one annotated object.
    pub fn push(&mut self, bbox: BoundingBox, class_index: usize, difficult: bool) {
        self.boxes.push(bbox);
        self.classes.push(class_index);
        self.difficult.push(difficult);
    }

    /// Number of annotated objects.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// A single predicted detection for one class.
///
/// Immutable once produced by the detector; evaluation only reorders
/// predictions, never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub image_id: String,
    /// Confidence score, conventionally in [0, 1].
    pub score: f64,
    pub bbox: BoundingBox,
}

impl Prediction {
    pub fn new(image_id: impl Into<String>, score: f64, bbox: BoundingBox) -> Self {
        Self { image_id: image_id.into(), score, bbox }
    }
}

/// Outcome of one class's AP computation.
///
/// A class with zero non-difficult ground-truth boxes has an undefined
/// recall denominator and is reported as `UndefinedRecall`, distinct from
/// a genuine AP of 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassAp {
    /// Average precision in [0, 1].
    Evaluated(f64),
    /// Recall denominator was zero; excluded from the mean.
    UndefinedRecall,
}

impl ClassAp {
    /// The AP value, if the class was evaluable.
    pub fn value(&self) -> Option<f64> {
        match self {
            ClassAp::Evaluated(ap) => Some(*ap),
            ClassAp::UndefinedRecall => None,
        }
    }
}

/// Evaluation results across all classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Per-class outcome, in class-index order (background excluded).
    pub ap_per_class: Vec<(String, ClassAp)>,
    /// Mean AP over evaluated classes; classes with undefined recall are
    /// excluded from the average.
    pub mean_ap: f64,
}

impl EvaluationSummary {
    /// Look up the outcome for a class by name.
    pub fn class_ap(&self, name: &str) -> Option<ClassAp> {
        self.ap_per_class
            .iter()
            .find(|(class_name, _)| class_name == name)
            .map(|(_, ap)| *ap)
    }
}
