//! # voc-eval
//!
//! A Rust library for PASCAL VOC object detection evaluation metrics:
//! per-class Average Precision (AP) and mean Average Precision (mAP).
//!
//! This library provides the detection-evaluation engine used to score a
//! detector against ground-truth annotations:
//! - Group ground-truth boxes, difficulty flags, and true-case counts by
//!   class and image
//! - Match predictions to ground truth greedily by IoU, in descending
//!   score order, with at-most-one-match-per-ground-truth semantics
//! - Integrate the precision-recall curve into AP with either the legacy
//!   VOC2007 11-point interpolation or the continuous all-points rule
//! - Average per-class AP into mAP, with classes evaluated in parallel
//!
//! Difficult annotations follow the VOC convention: they are excluded
//! from the recall denominator, and a prediction matching a difficult box
//! counts as neither a true nor a false positive.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use voc_eval::evaluator::{evaluate, EvalConfig};
//! use voc_eval::types::{BoundingBox, ImageAnnotations, Prediction};
//!
//! # fn main() -> voc_eval::Result<()> {
//! let mut image = ImageAnnotations::new("img_001");
//! image.push(BoundingBox::new(10.0, 20.0, 60.0, 80.0), 1, false);
//! let dataset = vec![image];
//!
//! let predictions = HashMap::from([(1usize, vec![
//!     Prediction::new("img_001", 0.95, BoundingBox::new(10.0, 20.0, 60.0, 80.0)),
//! ])]);
//! let class_names = vec!["background".to_string(), "table".to_string()];
//!
//! let summary = evaluate(&dataset, &predictions, &class_names, &EvalConfig::default())?;
//! println!("mAP: {:.4}", summary.mean_ap);
//! # Ok(())
//! # }
//! ```
//!
//! ## Detection File Format
//!
//! Per-class predictions interchange as plain text, one line per
//! detection, with 1-based pixel coordinates:
//!
//! ```text
//! image_id score x_min y_min x_max y_max
//! ```
//!
//! [`loader::read_detections`] normalizes coordinates to 0-based on read;
//! [`loader::write_detections`] shifts them back on write.

pub mod aggregate;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use error::{Result, VocEvalError};
pub use evaluator::{evaluate, EvalConfig};
pub use metrics::ApPolicy;
pub use types::{BoundingBox, ClassAp, EvaluationSummary, ImageAnnotations, Prediction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        // Basic smoke test to ensure the library compiles
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.is_valid());
    }
}
