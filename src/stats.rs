/// Validation statistics for prediction inputs
///
/// This module provides an optional validation layer run over predictions
/// before evaluation. Geometry problems are surfaced as warnings and
/// counted; a single bad box never aborts evaluation of a class.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::VocEvalError;
use crate::types::Prediction;

/// Counters collected while validating predictions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Total number of predictions inspected
    pub total_predictions: usize,

    /// Predictions whose box has a non-finite coordinate
    pub non_finite_boxes: usize,

    /// Predictions whose box has zero or negative area
    pub degenerate_boxes: usize,

    /// Predictions whose score falls outside [0, 1]
    pub out_of_range_scores: usize,
}

impl ValidationStats {
    /// Create a new `ValidationStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of predictions with at least one geometry problem
    pub fn flagged(&self) -> usize {
        self.non_finite_boxes + self.degenerate_boxes
    }

    /// True when nothing was flagged
    pub fn is_clean(&self) -> bool {
        self.flagged() == 0 && self.out_of_range_scores == 0
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "ValidationStats {{ total: {}, non_finite: {}, degenerate: {}, bad_scores: {} }}",
            self.total_predictions,
            self.non_finite_boxes,
            self.degenerate_boxes,
            self.out_of_range_scores
        )
    }
}

/// Validate a batch of predictions, warning on each geometry problem.
///
/// Degenerate and non-finite boxes are legal inputs to the evaluation
/// core (they contribute zero IoU), so this layer only warns and counts;
/// it never fails.
pub fn validate_predictions(predictions: &[Prediction]) -> ValidationStats {
    let mut stats = ValidationStats::new();

    for prediction in predictions {
        stats.total_predictions += 1;
        let bbox = &prediction.bbox;

        let finite = bbox.x_min.is_finite()
            && bbox.y_min.is_finite()
            && bbox.x_max.is_finite()
            && bbox.y_max.is_finite();

        if !finite {
            stats.non_finite_boxes += 1;
            let err = VocEvalError::InvalidGeometry(format!(
                "non-finite box coordinates on image {}",
                prediction.image_id
            ));
            warn!(error = %err, "prediction flagged by validation");
        } else if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            stats.degenerate_boxes += 1;
            let err = VocEvalError::InvalidGeometry(format!(
                "zero or negative box area ({} x {}) on image {}",
                bbox.width(),
                bbox.height(),
                prediction.image_id
            ));
            warn!(error = %err, "prediction flagged by validation");
        }

        if !(0.0..=1.0).contains(&prediction.score) {
            stats.out_of_range_scores += 1;
            warn!(
                image_id = %prediction.image_id,
                score = prediction.score,
                "prediction score outside [0, 1]"
            );
        }
    }

    stats
}
