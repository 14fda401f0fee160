//! Main evaluation orchestrator: per-class matching, curve integration,
//! and mAP aggregation.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::aggregate::{group_annotations_by_class, ClassGroundTruth, GroundTruthIndex};
use crate::error::{Result, VocEvalError};
use crate::matching::evaluate_class;
use crate::metrics::ap::{calculate_map, integrate, ApPolicy};
use crate::types::{ClassAp, EvaluationSummary, ImageAnnotations, Prediction};

/// Evaluation configuration.
///
/// A single explicit struct passed by reference into the per-class
/// passes; there is no process-wide evaluation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    /// Minimum IoU for a prediction to match a ground-truth box. The
    /// comparison is strict: an IoU exactly at the threshold is a miss.
    pub iou_threshold: f64,
    /// Precision-recall integration policy.
    pub policy: ApPolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { iou_threshold: 0.5, policy: ApPolicy::ElevenPoint }
    }
}

/// Evaluate predictions against ground truth across all classes.
///
/// Runs an independent pass per class (skipping the reserved background
/// class at index 0): the class's predictions are matched greedily
/// against its grouped ground truth, and the resulting flags are
/// integrated into an AP score. Classes are evaluated in parallel; each
/// pass reads only its own slice of ground truth and predictions.
///
/// A class with no predictions has AP 0 and is reported normally. A class
/// with zero non-difficult ground-truth boxes has undefined recall; it is
/// flagged [`ClassAp::UndefinedRecall`] and excluded from the mean, and
/// never aborts the other classes.
///
/// # Arguments
///
/// * `dataset` - Per-image ground-truth annotations
/// * `predictions_by_class` - Class index to that class's predictions
/// * `class_names` - Class names indexed by class index; index 0 is the
///   background class and is not evaluated
/// * `config` - IoU threshold and integration policy
///
/// # Errors
///
/// Returns [`VocEvalError::EmptyDataset`] when `class_names` contains no
/// evaluable class, and propagates structural annotation errors from
/// aggregation.
pub fn evaluate(
    dataset: &[ImageAnnotations],
    predictions_by_class: &HashMap<usize, Vec<Prediction>>,
    class_names: &[String],
    config: &EvalConfig,
) -> Result<EvaluationSummary> {
    if class_names.len() <= 1 {
        return Err(VocEvalError::EmptyDataset(
            "no classes to evaluate beyond background".to_string(),
        ));
    }

    let index = group_annotations_by_class(dataset)?;

    let ap_per_class: Vec<(String, ClassAp)> = (1..class_names.len())
        .into_par_iter()
        .map(|class_index| {
            let class_name = class_names[class_index].clone();
            let predictions = predictions_by_class
                .get(&class_index)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let ap = evaluate_one_class(class_index, &class_name, &index, predictions, config);
            (class_name, ap)
        })
        .collect();

    let evaluated: Vec<f64> = ap_per_class
        .iter()
        .filter_map(|(_, ap)| ap.value())
        .collect();
    let mean_ap = calculate_map(&evaluated);

    Ok(EvaluationSummary { ap_per_class, mean_ap })
}

/// One class's Aggregator slice -> Matcher -> Integrator pass.
fn evaluate_one_class(
    class_index: usize,
    class_name: &str,
    index: &GroundTruthIndex,
    predictions: &[Prediction],
    config: &EvalConfig,
) -> ClassAp {
    let num_true_cases = index.true_cases(class_index);
    let default_gt = ClassGroundTruth::default();
    let ground_truth = index.class_ground_truth(class_index).unwrap_or(&default_gt);

    let matches = evaluate_class(predictions, ground_truth, config.iou_threshold);

    match integrate(
        &matches.true_positives,
        &matches.false_positives,
        num_true_cases,
        config.policy,
    ) {
        Ok(ap) => {
            debug!(class = class_name, ap, "evaluated class");
            ClassAp::Evaluated(ap)
        }
        Err(VocEvalError::UndefinedRecall) => {
            warn!(
                class = class_name,
                "no non-difficult ground truth; recall undefined, class excluded from mean"
            );
            ClassAp::UndefinedRecall
        }
        Err(err) => {
            // integrate only signals UndefinedRecall today; anything else
            // still must not abort the remaining classes.
            warn!(class = class_name, error = %err, "class evaluation failed");
            ClassAp::UndefinedRecall
        }
    }
}
