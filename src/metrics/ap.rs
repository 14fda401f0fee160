//! Average Precision (AP) and mean Average Precision (mAP) calculation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocEvalError};
use crate::metrics::precision_recall::precision_recall_curve;

/// Integration policy for the precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApPolicy {
    /// VOC2007 11-point interpolation: mean of the max precision at the
    /// recall levels {0.0, 0.1, ..., 1.0}.
    #[default]
    ElevenPoint,
    /// Area under the monotonic precision envelope over all recall
    /// breakpoints.
    Continuous,
}

/// Calculate AP with the legacy VOC2007 11-point interpolation.
///
/// For each recall level `r` in {0.0, 0.1, ..., 1.0}, takes the maximum
/// precision observed at any recall >= `r` (0 if none), and averages the
/// 11 values.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::eleven_point_average_precision;
///
/// let precision = vec![1.0; 10];
/// let recall: Vec<f64> = (1..=10).map(|i| i as f64 / 10.0).collect();
/// let ap = eleven_point_average_precision(&precision, &recall);
/// assert!((ap - 1.0).abs() < 1e-10);
/// ```
pub fn eleven_point_average_precision(precision: &[f64], recall: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..=10 {
        let level = f64::from(i) * 0.1;
        let max_precision = precision
            .iter()
            .zip(recall)
            .filter(|(_, &r)| r >= level)
            .map(|(&p, _)| p)
            .fold(0.0_f64, f64::max);
        sum += max_precision;
    }
    sum / 11.0
}

/// Calculate AP as the area under the monotonic precision envelope.
///
/// The curve is padded with precision 0 at both ends and recall 0/1, the
/// precision envelope is built scanning recall descending (each value
/// replaced with the running maximum at equal-or-greater recall), and the
/// area is summed stepwise over the recall breakpoints.
pub fn continuous_average_precision(precision: &[f64], recall: &[f64]) -> f64 {
    let mut prec = Vec::with_capacity(precision.len() + 2);
    prec.push(0.0);
    prec.extend_from_slice(precision);
    prec.push(0.0);

    let mut rec = Vec::with_capacity(recall.len() + 2);
    rec.push(0.0);
    rec.extend_from_slice(recall);
    rec.push(1.0);

    // Monotonic non-increasing envelope, right to left
    for i in (1..prec.len()).rev() {
        prec[i - 1] = prec[i - 1].max(prec[i]);
    }

    let mut ap = 0.0;
    for i in 1..rec.len() {
        if rec[i] != rec[i - 1] {
            ap += (rec[i] - rec[i - 1]) * prec[i];
        }
    }
    ap
}

/// Calculate AP from a precision-recall curve under the given policy.
pub fn average_precision(policy: ApPolicy, precision: &[f64], recall: &[f64]) -> f64 {
    match policy {
        ApPolicy::ElevenPoint => eleven_point_average_precision(precision, recall),
        ApPolicy::Continuous => continuous_average_precision(precision, recall),
    }
}

/// Integrate per-prediction match flags into a scalar AP.
///
/// Computes cumulative precision/recall over the score-descending flag
/// arrays produced by the matcher, then integrates under `policy`.
///
/// # Errors
///
/// Returns [`VocEvalError::UndefinedRecall`] when `num_true_cases` is
/// zero: the recall denominator is undefined and the class must be
/// excluded from the mean rather than producing NaN or inf.
pub fn integrate(
    true_positives: &[bool],
    false_positives: &[bool],
    num_true_cases: usize,
    policy: ApPolicy,
) -> Result<f64> {
    if num_true_cases == 0 {
        return Err(VocEvalError::UndefinedRecall);
    }

    let (precision, recall) =
        precision_recall_curve(true_positives, false_positives, num_true_cases);
    Ok(average_precision(policy, &precision, &recall))
}

/// Calculate mean Average Precision (mAP) across classes.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps);
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> f64 {
    if class_aps.is_empty() {
        return 0.0;
    }
    class_aps.iter().sum::<f64>() / class_aps.len() as f64
}
