//! Precision-recall curve construction from ordered match flags.

/// Build cumulative precision and recall arrays from per-prediction
/// true/false positive flags.
///
/// Both flag arrays are ordered by descending prediction score, as
/// produced by the matcher. A prediction discarded by the difficult-box
/// policy is false in both arrays and leaves the cumulative counts
/// unchanged at its rank.
///
/// # Arguments
///
/// * `true_positives` - TP flag per prediction, score-descending order
/// * `false_positives` - FP flag per prediction, same order
/// * `num_true_cases` - Number of non-difficult ground-truth boxes
///
/// # Returns
///
/// `(precision, recall)` arrays of the same length as the flags. Recall
/// is monotonically non-decreasing; precision may oscillate.
pub fn precision_recall_curve(
    true_positives: &[bool],
    false_positives: &[bool],
    num_true_cases: usize,
) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(true_positives.len(), false_positives.len());

    let mut precision = Vec::with_capacity(true_positives.len());
    let mut recall = Vec::with_capacity(true_positives.len());

    let mut cum_tp = 0usize;
    let mut cum_fp = 0usize;

    for (&is_tp, &is_fp) in true_positives.iter().zip(false_positives) {
        if is_tp {
            cum_tp += 1;
        }
        if is_fp {
            cum_fp += 1;
        }

        let p = if cum_tp + cum_fp > 0 {
            cum_tp as f64 / (cum_tp + cum_fp) as f64
        } else {
            0.0
        };
        let r = if num_true_cases > 0 {
            cum_tp as f64 / num_true_cases as f64
        } else {
            0.0
        };

        precision.push(p);
        recall.push(r);
    }

    (precision, recall)
}
