//! Greedy matching of predictions to ground truth for one class.

use std::collections::HashSet;

use crate::aggregate::ClassGroundTruth;
use crate::metrics::iou::iou_of;
use crate::types::Prediction;

/// Per-prediction match flags for one class, ordered by descending score.
///
/// The two arrays are parallel but not complementary: a prediction whose
/// best match is a difficult ground-truth box is false in both, so it
/// contributes to neither precision nor recall at any rank.
#[derive(Debug, Clone, Default)]
pub struct ClassMatches {
    pub true_positives: Vec<bool>,
    pub false_positives: Vec<bool>,
}

impl ClassMatches {
    pub fn tp_count(&self) -> usize {
        self.true_positives.iter().filter(|&&flag| flag).count()
    }

    pub fn fp_count(&self) -> usize {
        self.false_positives.iter().filter(|&&flag| flag).count()
    }
}

/// Match one class's predictions against its grouped ground truth.
///
/// Predictions are sorted by descending score (stable, so ties keep input
/// order) and processed greedily: each prediction claims the unclaimed
/// ground-truth box with the highest IoU in its image, provided the IoU
/// strictly exceeds `iou_threshold`. A ground-truth box can be claimed at
/// most once; later predictions pointing at the same box are false
/// positives. The claim order is a correctness requirement and must stay
/// sequential.
///
/// Outcomes per prediction:
/// - image unknown to this class's ground truth: false positive;
/// - best IoU above threshold on a difficult box: discarded (neither
///   true nor false positive);
/// - best IoU above threshold on an unclaimed box: true positive;
/// - best IoU above threshold on an already-claimed box: false positive;
/// - best IoU at or below threshold: false positive.
pub fn evaluate_class(
    predictions: &[Prediction],
    ground_truth: &ClassGroundTruth,
    iou_threshold: f64,
) -> ClassMatches {
    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| {
        predictions[b]
            .score
            .partial_cmp(&predictions[a].score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut true_positives = vec![false; predictions.len()];
    let mut false_positives = vec![false; predictions.len()];
    let mut matched: HashSet<(&str, usize)> = HashSet::new();

    for (rank, &index) in order.iter().enumerate() {
        let prediction = &predictions[index];

        let Some(gt_boxes) = ground_truth.boxes.get(&prediction.image_id) else {
            false_positives[rank] = true;
            continue;
        };

        let ious = iou_of(&prediction.bbox, gt_boxes);
        let mut max_iou = f64::NEG_INFINITY;
        let mut max_index = 0;
        for (i, &iou) in ious.iter().enumerate() {
            if iou > max_iou {
                max_iou = iou;
                max_index = i;
            }
        }

        // Strict comparison: IoU exactly at the threshold is a miss.
        if max_iou > iou_threshold {
            let difficult = ground_truth
                .difficult
                .get(&prediction.image_id)
                .and_then(|flags| flags.get(max_index))
                .copied()
                .unwrap_or(false);

            if difficult {
                // Difficult ground truth neither rewards nor penalizes.
            } else if matched.insert((prediction.image_id.as_str(), max_index)) {
                true_positives[rank] = true;
            } else {
                false_positives[rank] = true;
            }
        } else {
            false_positives[rank] = true;
        }
    }

    ClassMatches { true_positives, false_positives }
}
