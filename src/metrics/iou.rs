//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// IoU is defined as the area of intersection divided by the area of union.
///
/// # Arguments
///
/// * `a` - First bounding box
/// * `b` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
/// Degenerate boxes (zero or negative area) yield 0.0, never a division
/// fault.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::iou::calculate_iou;
/// use voc_eval::types::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
/// let iou = calculate_iou(&a, &b);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    // Intersection rectangle
    let x_left = a.x_min.max(b.x_min);
    let y_top = a.y_min.max(b.y_min);
    let x_right = a.x_max.min(b.x_max);
    let y_bottom = a.y_max.min(b.y_max);

    // No overlap
    if x_right < x_left || y_bottom < y_top {
        return 0.0;
    }

    let intersection = (x_right - x_left) * (y_bottom - y_top);
    let union = a.area() + b.area() - intersection;

    if !union.is_finite() || union <= 0.0 {
        return 0.0;
    }

    intersection / union
}

/// Calculate IoU of one box against a set of boxes.
///
/// This is the shape consumed by the matcher: a prediction's box against
/// all ground-truth boxes of one image.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::iou::iou_of;
/// use voc_eval::types::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let others = vec![a, BoundingBox::new(100.0, 100.0, 110.0, 110.0)];
/// let ious = iou_of(&a, &others);
/// assert_eq!(ious.len(), 2);
/// assert!((ious[0] - 1.0).abs() < 1e-10);
/// assert_eq!(ious[1], 0.0);
/// ```
pub fn iou_of(bbox: &BoundingBox, others: &[BoundingBox]) -> Vec<f64> {
    others.iter().map(|other| calculate_iou(bbox, other)).collect()
}
