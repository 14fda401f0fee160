//! Grouping of ground-truth annotations by class and image.

use std::collections::HashMap;

use crate::error::{Result, VocEvalError};
use crate::types::{BoundingBox, ImageAnnotations};

/// Ground truth for one class, keyed by image identifier.
///
/// `boxes` and `difficult` are parallel per image: the flag at index `i`
/// belongs to the box at index `i`. Insertion order within an image is
/// preserved, since matching indexes into it positionally.
#[derive(Debug, Clone, Default)]
pub struct ClassGroundTruth {
    pub boxes: HashMap<String, Vec<BoundingBox>>,
    pub difficult: HashMap<String, Vec<bool>>,
}

impl ClassGroundTruth {
    /// Total number of ground-truth boxes for this class.
    pub fn num_boxes(&self) -> usize {
        self.boxes.values().map(Vec::len).sum()
    }
}

/// Read-only snapshot of a dataset's ground truth grouped by class.
///
/// Built once per evaluation run and shared by all per-class passes.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthIndex {
    /// Number of non-difficult ground-truth boxes per class; the recall
    /// denominator.
    pub true_case_counts: HashMap<usize, usize>,
    pub per_class: HashMap<usize, ClassGroundTruth>,
}

impl GroundTruthIndex {
    /// Ground truth for one class, if any object of that class exists.
    pub fn class_ground_truth(&self, class_index: usize) -> Option<&ClassGroundTruth> {
        self.per_class.get(&class_index)
    }

    /// Recall denominator for one class (0 when the class has no
    /// non-difficult objects).
    pub fn true_cases(&self, class_index: usize) -> usize {
        self.true_case_counts.get(&class_index).copied().unwrap_or(0)
    }
}

/// Group every annotated object in the dataset by class and image.
///
/// Non-difficult objects increment the class's true-case count; every
/// object, difficult or not, is appended to the class's per-image box and
/// difficulty lists in insertion order. No deduplication and no box
/// validity checks are performed.
///
/// # Errors
///
/// Returns [`VocEvalError::MismatchedAnnotations`] when an image's
/// parallel arrays disagree in length.
pub fn group_annotations_by_class(dataset: &[ImageAnnotations]) -> Result<GroundTruthIndex> {
    let mut index = GroundTruthIndex::default();

    for image in dataset {
        if image.classes.len() != image.boxes.len() || image.difficult.len() != image.boxes.len() {
            return Err(VocEvalError::MismatchedAnnotations {
                image_id: image.image_id.clone(),
                reason: format!(
                    "{} boxes, {} classes, {} difficulty flags",
                    image.boxes.len(),
                    image.classes.len(),
                    image.difficult.len()
                ),
            });
        }

        for (i, &bbox) in image.boxes.iter().enumerate() {
            let class_index = image.classes[i];
            let difficult = image.difficult[i];

            if !difficult {
                *index.true_case_counts.entry(class_index).or_insert(0) += 1;
            }

            let class_gt = index.per_class.entry(class_index).or_default();
            class_gt
                .boxes
                .entry(image.image_id.clone())
                .or_default()
                .push(bbox);
            class_gt
                .difficult
                .entry(image.image_id.clone())
                .or_default()
                .push(difficult);
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, objects: &[(BoundingBox, usize, bool)]) -> ImageAnnotations {
        let mut annotations = ImageAnnotations::new(id);
        for &(bbox, class_index, difficult) in objects {
            annotations.push(bbox, class_index, difficult);
        }
        annotations
    }

    fn bbox(x: f64, y: f64) -> BoundingBox {
        BoundingBox::new(x, y, x + 10.0, y + 10.0)
    }

    #[test]
    fn test_true_case_counts_exclude_difficult() {
        let dataset = vec![
            image("img1", &[(bbox(0.0, 0.0), 1, false), (bbox(20.0, 0.0), 1, true)]),
            image("img2", &[(bbox(0.0, 0.0), 1, false)]),
        ];

        let index = group_annotations_by_class(&dataset).unwrap();
        assert_eq!(index.true_cases(1), 2);
        // Difficult box still present in the grouped ground truth
        assert_eq!(index.class_ground_truth(1).unwrap().num_boxes(), 3);
    }

    #[test]
    fn test_grouping_by_class_and_image() {
        let dataset = vec![
            image("img1", &[(bbox(0.0, 0.0), 1, false), (bbox(20.0, 0.0), 2, false)]),
            image("img2", &[(bbox(0.0, 0.0), 2, false)]),
        ];

        let index = group_annotations_by_class(&dataset).unwrap();
        assert_eq!(index.per_class.len(), 2);

        let class2 = index.class_ground_truth(2).unwrap();
        assert_eq!(class2.boxes.len(), 2);
        assert_eq!(class2.boxes["img1"].len(), 1);
        assert_eq!(class2.boxes["img2"].len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let boxes = [bbox(0.0, 0.0), bbox(20.0, 0.0), bbox(40.0, 0.0)];
        let dataset = vec![image(
            "img1",
            &[(boxes[0], 1, false), (boxes[1], 1, true), (boxes[2], 1, false)],
        )];

        let index = group_annotations_by_class(&dataset).unwrap();
        let class1 = index.class_ground_truth(1).unwrap();
        assert_eq!(class1.boxes["img1"], boxes);
        assert_eq!(class1.difficult["img1"], vec![false, true, false]);
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let mut annotations = ImageAnnotations::new("img1");
        annotations.boxes.push(bbox(0.0, 0.0));
        annotations.classes.push(1);
        // difficulty flag missing

        let result = group_annotations_by_class(&[annotations]);
        assert!(matches!(
            result,
            Err(VocEvalError::MismatchedAnnotations { .. })
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let index = group_annotations_by_class(&[]).unwrap();
        assert!(index.per_class.is_empty());
        assert_eq!(index.true_cases(1), 0);
    }
}
