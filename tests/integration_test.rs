//! End-to-end evaluation tests.

use std::collections::HashMap;

use voc_eval::evaluator::{evaluate, EvalConfig};
use voc_eval::metrics::ApPolicy;
use voc_eval::types::{BoundingBox, ClassAp, ImageAnnotations, Prediction};

fn class_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn unit_box() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 10.0, 10.0)
}

fn far_box() -> BoundingBox {
    BoundingBox::new(500.0, 500.0, 510.0, 510.0)
}

/// One ground-truth box of `class_index` per image, `n` images.
fn dataset(class_index: usize, n: usize) -> Vec<ImageAnnotations> {
    (0..n)
        .map(|i| {
            let mut image = ImageAnnotations::new(format!("img{i}"));
            image.push(unit_box(), class_index, false);
            image
        })
        .collect()
}

#[test]
fn test_perfect_detections_give_map_one_under_both_policies() {
    let dataset = dataset(1, 5);
    let predictions: Vec<Prediction> = (0..5)
        .map(|i| Prediction::new(format!("img{i}"), 0.9 - i as f64 * 0.05, unit_box()))
        .collect();
    let predictions_by_class = HashMap::from([(1usize, predictions)]);
    let names = class_names(&["background", "table"]);

    for policy in [ApPolicy::ElevenPoint, ApPolicy::Continuous] {
        let config = EvalConfig { policy, ..EvalConfig::default() };
        let summary = evaluate(&dataset, &predictions_by_class, &names, &config).unwrap();
        assert!(
            (summary.mean_ap - 1.0).abs() < 1e-9,
            "policy {policy:?} gave mAP {}",
            summary.mean_ap
        );
    }
}

#[test]
fn test_mixed_ranking_known_ap_values() {
    // Five images, one ground-truth box each. Ranked by score the
    // predictions come out TP, FP, TP, TP, FP:
    //   precision = [1, 1/2, 2/3, 3/4, 3/5]
    //   recall    = [0.2, 0.2, 0.4, 0.6, 0.6]
    let dataset = dataset(1, 5);
    let predictions = vec![
        Prediction::new("img0", 0.9, unit_box()),
        Prediction::new("img1", 0.8, far_box()),
        Prediction::new("img1", 0.7, unit_box()),
        Prediction::new("img2", 0.6, unit_box()),
        Prediction::new("img0", 0.5, unit_box()), // duplicate of rank 0's claim
    ];
    let predictions_by_class = HashMap::from([(1usize, predictions)]);
    let names = class_names(&["background", "table"]);

    // 11-point: levels 0.0-0.2 see precision 1.0, 0.3-0.6 see 0.75,
    // 0.7-1.0 see nothing.
    let config = EvalConfig { policy: ApPolicy::ElevenPoint, ..EvalConfig::default() };
    let summary = evaluate(&dataset, &predictions_by_class, &names, &config).unwrap();
    assert!((summary.mean_ap - 6.0 / 11.0).abs() < 1e-9);

    // Continuous: envelope 1.0 to recall 0.2, 0.75 to 0.6, 0 beyond.
    let config = EvalConfig { policy: ApPolicy::Continuous, ..EvalConfig::default() };
    let summary = evaluate(&dataset, &predictions_by_class, &names, &config).unwrap();
    assert!((summary.mean_ap - 0.5).abs() < 1e-9);
}

#[test]
fn test_multi_class_map_is_mean_of_class_aps() {
    // Class 1: perfect detection. Class 2: one hit out of two boxes.
    let mut images = dataset(1, 2);
    images[0].push(BoundingBox::new(50.0, 50.0, 60.0, 60.0), 2, false);
    images[1].push(BoundingBox::new(50.0, 50.0, 60.0, 60.0), 2, false);

    let predictions_by_class = HashMap::from([
        (
            1usize,
            vec![
                Prediction::new("img0", 0.9, unit_box()),
                Prediction::new("img1", 0.8, unit_box()),
            ],
        ),
        (
            2usize,
            vec![Prediction::new("img0", 0.9, BoundingBox::new(50.0, 50.0, 60.0, 60.0))],
        ),
    ]);
    let names = class_names(&["background", "table", "figure"]);

    let config = EvalConfig { policy: ApPolicy::Continuous, ..EvalConfig::default() };
    let summary = evaluate(&images, &predictions_by_class, &names, &config).unwrap();

    let table_ap = summary.class_ap("table").unwrap().value().unwrap();
    let figure_ap = summary.class_ap("figure").unwrap().value().unwrap();
    assert!((table_ap - 1.0).abs() < 1e-9);
    // One TP over two true cases: precision 1.0 up to recall 0.5
    assert!((figure_ap - 0.5).abs() < 1e-9);
    assert!((summary.mean_ap - 0.75).abs() < 1e-9);
}

#[test]
fn test_difficult_matches_do_not_move_the_curve() {
    // One non-difficult and one difficult box in the same image. The
    // middle-ranked prediction matches the difficult box and must leave
    // precision/recall untouched at every rank.
    let mut image = ImageAnnotations::new("img0");
    image.push(unit_box(), 1, false);
    image.push(BoundingBox::new(100.0, 100.0, 110.0, 110.0), 1, true);
    let dataset = vec![image];

    let with_difficult_hit = HashMap::from([(
        1usize,
        vec![
            Prediction::new("img0", 0.9, unit_box()),
            Prediction::new("img0", 0.8, BoundingBox::new(100.0, 100.0, 110.0, 110.0)),
            Prediction::new("img0", 0.7, far_box()),
        ],
    )]);
    let without_difficult_hit = HashMap::from([(
        1usize,
        vec![
            Prediction::new("img0", 0.9, unit_box()),
            Prediction::new("img0", 0.7, far_box()),
        ],
    )]);
    let names = class_names(&["background", "table"]);

    for policy in [ApPolicy::ElevenPoint, ApPolicy::Continuous] {
        let config = EvalConfig { policy, ..EvalConfig::default() };
        let with_hit = evaluate(&dataset, &with_difficult_hit, &names, &config).unwrap();
        let without_hit = evaluate(&dataset, &without_difficult_hit, &names, &config).unwrap();
        assert_eq!(with_hit.mean_ap.to_bits(), without_hit.mean_ap.to_bits());
    }
}

#[test]
fn test_undefined_recall_class_excluded_from_mean() {
    // Class 2 exists in the label set and has predictions, but zero
    // non-difficult ground truth anywhere.
    let dataset = dataset(1, 2);
    let predictions_by_class = HashMap::from([
        (
            1usize,
            vec![
                Prediction::new("img0", 0.9, unit_box()),
                Prediction::new("img1", 0.8, unit_box()),
            ],
        ),
        (2usize, vec![Prediction::new("img0", 0.9, far_box())]),
    ]);
    let names = class_names(&["background", "table", "figure"]);

    let summary = evaluate(
        &dataset,
        &predictions_by_class,
        &names,
        &EvalConfig::default(),
    )
    .unwrap();

    assert_eq!(summary.class_ap("figure"), Some(ClassAp::UndefinedRecall));
    assert_eq!(summary.class_ap("table"), Some(ClassAp::Evaluated(1.0)));
    // Mean over the remaining class only
    assert!((summary.mean_ap - 1.0).abs() < 1e-9);
}

#[test]
fn test_evaluation_is_deterministic() {
    let dataset = dataset(1, 10);
    let predictions: Vec<Prediction> = (0..30)
        .map(|i| {
            Prediction::new(
                format!("img{}", i % 10),
                ((i * 7919) % 100) as f64 / 100.0,
                BoundingBox::new(
                    (i % 5) as f64,
                    (i % 3) as f64,
                    (i % 5) as f64 + 10.0,
                    (i % 3) as f64 + 10.0,
                ),
            )
        })
        .collect();
    let predictions_by_class = HashMap::from([(1usize, predictions)]);
    let names = class_names(&["background", "table"]);

    let first = evaluate(&dataset, &predictions_by_class, &names, &EvalConfig::default()).unwrap();
    let second = evaluate(&dataset, &predictions_by_class, &names, &EvalConfig::default()).unwrap();

    assert_eq!(first.mean_ap.to_bits(), second.mean_ap.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_summary_serializes_to_json() {
    let dataset = dataset(1, 1);
    let predictions_by_class =
        HashMap::from([(1usize, vec![Prediction::new("img0", 0.9, unit_box())])]);
    let names = class_names(&["background", "table"]);

    let summary = evaluate(
        &dataset,
        &predictions_by_class,
        &names,
        &EvalConfig::default(),
    )
    .unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"mean_ap\""));
    assert!(json.contains("table"));

    let parsed: voc_eval::EvaluationSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, summary);
}
