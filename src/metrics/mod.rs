//! Metrics calculation modules for detection evaluation.

pub mod ap;
pub mod iou;
pub mod precision_recall;

pub use ap::{
    average_precision, calculate_map, continuous_average_precision,
    eleven_point_average_precision, integrate, ApPolicy,
};
pub use iou::{calculate_iou, iou_of};
pub use precision_recall::precision_recall_curve;
