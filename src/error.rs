//! Error types for the voc-eval library.

use thiserror::Error;

/// Result type for voc-eval operations.
pub type Result<T> = std::result::Result<T, VocEvalError>;

/// Error types that can occur during detection evaluation.
#[derive(Error, Debug)]
pub enum VocEvalError {
    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A detection file line that does not parse as `image_id score x1 y1 x2 y2`.
    #[error("malformed detection on line {line}: {reason}")]
    MalformedDetection { line: usize, reason: String },

    /// A bounding box with non-finite or inverted coordinates.
    ///
    /// Surfaced as a warning by the validation layer; degenerate boxes
    /// otherwise propagate as zero-IoU contributions.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A class with zero non-difficult ground-truth boxes has no defined
    /// recall denominator.
    #[error("recall undefined: class has no non-difficult ground-truth boxes")]
    UndefinedRecall,

    /// Parallel annotation arrays for an image disagree in length.
    #[error("mismatched annotations for image {image_id}: {reason}")]
    MismatchedAnnotations { image_id: String, reason: String },

    /// No evaluable classes were provided.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),
}
