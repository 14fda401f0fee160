//! Reading and writing per-class detection result files.
//!
//! The interchange format is one line per prediction:
//!
//! ```text
//! image_id score x_min y_min x_max y_max
//! ```
//!
//! whitespace-separated, with 1-based pixel coordinates in the convention
//! of the surrounding tooling. Coordinates are shifted to 0-based on read
//! and back to 1-based on write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Result, VocEvalError};
use crate::stats::validate_predictions;
use crate::types::{BoundingBox, Prediction};

/// Read one class's predictions from a detection file.
///
/// Parsed predictions run through the validation layer: degenerate
/// geometry is warned about and counted, never fatal.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or
/// [`VocEvalError::MalformedDetection`] for a line that does not parse.
pub fn read_detections<P: AsRef<Path>>(path: P) -> Result<Vec<Prediction>> {
    let content = std::fs::read_to_string(path)?;
    read_detections_from_str(&content)
}

/// Parse one class's predictions from detection-file content.
///
/// # Example
///
/// ```
/// use voc_eval::loader::read_detections_from_str;
///
/// let content = "img_001 0.95 11.0 21.0 61.0 81.0\n";
/// let predictions = read_detections_from_str(content).unwrap();
/// assert_eq!(predictions.len(), 1);
/// // Coordinates are normalized to 0-based
/// assert_eq!(predictions[0].bbox.x_min, 10.0);
/// ```
pub fn read_detections_from_str(content: &str) -> Result<Vec<Prediction>> {
    let mut predictions = Vec::new();

    for (line_index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        predictions.push(parse_detection_line(line, line_index + 1)?);
    }

    let stats = validate_predictions(&predictions);
    if !stats.is_clean() {
        warn!(summary = %stats.summary_string(), "detection file has flagged predictions");
    }

    Ok(predictions)
}

fn parse_detection_line(line: &str, line_number: usize) -> Result<Prediction> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(VocEvalError::MalformedDetection {
            line: line_number,
            reason: format!("expected 6 fields, got {}", tokens.len()),
        });
    }

    let image_id = tokens[0].to_string();
    let mut values = [0.0f64; 5];
    for (i, token) in tokens[1..].iter().enumerate() {
        values[i] = token.parse().map_err(|_| VocEvalError::MalformedDetection {
            line: line_number,
            reason: format!("not a number: {token:?}"),
        })?;
    }

    let [score, x_min, y_min, x_max, y_max] = values;
    // Convert from the file's 1-based convention to 0-based coordinates.
    Ok(Prediction::new(
        image_id,
        score,
        BoundingBox::new(x_min - 1.0, y_min - 1.0, x_max - 1.0, y_max - 1.0),
    ))
}

/// Write one class's predictions to a detection file.
///
/// Predictions scoring below `min_score` are dropped; coordinates are
/// shifted back to the file's 1-based convention.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_detections<P: AsRef<Path>>(
    path: P,
    predictions: &[Prediction],
    min_score: f64,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for prediction in predictions {
        if prediction.score < min_score {
            continue;
        }
        let bbox = &prediction.bbox;
        writeln!(
            writer,
            "{} {} {} {} {} {}",
            prediction.image_id,
            prediction.score,
            bbox.x_min + 1.0,
            bbox.y_min + 1.0,
            bbox.x_max + 1.0,
            bbox.y_max + 1.0,
        )?;
    }

    writer.flush()?;
    Ok(())
}
