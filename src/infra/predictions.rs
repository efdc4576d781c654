// ============================================================
// Layer 6 — Predictions CSV
// ============================================================
// Writes and reads the predictions file that connects the
// inference pipeline to the evaluator.
//
// Format: a header row and one row per sample, no index column.
//
//   target,predictions
//   positive,positive
//   negative,positive
//   ...
//
// Column names come from the Prediction field names via serde,
// so writer and reader cannot drift apart.
//
// Reference: csv crate documentation (Serde support)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::task_sample::Prediction;

/// Write predictions to `path`, replacing any existing file.
pub fn write_predictions(path: &Path, predictions: &[Prediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    // serialize() only emits the header together with the first record
    if predictions.is_empty() {
        writer.write_record(["target", "predictions"])?;
    }
    for prediction in predictions {
        writer.serialize(prediction)?;
    }
    writer
        .flush()
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    tracing::info!(
        "Wrote {} predictions to '{}'",
        predictions.len(),
        path.display()
    );
    Ok(())
}

/// Read a predictions file written by `write_predictions`.
pub fn read_predictions(path: &Path) -> Result<Vec<Prediction>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    reader
        .deserialize()
        .collect::<Result<Vec<Prediction>, _>>()
        .with_context(|| format!("Malformed predictions file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_has_header_and_no_index() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let rows = vec![
            Prediction::new("positive", "positive"),
            Prediction::new("negative", "positive"),
        ];

        write_predictions(&path, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "target,predictions\npositive,positive\nnegative,positive\n");
        assert_eq!(read_predictions(&path).unwrap(), rows);
    }

    #[test]
    fn test_empty_predictions_still_write_header() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");

        write_predictions(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "target,predictions\n");
        assert!(read_predictions(&path).unwrap().is_empty());
    }
}
