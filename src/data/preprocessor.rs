// ============================================================
// Layer 4 — Raw Data Preprocessor
// ============================================================
// Turns an imported RawData table into TaskSamples.
//
// Two operations, called in this order by the demo:
//
//   analyze()   → AnalysisReport on the raw table
//                 (sample count, columns, duplicates, empty
//                 rows, shortest and longest text)
//
//   transform() → picks the text and label columns, drops
//                 rows missing either, cleans the text, and
//                 drops duplicate samples keeping the first
//
// Why clean the text?
//   Scraped datasets often contain:
//   - Non-breaking spaces (U+00A0) and zero-width spaces
//   - Carriage returns and tabs
//   - Runs of spaces from HTML indentation
//   If we keep these the tokenizer spends tokens on noise and
//   two identical reviews no longer compare equal.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::error::ClassifyError;
use crate::domain::raw_data::RawData;
use crate::domain::task_sample::TaskSample;

/// Column names accepted as the input text, in priority order
const SOURCE_CANDIDATES: &[&str] = &[
    "source", "text", "sentence", "content", "review", "comment_text", "tweet",
];

/// Column names accepted as the gold label, in priority order
const TARGET_CANDIDATES: &[&str] = &[
    "target", "label", "labels", "category", "sentiment", "class",
];

/// What analyze() found in the raw table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub dataset_number_of_samples: usize,
    pub dataset_columns:           usize,
    pub dataset_duplicates:        usize,
    pub dataset_empty_rows:        usize,

    /// Shortest text (in chars) among rows without missing cells
    pub dataset_sample_min_len: usize,

    /// Longest text (in chars) among rows without missing cells
    pub dataset_sample_max_len: usize,
}

pub struct RawDataPreprocessor {
    raw:  RawData,
    data: Vec<TaskSample>,
}

impl RawDataPreprocessor {
    /// Wrap raw data. `data()` stays empty until `transform()` runs.
    pub fn new(raw: RawData) -> Self {
        Self { raw, data: Vec::new() }
    }

    /// Describe the raw table.
    pub fn analyze(&self) -> Result<AnalysisReport> {
        let source_col = find_column(&self.raw, "source", SOURCE_CANDIDATES)?;

        let unique: HashSet<&Vec<String>> = self.raw.rows.iter().collect();
        let dataset_duplicates = self.raw.len() - unique.len();

        let dataset_empty_rows = self
            .raw
            .rows
            .iter()
            .filter(|row| RawData::row_has_missing(row))
            .count();

        let lengths: Vec<usize> = self
            .raw
            .rows
            .iter()
            .filter(|row| !RawData::row_has_missing(row))
            .map(|row| row[source_col].chars().count())
            .collect();

        let report = AnalysisReport {
            dataset_number_of_samples: self.raw.len(),
            dataset_columns:           self.raw.columns.len(),
            dataset_duplicates,
            dataset_empty_rows,
            dataset_sample_min_len: lengths.iter().copied().min().unwrap_or(0),
            dataset_sample_max_len: lengths.iter().copied().max().unwrap_or(0),
        };

        tracing::debug!("Dataset analysis: {:?}", report);
        Ok(report)
    }

    /// Build the cleaned, de-duplicated (source, target) samples.
    pub fn transform(&mut self) -> Result<()> {
        let source_col = find_column(&self.raw, "source", SOURCE_CANDIDATES)?;
        let target_col = find_column(&self.raw, "target", TARGET_CANDIDATES)?;

        let mut seen    = HashSet::new();
        let mut samples = Vec::with_capacity(self.raw.len());
        let mut dropped = 0usize;

        for row in &self.raw.rows {
            let source = clean_text(&row[source_col]);
            let target = row[target_col].trim().to_string();

            if source.is_empty() || target.is_empty() {
                dropped += 1;
                continue;
            }

            let sample = TaskSample::new(source, target);
            // insert() is false for a duplicate, which keeps the first occurrence
            if seen.insert(sample.clone()) {
                samples.push(sample);
            } else {
                dropped += 1;
            }
        }

        tracing::info!(
            "Transformed {} rows into {} samples ({} dropped)",
            self.raw.len(),
            samples.len(),
            dropped
        );

        self.data = samples;
        Ok(())
    }

    /// Transformed samples
    pub fn data(&self) -> &[TaskSample] {
        &self.data
    }

    /// First `n` transformed samples (fewer if the data is shorter)
    pub fn head(&self, n: usize) -> Vec<TaskSample> {
        self.data.iter().take(n).cloned().collect()
    }
}

fn find_column(
    raw:        &RawData,
    role:       &'static str,
    candidates: &'static [&'static str],
) -> Result<usize> {
    candidates
        .iter()
        .find_map(|name| raw.column_index(name))
        .ok_or_else(|| ClassifyError::MissingColumn { role, candidates }.into())
}

/// Normalise whitespace and strip control characters.
/// The result is a single line with single spaces, trimmed.
pub fn clean_text(text: &str) -> String {
    // Map problematic characters to plain spaces first
    let normalised: String = text
        .chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();

    // split_whitespace collapses every run of spaces and trims both ends
    normalised.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 2]]) -> RawData {
        RawData::new(
            vec!["Text".into(), "Label".into()],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_clean_collapses_whitespace_and_controls() {
        assert_eq!(clean_text("  hello\t\u{00A0} world\r\n"), "hello world");
        assert_eq!(clean_text("a\x01b"), "a b");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_analyze_counts() {
        let pre = RawDataPreprocessor::new(table(&[
            ["good movie", "1"],
            ["good movie", "1"],
            ["", "0"],
            ["bad", "0"],
        ]));
        let report = pre.analyze().unwrap();

        assert_eq!(report.dataset_number_of_samples, 4);
        assert_eq!(report.dataset_columns, 2);
        assert_eq!(report.dataset_duplicates, 1);
        assert_eq!(report.dataset_empty_rows, 1);
        assert_eq!(report.dataset_sample_min_len, 3);
        assert_eq!(report.dataset_sample_max_len, 10);
    }

    #[test]
    fn test_transform_drops_empty_and_duplicate_rows() {
        let mut pre = RawDataPreprocessor::new(table(&[
            ["good   movie", "1"],
            ["good movie", "1"],
            ["no label", ""],
            ["bad", "0"],
        ]));
        assert!(pre.data().is_empty());

        pre.transform().unwrap();

        assert_eq!(
            pre.data(),
            &[TaskSample::new("good movie", "1"), TaskSample::new("bad", "0")]
        );
        assert_eq!(pre.head(1), vec![TaskSample::new("good movie", "1")]);
    }

    #[test]
    fn test_transform_requires_label_column() {
        let raw = RawData::new(vec!["text".into()], vec![vec!["hi".into()]]);
        let err = RawDataPreprocessor::new(raw).transform().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClassifyError>(),
            Some(ClassifyError::MissingColumn { role: "target", .. })
        ));
    }
}
