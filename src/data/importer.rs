// ============================================================
// Layer 4 — Raw Data Importer
// ============================================================
// Loads a named dataset from a CSV file using the csv crate.
//
// Dataset names look like "dair-ai/emotion". The name maps to
// a file below the data directory:
//
//   <data_dir>/dair-ai/emotion.csv
//
// The first line is the header. Rows may be ragged; short rows
// are padded with empty cells so every row has one cell per
// column (RawData::new takes care of this).
//
// A missing file is not an I/O error here: the importer reports
// "nothing obtained" and the application layer turns that into
// an ImportFailure. A file that exists but cannot be parsed is
// a real error and propagates.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::raw_data::RawData;
use crate::domain::traits::RawDataSource;

/// Imports `<data_dir>/<name>.csv`.
/// Implements the RawDataSource trait from Layer 3.
pub struct CsvImporter {
    data_dir: PathBuf,
    name:     String,
}

impl CsvImporter {
    pub fn new(data_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            name:     name.into(),
        }
    }

    /// Full path of the CSV file this importer reads
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.csv", self.name))
    }
}

impl RawDataSource for CsvImporter {
    fn obtain(&self) -> Result<Option<RawData>> {
        let path = self.path();

        if !path.exists() {
            tracing::warn!(
                "Dataset '{}' not found at '{}'",
                self.name,
                path.display()
            );
            return Ok(None);
        }

        let data = read_table(&path)?;
        tracing::info!(
            "Imported dataset '{}': {} rows, {} columns",
            self.name,
            data.len(),
            data.columns.len()
        );
        Ok(Some(data))
    }
}

/// Read a whole CSV file into a RawData table.
fn read_table(path: &Path) -> Result<RawData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open dataset '{}'", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Cannot read header of '{}'", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            // +2: one for the header, one for 1-based numbering
            format!("Malformed row {} in '{}'", line + 2, path.display())
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawData::new(columns, rows))
}
