// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The demo run talks to three collaborators through these
// traits only:
//
//   RawDataSource      → CsvImporter        (Layer 4)
//   InferencePipeline  → LlmPipeline        (Layer 5)
//   TaskEvaluator      → CsvTaskEvaluator   (Layer 7)
//
// The application layer never names the concrete types, so
// tests can hand it doubles that return fixed data, nothing,
// or an empty evaluation.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::inference::ModelSummary;
use crate::domain::metric::MetricReport;
use crate::domain::raw_data::RawData;
use crate::domain::task_sample::{Prediction, TaskSample};

// ─── RawDataSource ────────────────────────────────────────────────────────────
/// Any component that can fetch a named dataset.
pub trait RawDataSource {
    /// Fetch the dataset. `Ok(None)` means the source was reachable
    /// but produced nothing; the caller decides whether that is fatal.
    fn obtain(&self) -> Result<Option<RawData>>;
}

// ─── InferencePipeline ────────────────────────────────────────────────────────
/// A model bound to a dataset.
pub trait InferencePipeline {
    /// Describe the loaded model
    fn analyze_model(&self) -> Result<ModelSummary>;

    /// Predict a label for one sample. `None` if the sample has no text.
    fn infer_sample(&self, sample: &TaskSample) -> Result<Option<String>>;

    /// Predict every sample of the bound dataset, in dataset order
    fn infer_dataset(&self) -> Result<Vec<Prediction>>;
}

// ─── TaskEvaluator ────────────────────────────────────────────────────────────
/// Scores a predictions file.
pub trait TaskEvaluator {
    /// `Ok(None)` means there was nothing to score.
    fn run(&self) -> Result<Option<MetricReport>>;
}
