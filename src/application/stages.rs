// ============================================================
// Layer 2 — Stage Factory
// ============================================================
// The demo run needs three collaborators, each built from a
// name or path it only learns while running:
//
//   importer(dataset name)                → RawDataSource
//   pipeline(model name, dataset, config) → InferencePipeline
//   evaluator(predictions path, metrics)  → TaskEvaluator
//
// StageFactory is the seam. LocalStages builds the real ones
// from directories on disk; tests provide their own factory.
//
// Reference: Rust Book §17 (Trait Objects)

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::data::{dataset::TaskDataset, importer::CsvImporter};
use crate::domain::inference::InferenceConfig;
use crate::domain::metric::Metric;
use crate::domain::traits::{InferencePipeline, RawDataSource, TaskEvaluator};
use crate::evaluation::evaluator::CsvTaskEvaluator;
use crate::ml::pipeline::LlmPipeline;

pub trait StageFactory {
    fn importer(&self, dataset: &str) -> Result<Box<dyn RawDataSource>>;

    fn pipeline(
        &self,
        model:   &str,
        dataset: TaskDataset,
        config:  &InferenceConfig,
    ) -> Result<Box<dyn InferencePipeline>>;

    fn evaluator(&self, predictions: &Path, metrics: Vec<Metric>) -> Result<Box<dyn TaskEvaluator>>;
}

/// Datasets and models read from local directories
pub struct LocalStages {
    data_dir:   PathBuf,
    models_dir: PathBuf,
}

impl LocalStages {
    pub fn new(data_dir: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir:   data_dir.into(),
            models_dir: models_dir.into(),
        }
    }
}

impl StageFactory for LocalStages {
    fn importer(&self, dataset: &str) -> Result<Box<dyn RawDataSource>> {
        Ok(Box::new(CsvImporter::new(&self.data_dir, dataset)))
    }

    fn pipeline(
        &self,
        model:   &str,
        dataset: TaskDataset,
        config:  &InferenceConfig,
    ) -> Result<Box<dyn InferencePipeline>> {
        let pipeline = LlmPipeline::load(&self.models_dir, model, dataset, config)?;
        Ok(Box::new(pipeline))
    }

    fn evaluator(&self, predictions: &Path, metrics: Vec<Metric>) -> Result<Box<dyn TaskEvaluator>> {
        Ok(Box::new(CsvTaskEvaluator::new(predictions, metrics)))
    }
}
