use anyhow::Result;
use std::path::PathBuf;

use crate::domain::metric::{Metric, MetricReport};
use crate::domain::traits::TaskEvaluator;
use crate::evaluation::metrics;
use crate::infra::predictions::read_predictions;

/// Evaluates a predictions CSV with a fixed list of metrics.
pub struct CsvTaskEvaluator {
    data_path: PathBuf,
    metrics:   Vec<Metric>,
}

impl CsvTaskEvaluator {
    pub fn new(data_path: impl Into<PathBuf>, metrics: Vec<Metric>) -> Self {
        Self {
            data_path: data_path.into(),
            metrics,
        }
    }
}

impl TaskEvaluator for CsvTaskEvaluator {
    fn run(&self) -> Result<Option<MetricReport>> {
        let predictions = read_predictions(&self.data_path)?;
        if predictions.is_empty() {
            tracing::warn!("No predictions in '{}'", self.data_path.display());
            return Ok(None);
        }

        let mut report = MetricReport::default();
        for &metric in &self.metrics {
            let value = metrics::compute(metric, &predictions);
            tracing::info!("{} = {:.4}", metric, value);
            report.push(metric, value);
        }
        Ok(Some(report))
    }
}
