// ============================================================
// Layer 3 — Metric Domain Types
// ============================================================
// The closed set of metrics the evaluator knows how to compute,
// and the ordered result of one evaluation run.
//
// Settings name metrics in any case ("accuracy", "F1"); the
// name is uppercased and matched against the variant names.
// An unknown name is an error, never silently skipped.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ClassifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Bleu,
    Rouge,
    Squad,
    Accuracy,
    F1,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Bleu,
        Metric::Rouge,
        Metric::Squad,
        Metric::Accuracy,
        Metric::F1,
    ];

    /// Upper-case enumeration name, e.g. "ACCURACY"
    pub fn name(self) -> &'static str {
        match self {
            Metric::Bleu     => "BLEU",
            Metric::Rouge    => "ROUGE",
            Metric::Squad    => "SQUAD",
            Metric::Accuracy => "ACCURACY",
            Metric::F1       => "F1",
        }
    }

    /// Lower-case value used in reports, e.g. "accuracy"
    pub fn value(self) -> &'static str {
        match self {
            Metric::Bleu     => "bleu",
            Metric::Rouge    => "rouge",
            Metric::Squad    => "squad",
            Metric::Accuracy => "accuracy",
            Metric::F1       => "f1",
        }
    }

    /// Resolve a list of configured names, failing on the first unknown one.
    pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>, ClassifyError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for Metric {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == upper)
            .ok_or_else(|| ClassifyError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// One computed score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: Metric,
    pub value:  f64,
}

/// Scores in the order the metrics were requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub scores: Vec<MetricScore>,
}

impl MetricReport {
    pub fn push(&mut self, metric: Metric, value: f64) {
        self.scores.push(MetricScore { metric, value });
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.metric == metric)
            .map(|s| s.value)
    }
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for score in &self.scores {
            writeln!(f, "{:<10} {:.4}", score.metric.value(), score.value)?;
        }
        Ok(())
    }
}
