// ============================================================
// Layer 3 — TaskSample Domain Type
// ============================================================
// One classification example after preprocessing:
//   - source: the cleaned input text fed to the model
//   - target: the gold label, kept as its string form
//
// Labels stay strings so the evaluator can compare them with
// the model's predicted label names without any id mapping.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskSample {
    /// Text to classify
    pub source: String,

    /// Gold label
    pub target: String,
}

impl TaskSample {
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One model output next to its gold label.
/// Field order is the column order of predictions.csv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub target:      String,
    pub predictions: String,
}

impl Prediction {
    pub fn new(target: impl Into<String>, predictions: impl Into<String>) -> Self {
        Self {
            target:      target.into(),
            predictions: predictions.into(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.target == self.predictions
    }
}
