// ============================================================
// Layer 3 — Named Failure Kinds
// ============================================================
// The demo aborts on the first failure. Most failures are plain
// I/O or parse errors carried by anyhow with context; the ones
// below are the domain-level conditions callers may want to
// tell apart (tests downcast to them).
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The importer ran but produced no raw data
    #[error("dataset '{0}' could not be imported: no raw data")]
    ImportFailure(String),

    /// A configured metric name has no counterpart in `Metric`
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    /// The evaluator finished without a result
    #[error("Demo does not work correctly")]
    EmptyEvaluation,

    /// Only CPU inference is available
    #[error("unsupported device '{0}', expected 'cpu'")]
    UnsupportedDevice(String),

    /// None of the candidate column names were found in the raw data
    #[error("no {role} column found, expected one of {candidates:?}")]
    MissingColumn {
        role:       &'static str,
        candidates: &'static [&'static str],
    },
}
