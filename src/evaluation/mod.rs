// ============================================================
// Layer 7 — Evaluation
// ============================================================
// Scores a predictions file against its gold labels.
//
//   metrics.rs   — the metric formulas, pure functions over
//                  (target, prediction) string pairs
//
//   evaluator.rs — CsvTaskEvaluator: reads predictions.csv and
//                  computes the requested metrics in order;
//                  implements the TaskEvaluator trait
//
// Reference: Papineni et al. (2002) BLEU
//            Lin (2004) ROUGE
//            Rajpurkar et al. (2016) SQuAD

/// Metric formulas
pub mod metrics;

/// Predictions-file evaluator
pub mod evaluator;
