// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   settings.rs        — the demo's JSON settings file
//
//   model_store.rs     — model directory access: architecture
//                        config (JSON) and weights (Burn's
//                        CompactRecorder)
//
//   tokenizer_store.rs — the tokenizer.json shipped with a model
//
//   predictions.rs     — predictions CSV written by inference
//                        and read back by the evaluator
//
//   timing.rs          — wall-clock timing around the whole run
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Settings JSON loading
pub mod settings;

/// Pretrained model config and weights
pub mod model_store;

/// Tokenizer loading
pub mod tokenizer_store;

/// Predictions CSV reader and writer
pub mod predictions;

/// Elapsed-time logging
pub mod timing;
