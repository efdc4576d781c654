// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to run the
// classification demo end to end.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - Stages are reached through traits only, so the whole
//     run can be exercised with test doubles
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// How the demo builds its importer, pipeline and evaluator
pub mod stages;

// The demo workflow: settings → import → preprocess → infer → evaluate
pub mod classify_use_case;
