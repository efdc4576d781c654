// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that name the concepts
// the classification demo works with.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// The stage traits in traits.rs are what the application layer
// programs against. Concrete stages live in Layers 4, 5 and 7,
// and tests swap in doubles through the same traits.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Tabular data as produced by an importer
pub mod raw_data;

// One (source, target) pair after preprocessing
pub mod task_sample;

// Metric names and evaluation results
pub mod metric;

// Named failure kinds of the demo run
pub mod error;

// Stage abstractions (importer, pipeline, evaluator)
pub mod traits;

// Inference settings and the model analysis summary
pub mod inference;
