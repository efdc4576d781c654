// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from a dataset file on disk
// to CPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   <name>.csv
//       │
//       ▼
//   CsvImporter          → reads the file into a RawData table
//       │
//       ▼
//   RawDataPreprocessor  → analyze(), then transform() into
//       │                  cleaned (source, target) samples
//       ▼
//   TaskDataset          → bounded view, Burn's Dataset trait
//       │
//       ▼
//   encode_text + TextBatcher → token ids stacked into tensors
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Batchers)
//            Rust Book §13 (Iterators and Closures)

/// Reads a named CSV dataset
pub mod importer;

/// Analyses raw tables and turns them into task samples
pub mod preprocessor;

/// Implements Burn's Dataset trait for task samples
pub mod dataset;

/// Tokenises texts and stacks them into tensor batches
pub mod batcher;
