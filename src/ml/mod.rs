// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model code. Only the data
// batcher and the model store also touch Burn types.
//
//   model.rs     — transformer encoder text classifier
//                  • Token and positional embeddings
//                  • Multi-head self-attention with pad masking
//                  • Feed-forward networks (GELU activation)
//                  • Masked mean pooling + linear label head
//
//   pipeline.rs  — LlmPipeline: a pretrained classifier bound
//                  to a dataset; implements InferencePipeline
//                  (analyze_model, infer_sample, infer_dataset)
//
// Inference runs on Burn's NdArray backend (CPU).
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need

/// Transformer encoder classifier architecture
pub mod model;

/// Inference pipeline over a task dataset
pub mod pipeline;
