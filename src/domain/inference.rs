// ============================================================
// Layer 3 — Inference Settings and Model Summary
// ============================================================
// InferenceConfig carries the fixed hyperparameters the demo
// hands to the pipeline (sequence length, batch size, device).
// ModelSummary is what analyze_model() reports back.
//
// Reference: Rust Book §5 (Structs)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ClassifyError;

/// Where inference runs. Only the CPU is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    Cpu,
}

impl FromStr for Device {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            _     => Err(ClassifyError::UnsupportedDevice(s.to_string())),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Tokens per sequence after truncation and padding
    pub max_length: usize,

    /// Samples per forward pass
    pub batch_size: usize,

    pub device: Device,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_length: 120,
            batch_size: 64,
            device:     Device::Cpu,
        }
    }
}

/// Static facts about a loaded model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Shape of one input batch: [batch_size, max_length]
    pub input_shape: Vec<usize>,

    /// Width of the token embedding
    pub embedding_size: usize,

    /// Shape of one output batch: [batch_size, num_labels]
    pub output_shape: Vec<usize>,

    pub num_trainable_params: usize,

    pub vocab_size: usize,

    /// Parameter storage in bytes (f32 weights)
    pub size: usize,

    /// Longest sequence the position embedding can address
    pub max_context_length: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input_shape:          {:?}", self.input_shape)?;
        writeln!(f, "embedding_size:       {}", self.embedding_size)?;
        writeln!(f, "output_shape:         {:?}", self.output_shape)?;
        writeln!(f, "num_trainable_params: {}", self.num_trainable_params)?;
        writeln!(f, "vocab_size:           {}", self.vocab_size)?;
        writeln!(f, "size:                 {}", self.size)?;
        write!(f,   "max_context_length:   {}", self.max_context_length)
    }
}
