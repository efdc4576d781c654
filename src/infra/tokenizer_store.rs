// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the tokenizer that ships with a pretrained model.
//
// Every model directory carries a tokenizer.json in the
// HuggingFace tokenizers format; the same file the model was
// trained with, so token ids line up with the embedding table.
//
// Reference: tokenizers crate documentation

use anyhow::Result;
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("tokenizer.json")
    }

    /// Load the model's tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        let tokenizer = Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))?;
        tracing::debug!(
            "Loaded tokenizer with {} tokens",
            tokenizer.get_vocab_size(true)
        );
        Ok(tokenizer)
    }
}
