// ============================================================
// Layer 4 — Text Batcher
// ============================================================
// Two steps turn a list of texts into model input:
//
//   encode_text()  — tokenizer → token ids, truncated to
//                    max_length and padded with the [PAD] id
//   TextBatcher    — implements Burn's Batcher trait and stacks
//                    N encoded texts into [N, max_length] tensors
//
// Because every EncodedText is already padded to the same
// length, batching is a flatten-and-reshape:
//   [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// Reference: Burn Book §4 (Batcher)
//            tokenizers crate documentation

use anyhow::Result;
use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};
use tokenizers::Tokenizer;

/// Id used when the tokenizer defines no [PAD] token
const DEFAULT_PAD_ID: u32 = 0;

/// One tokenised text, padded to a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub input_ids:      Vec<u32>,
    /// 1 = real token, 0 = padding
    pub attention_mask: Vec<u32>,
}

/// Tokenise `text`, truncate to `max_length`, and pad to exactly `max_length`.
pub fn encode_text(tokenizer: &Tokenizer, text: &str, max_length: usize) -> Result<EncodedText> {
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

    let pad_id = tokenizer.token_to_id("[PAD]").unwrap_or(DEFAULT_PAD_ID);

    let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
    input_ids.truncate(max_length);

    let real_tokens        = input_ids.len();
    let mut attention_mask = vec![1u32; real_tokens];

    input_ids.resize(max_length, pad_id);
    attention_mask.resize(max_length, 0);

    Ok(EncodedText { input_ids, attention_mask })
}

// ─── TextBatch ────────────────────────────────────────────────────────────────
/// A batch ready for the classifier forward pass.
#[derive(Debug, Clone)]
pub struct TextBatch<B: Backend> {
    /// Token ids — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention mask — shape: [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,
}

// ─── TextBatcher ──────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct TextBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TextBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<EncodedText, TextBatch<B>> for TextBatcher<B> {
    fn batch(&self, items: Vec<EncodedText>) -> TextBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |s| s.input_ids.len());

        // Burn Int tensors are built from i32
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.attention_mask.iter().map(|&x| x as i32))
            .collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(
            mask_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        TextBatch { input_ids, attention_mask }
    }
}
