use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct TextClassifierConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub dropout:     f64,
    /// Class names; the head has one output per label
    pub labels:      Vec<String>,
}

impl TextClassifierConfig {
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> TextClassifier<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let classifier = LinearConfig::new(self.d_model, self.num_labels()).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        TextClassifier {
            token_embedding, position_embedding, layers,
            final_norm, classifier, dropout,
            max_seq_len: self.max_seq_len,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1   = LayerNormConfig::new(self.d_model).init(device);
        let norm2   = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    /// `pad_mask` is true at padding positions, which attention ignores.
    pub fn forward(&self, x: Tensor<B, 3>, pad_mask: Tensor<B, 2, Bool>) -> Tensor<B, 3> {
        let input       = MhaInput::self_attn(x.clone()).mask_pad(pad_mask);
        let attn_output = self.self_attn.forward(input).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

#[derive(Module, Debug)]
pub struct TextClassifier<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub layers:             Vec<EncoderBlock<B>>,
    pub final_norm:         LayerNorm<B>,
    pub classifier:         Linear<B>,
    pub dropout:            Dropout,
    pub max_seq_len:        usize,
}

impl<B: Backend> TextClassifier<B> {
    /// input_ids, attention_mask: [batch, seq_len] → logits: [batch, num_labels]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let pad_mask = attention_mask.clone().equal_elem(0);

        let mut x = self.dropout.forward(tok_emb + pos_emb);
        for layer in &self.layers {
            x = layer.forward(x, pad_mask.clone());
        }
        let x = self.final_norm.forward(x); // [batch, seq_len, d_model]
        let [_, _, d_model] = x.dims();

        // Mean over real tokens only; clamp keeps all-padding rows finite.
        let mask   = attention_mask.float().unsqueeze_dim::<3>(2); // [batch, seq_len, 1]
        let summed = (x * mask.clone()).sum_dim(1);                 // [batch, 1, d_model]
        let counts = mask.sum_dim(1).clamp_min(1.0);                // [batch, 1, 1]
        let pooled = (summed / counts).reshape([batch_size, d_model]);

        self.classifier.forward(pooled)
    }

    /// Index of the highest logit per row
    pub fn predict(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Vec<usize> {
        let indices = self.forward(input_ids, attention_mask).argmax(1).into_data();
        let predicted: Vec<usize> = indices.iter::<i64>().map(|i| i as usize).collect();
        predicted
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use burn::backend::NdArray;

    pub fn tiny_config() -> TextClassifierConfig {
        TextClassifierConfig::new(
            16, 8, 8, 2, 1, 16, 0.0,
            vec!["negative".to_string(), "positive".to_string()],
        )
    }

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model: TextClassifier<NdArray> = tiny_config().init(&device);

        let ids  = Tensor::<NdArray, 2, Int>::from_ints([[2, 3, 0, 0], [4, 0, 0, 0]], &device);
        let mask = Tensor::<NdArray, 2, Int>::from_ints([[1, 1, 0, 0], [1, 0, 0, 0]], &device);

        let logits = model.forward(ids.clone(), mask.clone());
        assert_eq!(logits.dims(), [2, 2]);

        let predicted = model.predict(ids, mask);
        assert_eq!(predicted.len(), 2);
        assert!(predicted.iter().all(|&p| p < 2));
    }

    #[test]
    fn test_padding_does_not_change_prediction() {
        let device = Default::default();
        let model: TextClassifier<NdArray> = tiny_config().init(&device);

        let short = model.forward(
            Tensor::from_ints([[2, 3, 0, 0]], &device),
            Tensor::from_ints([[1, 1, 0, 0]], &device),
        );
        let padded = model.forward(
            Tensor::from_ints([[2, 3, 5, 5]], &device),
            Tensor::from_ints([[1, 1, 0, 0]], &device),
        );

        let a: Vec<f32> = short.into_data().iter::<f32>().collect();
        let b: Vec<f32> = padded.into_data().iter::<f32>().collect();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-4, "{x} vs {y}");
        }
    }
}
