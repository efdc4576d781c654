// ============================================================
// Layer 5 — LLM Pipeline
// ============================================================
use anyhow::Result;
use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    module::Module,
};
use std::path::Path;
use tokenizers::Tokenizer;

use crate::data::batcher::{encode_text, TextBatcher};
use crate::data::dataset::TaskDataset;
use crate::domain::inference::{Device, InferenceConfig, ModelSummary};
use crate::domain::task_sample::{Prediction, TaskSample};
use crate::domain::traits::InferencePipeline;
use crate::infra::{model_store::ModelStore, tokenizer_store::TokenizerStore};
use crate::ml::model::{TextClassifier, TextClassifierConfig};

type InferBackend = burn::backend::NdArray;

// Weights are stored as f32
const BYTES_PER_PARAM: usize = 4;

pub struct LlmPipeline {
    model:        TextClassifier<InferBackend>,
    model_config: TextClassifierConfig,
    tokenizer:    Tokenizer,
    dataset:      TaskDataset,
    batch_size:   usize,
    max_length:   usize,
    device:       burn::backend::ndarray::NdArrayDevice,
}

impl LlmPipeline {
    /// Load model `name` from `models_dir` and bind it to `dataset`.
    pub fn load(
        models_dir: &Path,
        name:       &str,
        dataset:    TaskDataset,
        config:     &InferenceConfig,
    ) -> Result<Self> {
        let store        = ModelStore::for_model(models_dir, name);
        let model_config = store.load_config()?;
        let tokenizer    = TokenizerStore::new(store.dir()).load()?;

        let device = device_for(config.device);
        let model: TextClassifier<InferBackend> = model_config.init(&device);
        let model = store.load_model(model, &device)?;
        tracing::info!("Model '{}' loaded ({} labels)", name, model_config.num_labels());

        Ok(Self::from_parts(model, model_config, tokenizer, dataset, config))
    }

    pub fn from_parts(
        model:        TextClassifier<InferBackend>,
        model_config: TextClassifierConfig,
        tokenizer:    Tokenizer,
        dataset:      TaskDataset,
        config:       &InferenceConfig,
    ) -> Self {
        // Positions past the embedding table have no vector
        let max_length = config.max_length.min(model_config.max_seq_len);
        if max_length < config.max_length {
            tracing::warn!(
                "max_length {} exceeds model context {}, truncating to {}",
                config.max_length, model_config.max_seq_len, max_length
            );
        }

        Self {
            model,
            model_config,
            tokenizer,
            dataset,
            batch_size: config.batch_size.max(1),
            max_length,
            device: device_for(config.device),
        }
    }

    /// Label names for one batch of texts
    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<String>> {
        let encoded = texts
            .iter()
            .map(|t| encode_text(&self.tokenizer, t, self.max_length))
            .collect::<Result<Vec<_>>>()?;

        let batch   = TextBatcher::<InferBackend>::new(self.device.clone()).batch(encoded);
        let indices = self.model.predict(batch.input_ids, batch.attention_mask);

        Ok(indices.into_iter().map(|i| self.label_name(i)).collect())
    }

    fn label_name(&self, index: usize) -> String {
        self.model_config
            .labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| index.to_string())
    }
}

impl InferencePipeline for LlmPipeline {
    fn analyze_model(&self) -> Result<ModelSummary> {
        let params = self.model.num_params();
        Ok(ModelSummary {
            input_shape:          vec![self.batch_size, self.max_length],
            embedding_size:       self.model_config.d_model,
            output_shape:         vec![self.batch_size, self.model_config.num_labels()],
            num_trainable_params: params,
            vocab_size:           self.model_config.vocab_size,
            size:                 params * BYTES_PER_PARAM,
            max_context_length:   self.model_config.max_seq_len,
        })
    }

    fn infer_sample(&self, sample: &TaskSample) -> Result<Option<String>> {
        if sample.source.trim().is_empty() {
            return Ok(None);
        }
        let label = self.predict_batch(&[sample.source.as_str()])?.pop();
        tracing::debug!("Sample '{}' → {:?}", sample.source, label);
        Ok(label)
    }

    fn infer_dataset(&self) -> Result<Vec<Prediction>> {
        let samples = self.dataset.samples();
        let mut predictions = Vec::with_capacity(self.dataset.len());

        for (i, chunk) in samples.chunks(self.batch_size).enumerate() {
            let texts: Vec<&str> = chunk.iter().map(|s| s.source.as_str()).collect();
            let labels = self.predict_batch(&texts)?;

            predictions.extend(
                chunk.iter()
                    .zip(labels)
                    .map(|(sample, label)| Prediction::new(sample.target.clone(), label)),
            );
            tracing::debug!("Batch {} done ({} samples)", i + 1, chunk.len());
        }

        tracing::info!("Inferred {} samples", predictions.len());
        Ok(predictions)
    }
}

fn device_for(device: Device) -> burn::backend::ndarray::NdArrayDevice {
    match device {
        Device::Cpu => burn::backend::ndarray::NdArrayDevice::Cpu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::tests::word_level_tokenizer;
    use crate::ml::model::tests::tiny_config;

    fn dataset(n: usize) -> TaskDataset {
        TaskDataset::new(
            (0..n)
                .map(|i| TaskSample::new(if i % 2 == 0 { "good movie" } else { "bad movie" }, "positive"))
                .collect(),
        )
    }

    fn pipeline(dir: &Path, n: usize, batch_size: usize) -> LlmPipeline {
        let tokenizer = word_level_tokenizer(dir, &["good", "bad", "movie"]);
        let cfg       = tiny_config();
        let model: TextClassifier<InferBackend> = cfg.init(&Default::default());
        let config    = InferenceConfig { max_length: 120, batch_size, device: Device::Cpu };
        LlmPipeline::from_parts(model, cfg, tokenizer, dataset(n), &config)
    }

    #[test]
    fn test_analyze_model_reports_clamped_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let summary = pipeline(dir.path(), 3, 64).analyze_model().unwrap();

        // tiny_config has an 8-token context, so 120 is clamped
        assert_eq!(summary.input_shape, vec![64, 8]);
        assert_eq!(summary.output_shape, vec![64, 2]);
        assert_eq!(summary.embedding_size, 8);
        assert_eq!(summary.vocab_size, 16);
        assert_eq!(summary.max_context_length, 8);
        assert_eq!(summary.size, summary.num_trainable_params * 4);
    }

    #[test]
    fn test_infer_dataset_keeps_order_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), 5, 2);

        let predictions = p.infer_dataset().unwrap();
        assert_eq!(predictions.len(), 5);
        assert!(predictions.iter().all(|pr| pr.target == "positive"));
        assert!(predictions
            .iter()
            .all(|pr| pr.predictions == "negative" || pr.predictions == "positive"));

        // Same text must give the same label whichever batch it lands in
        assert_eq!(predictions[0].predictions, predictions[4].predictions);
    }

    #[test]
    fn test_infer_sample() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path(), 1, 64);

        assert!(p.infer_sample(&TaskSample::new("good movie", "positive")).unwrap().is_some());
        assert!(p.infer_sample(&TaskSample::new("   ", "positive")).unwrap().is_none());
    }

    #[test]
    fn test_load_from_model_directory() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ModelStore::for_model(dir.path(), "org/tiny");
        let device = Default::default();

        store.save_config(&tiny_config()).unwrap();
        store.save_model(&tiny_config().init::<InferBackend>(&device)).unwrap();
        word_level_tokenizer(store.dir(), &["good", "bad", "movie"]);

        let p = LlmPipeline::load(dir.path(), "org/tiny", dataset(2), &InferenceConfig::default())
            .unwrap();
        assert_eq!(p.infer_dataset().unwrap().len(), 2);
    }
}
