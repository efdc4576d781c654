// ============================================================
// Layer 6 — Model Store
// ============================================================
// Reads a pretrained classifier from its model directory.
//
// Directory layout for a model named "org/tiny-sentiment":
//
//   <models_dir>/org/tiny-sentiment/
//     config.json      ← TextClassifierConfig (architecture + labels)
//     tokenizer.json   ← see tokenizer_store.rs
//     model.mpk        ← weights written by Burn's CompactRecorder
//
// The config is needed first: the model has to be built with
// the exact architecture before the weights can be loaded
// into it. CompactRecorder is type-safe, so loading fails if
// the architecture doesn't match.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{TextClassifier, TextClassifierConfig};

/// File stem of the weights; the recorder adds the extension
const WEIGHTS_STEM: &str = "model";
const CONFIG_FILE:  &str = "config.json";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for model `name` below `models_dir`
    pub fn for_model(models_dir: &Path, name: &str) -> Self {
        Self::new(models_dir.join(name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the architecture config from JSON.
    pub fn load_config(&self) -> Result<TextClassifierConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot read model config from '{}'", path.display())
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed model config '{}'", path.display()))
    }

    /// Write the architecture config as pretty JSON.
    pub fn save_config(&self, cfg: &TextClassifierConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| {
                format!("Cannot write model config to '{}'", path.display())
            })?;
        Ok(())
    }

    /// Load weights into a freshly built model of the right architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  TextClassifier<B>,
        device: &B::Device,
    ) -> Result<TextClassifier<B>> {
        let path = self.dir.join(WEIGHTS_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model weights '{}'", path.display())
            })?;

        tracing::info!("Loaded model weights from '{}'", self.dir.display());
        Ok(model.load_record(record))
    }

    /// Persist weights. Used to build model directories for tests and demos.
    pub fn save_model<B: Backend>(&self, model: &TextClassifier<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(WEIGHTS_STEM);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save model weights to '{}'", path.display())
            })?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::tests::tiny_config;
    use burn::backend::NdArray;

    #[test]
    fn test_config_roundtrip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::for_model(dir.path(), "org/tiny");
        store.save_config(&tiny_config()).unwrap();

        let loaded = store.load_config().unwrap();
        assert_eq!(loaded.labels, vec!["negative", "positive"]);
        assert!(dir.path().join("org/tiny/config.json").exists());
    }

    #[test]
    fn test_weights_load_into_same_architecture() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let device = Default::default();

        let model: TextClassifier<NdArray> = tiny_config().init(&device);
        store.save_model(&model).unwrap();

        let fresh: TextClassifier<NdArray> = tiny_config().init(&device);
        let loaded = store.load_model(fresh, &device).unwrap();
        assert_eq!(loaded.num_params(), model.num_params());
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelStore::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
