// ============================================================
// Layer 2 — ClassifyUseCase
// ============================================================
// Runs the classification demo in a fixed order, stopping at
// the first failure:
//
//   Step 1:  Load settings                     (Layer 6 - infra)
//   Step 2:  Import the dataset                (Layer 4 - data)
//   Step 3:  Analyze, then transform it        (Layer 4 - data)
//   Step 4:  Keep the first 100 samples        (Layer 4 - data)
//   Step 5:  Build the inference pipeline      (Layer 5 - ml)
//   Step 6:  Analyze the model
//   Step 7:  Infer one sample
//   Step 8:  Make sure dist/ exists
//   Step 9:  Infer the dataset, write the CSV  (Layer 6 - infra)
//   Step 10: Resolve metric names              (Layer 3 - domain)
//   Step 11: Evaluate the CSV                  (Layer 7 - evaluation)
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use std::{fs, path::PathBuf};

use crate::application::stages::StageFactory;
use crate::data::{
    dataset::{TaskDataset, DEMO_DATASET_SIZE},
    preprocessor::RawDataPreprocessor,
};
use crate::domain::{
    error::ClassifyError,
    inference::{InferenceConfig, ModelSummary},
    metric::{Metric, MetricReport},
};
use crate::infra::{predictions::write_predictions, settings::Settings, timing::report_time};

/// Lab folder below the project root
const LAB_DIR: &str = "lab_8_llm";

// ─── Run Configuration ───────────────────────────────────────────────────────
// Where things live on disk. Built from CLI arguments in Layer 1.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project_root: PathBuf,
    pub data_dir:     PathBuf,
    pub models_dir:   PathBuf,
}

impl RunConfig {
    /// Defaults data and models to folders inside the lab directory
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let lab = project_root.join(LAB_DIR);
        Self {
            data_dir:   lab.join("data"),
            models_dir: lab.join("models"),
            project_root,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.project_root.join(LAB_DIR).join("settings.json")
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.project_root.join(LAB_DIR).join("dist")
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.dist_dir().join("predictions.csv")
    }
}

/// What a successful run hands back to the CLI for printing
#[derive(Debug, Clone)]
pub struct ClassifyReport {
    pub model_summary:    ModelSummary,
    pub metrics:          MetricReport,
    pub predictions_path: PathBuf,
}

// ─── ClassifyUseCase ──────────────────────────────────────────────────────────
pub struct ClassifyUseCase<F: StageFactory> {
    config: RunConfig,
    stages: F,
}

impl<F: StageFactory> ClassifyUseCase<F> {
    pub fn new(config: RunConfig, stages: F) -> Self {
        Self { config, stages }
    }

    /// Run the whole demo, logging its wall-clock time.
    pub fn execute(&self) -> Result<ClassifyReport> {
        report_time("Classification demo", || self.run_steps())
    }

    fn run_steps(&self) -> Result<ClassifyReport> {
        let cfg = &self.config;

        // ── Step 1: Settings ──────────────────────────────────────────────────
        let settings = Settings::load(&cfg.settings_path())?;
        let params   = &settings.parameters;

        // ── Step 2: Import ────────────────────────────────────────────────────
        tracing::info!("Importing dataset '{}'", params.dataset);
        let importer = self.stages.importer(&params.dataset)?;
        let raw_data = importer
            .obtain()?
            .ok_or_else(|| ClassifyError::ImportFailure(params.dataset.clone()))?;

        // ── Step 3: Analyze + transform ───────────────────────────────────────
        let mut preprocessor = RawDataPreprocessor::new(raw_data);
        let analysis = preprocessor.analyze()?;
        tracing::info!("Dataset analysis: {:?}", analysis);
        preprocessor.transform()?;

        // ── Step 4: Bounded dataset view ──────────────────────────────────────
        let dataset = TaskDataset::new(preprocessor.head(DEMO_DATASET_SIZE));
        let first   = dataset.get(0);
        tracing::info!("Dataset view holds {} samples", dataset.len());

        // ── Step 5: Pipeline ──────────────────────────────────────────────────
        let inference = InferenceConfig::default();
        tracing::info!("Loading model '{}' on {}", params.model, inference.device);
        let pipeline = self.stages.pipeline(&params.model, dataset, &inference)?;

        // ── Step 6: Model analysis ────────────────────────────────────────────
        let model_summary = pipeline.analyze_model()?;
        tracing::info!("Model analysis:\n{}", model_summary);

        // ── Step 7: Single-sample smoke inference ─────────────────────────────
        match first {
            Some(sample) => {
                let label = pipeline.infer_sample(&sample)?;
                tracing::info!("Sample prediction: {:?}", label);
            }
            None => tracing::warn!("Dataset is empty, skipping sample inference"),
        }

        // ── Step 8: Output directory ──────────────────────────────────────────
        let dist_dir = cfg.dist_dir();
        if !dist_dir.exists() {
            fs::create_dir_all(&dist_dir)
                .with_context(|| format!("Cannot create '{}'", dist_dir.display()))?;
        }

        // ── Step 9: Full inference → CSV ──────────────────────────────────────
        let predictions_path = cfg.predictions_path();
        let predictions = pipeline.infer_dataset()?;
        write_predictions(&predictions_path, &predictions)?;

        // ── Step 10: Metrics ──────────────────────────────────────────────────
        let metrics = Metric::resolve_all(&params.metrics)?;

        // ── Step 11: Evaluation ───────────────────────────────────────────────
        let evaluator = self.stages.evaluator(&predictions_path, metrics)?;
        let metrics   = evaluator.run()?.ok_or(ClassifyError::EmptyEvaluation)?;

        Ok(ClassifyReport { model_summary, metrics, predictions_path })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    use crate::domain::raw_data::RawData;
    use crate::domain::task_sample::{Prediction, TaskSample};
    use crate::domain::traits::{InferencePipeline, RawDataSource, TaskEvaluator};
    use crate::evaluation::evaluator::CsvTaskEvaluator;

    struct StubImporter(Option<RawData>);

    impl RawDataSource for StubImporter {
        fn obtain(&self) -> Result<Option<RawData>> {
            Ok(self.0.clone())
        }
    }

    /// Predicts "positive" for any text mentioning "good"
    struct StubPipeline(TaskDataset);

    impl StubPipeline {
        fn label(sample: &TaskSample) -> String {
            if sample.source.contains("good") { "positive" } else { "negative" }.to_string()
        }
    }

    impl InferencePipeline for StubPipeline {
        fn analyze_model(&self) -> Result<ModelSummary> {
            Ok(ModelSummary {
                input_shape:          vec![64, 120],
                embedding_size:       8,
                output_shape:         vec![64, 2],
                num_trainable_params: 10,
                vocab_size:           100,
                size:                 40,
                max_context_length:   120,
            })
        }

        fn infer_sample(&self, sample: &TaskSample) -> Result<Option<String>> {
            Ok(Some(Self::label(sample)))
        }

        fn infer_dataset(&self) -> Result<Vec<Prediction>> {
            Ok(self
                .0
                .samples()
                .iter()
                .map(|s| Prediction::new(s.target.clone(), Self::label(s)))
                .collect())
        }
    }

    struct EmptyEvaluator;

    impl TaskEvaluator for EmptyEvaluator {
        fn run(&self) -> Result<Option<MetricReport>> {
            Ok(None)
        }
    }

    struct StubStages {
        raw:             Option<RawData>,
        empty_evaluator: bool,
        calls:           RefCell<Vec<String>>,
    }

    impl StubStages {
        fn new(raw: Option<RawData>) -> Self {
            Self { raw, empty_evaluator: false, calls: RefCell::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl StageFactory for StubStages {
        fn importer(&self, dataset: &str) -> Result<Box<dyn RawDataSource>> {
            self.calls.borrow_mut().push(format!("importer:{dataset}"));
            Ok(Box::new(StubImporter(self.raw.clone())))
        }

        fn pipeline(
            &self,
            model:   &str,
            dataset: TaskDataset,
            config:  &InferenceConfig,
        ) -> Result<Box<dyn InferencePipeline>> {
            assert_eq!(config, &InferenceConfig::default());
            self.calls.borrow_mut().push(format!("pipeline:{model}"));
            Ok(Box::new(StubPipeline(dataset)))
        }

        fn evaluator(&self, predictions: &Path, metrics: Vec<Metric>) -> Result<Box<dyn TaskEvaluator>> {
            self.calls.borrow_mut().push("evaluator".to_string());
            if self.empty_evaluator {
                Ok(Box::new(EmptyEvaluator))
            } else {
                Ok(Box::new(CsvTaskEvaluator::new(predictions, metrics)))
            }
        }
    }

    fn raw_reviews() -> RawData {
        RawData::new(
            vec!["text".into(), "label".into()],
            vec![
                vec!["a good film".into(), "positive".into()],
                vec!["a dull film".into(), "negative".into()],
                vec!["good  acting, bad plot".into(), "negative".into()],
            ],
        )
    }

    fn project(metrics: &[&str]) -> (tempfile::TempDir, RunConfig) {
        let root = tempfile::tempdir().unwrap();
        let lab  = root.path().join(LAB_DIR);
        fs::create_dir_all(&lab).unwrap();

        let settings = serde_json::json!({
            "parameters": { "dataset": "d1", "model": "m1", "metrics": metrics }
        });
        fs::write(lab.join("settings.json"), settings.to_string()).unwrap();

        let config = RunConfig::for_project(root.path());
        (root, config)
    }

    fn error_kind(err: &anyhow::Error) -> Option<&ClassifyError> {
        err.downcast_ref::<ClassifyError>()
    }

    #[test]
    fn test_end_to_end_writes_expected_predictions() {
        let (_root, config) = project(&["accuracy"]);
        let stages = StubStages::new(Some(raw_reviews()));
        let use_case = ClassifyUseCase::new(config.clone(), stages);

        let report = use_case.execute().unwrap();

        let csv = fs::read_to_string(config.predictions_path()).unwrap();
        assert_eq!(
            csv,
            "target,predictions\n\
             positive,positive\n\
             negative,negative\n\
             negative,positive\n"
        );
        assert_eq!(report.predictions_path, config.predictions_path());
        assert_eq!(report.metrics.get(Metric::Accuracy), Some(2.0 / 3.0));
        assert_eq!(report.model_summary.max_context_length, 120);
        assert_eq!(
            use_case.stages.calls(),
            vec!["importer:d1", "pipeline:m1", "evaluator"]
        );
    }

    #[test]
    fn test_unknown_metric_fails_before_evaluation() {
        let (_root, config) = project(&["accuracy", "perplexity"]);
        let use_case = ClassifyUseCase::new(config, StubStages::new(Some(raw_reviews())));

        let err = use_case.execute().unwrap_err();

        assert!(matches!(error_kind(&err), Some(ClassifyError::UnknownMetric(n)) if n == "perplexity"));
        assert!(!use_case.stages.calls().contains(&"evaluator".to_string()));
    }

    #[test]
    fn test_missing_raw_data_fails_before_preprocessing() {
        let (_root, config) = project(&["accuracy"]);
        let use_case = ClassifyUseCase::new(config.clone(), StubStages::new(None));

        let err = use_case.execute().unwrap_err();

        assert!(matches!(error_kind(&err), Some(ClassifyError::ImportFailure(d)) if d == "d1"));
        assert_eq!(use_case.stages.calls(), vec!["importer:d1"]);
        assert!(!config.dist_dir().exists());
    }

    #[test]
    fn test_repeated_runs_reuse_dist_dir() {
        let (_root, config) = project(&["accuracy", "F1"]);
        let use_case = ClassifyUseCase::new(config.clone(), StubStages::new(Some(raw_reviews())));

        use_case.execute().unwrap();
        assert!(config.dist_dir().is_dir());
        let report = use_case.execute().unwrap();

        assert_eq!(report.metrics.scores.len(), 2);
    }

    #[test]
    fn test_empty_evaluation_is_an_error() {
        let (_root, config) = project(&["accuracy"]);
        let mut stages = StubStages::new(Some(raw_reviews()));
        stages.empty_evaluator = true;

        let err = ClassifyUseCase::new(config, stages).execute().unwrap_err();

        assert!(matches!(error_kind(&err), Some(ClassifyError::EmptyEvaluation)));
        assert_eq!(err.to_string(), "Demo does not work correctly");
    }

    #[test]
    fn test_dataset_view_is_capped_at_100_rows() {
        let (_root, config) = project(&["accuracy"]);
        let rows = (0..150)
            .map(|i| vec![format!("review number {i}"), "negative".to_string()])
            .collect();
        let raw = RawData::new(vec!["text".into(), "label".into()], rows);

        ClassifyUseCase::new(config.clone(), StubStages::new(Some(raw)))
            .execute()
            .unwrap();

        let csv = fs::read_to_string(config.predictions_path()).unwrap();
        assert_eq!(csv.lines().count(), 1 + DEMO_DATASET_SIZE);
    }

    #[test]
    fn test_malformed_settings_stop_the_run() {
        let (_root, config) = project(&["accuracy"]);
        fs::write(config.settings_path(), "{ not json").unwrap();
        let use_case = ClassifyUseCase::new(config, StubStages::new(Some(raw_reviews())));

        assert!(use_case.execute().is_err());
        assert!(use_case.stages.calls().is_empty());
    }
}
