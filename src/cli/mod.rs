// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands off to Layer 2, and prints
// what comes back. All business logic lives in the use case.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::RunArgs;

use crate::application::{
    classify_use_case::{ClassifyUseCase, RunConfig},
    stages::LocalStages,
};

#[derive(Parser, Debug)]
#[command(
    name = "llm-classify",
    version,
    about = "Classify a text dataset with a pretrained transformer and score the predictions."
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config: RunConfig = self.run.into();
        tracing::info!("Project root: {}", config.project_root.display());

        let stages   = LocalStages::new(&config.data_dir, &config.models_dir);
        let use_case = ClassifyUseCase::new(config, stages);
        let report   = use_case.execute()?;

        println!("Model analysis:\n{}\n", report.model_summary);
        println!("Predictions written to {}\n", report.predictions_path.display());
        print!("Metrics:\n{}", report.metrics);
        Ok(())
    }
}
