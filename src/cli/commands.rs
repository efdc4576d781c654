// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag has a default, so a bare `llm-classify` reads
// lab_8_llm/settings.json below the current directory and
// writes lab_8_llm/dist/predictions.csv.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;
use std::path::PathBuf;

use crate::application::classify_use_case::RunConfig;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Project root containing the lab_8_llm folder
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Directory holding <dataset>.csv files
    /// [default: <project-root>/lab_8_llm/data]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding one folder per pretrained model
    /// [default: <project-root>/lab_8_llm/models]
    #[arg(long)]
    pub models_dir: Option<PathBuf>,
}

/// Convert CLI RunArgs into the application-layer RunConfig.
/// The application layer never sees clap types.
impl From<RunArgs> for RunConfig {
    fn from(a: RunArgs) -> Self {
        let mut config = RunConfig::for_project(a.project_root);
        if let Some(dir) = a.data_dir {
            config.data_dir = dir;
        }
        if let Some(dir) = a.models_dir {
            config.models_dir = dir;
        }
        config
    }
}
