// ============================================================
// Layer 6 — Settings
// ============================================================
// The demo is configured by one JSON file:
//
//   {
//     "parameters": {
//       "dataset": "dair-ai/emotion",
//       "model":   "org/tiny-emotion",
//       "metrics": ["accuracy", "f1"]
//     }
//   }
//
// Read once at start. Unknown keys are ignored; missing keys
// are a parse error that names the file.
//
// Reference: serde / serde_json documentation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub parameters: Parameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Dataset name passed to the importer
    pub dataset: String,

    /// Model name passed to the inference pipeline
    pub model: String,

    /// Metric names, matched case-insensitively
    pub metrics: Vec<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read settings from '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse settings '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nested_parameters() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"parameters": {"dataset": "d1", "model": "m1", "metrics": ["accuracy"]}, "extra": 1}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.parameters.dataset, "d1");
        assert_eq!(settings.parameters.model, "m1");
        assert_eq!(settings.parameters.metrics, vec!["accuracy"]);
    }

    #[test]
    fn test_malformed_settings_name_the_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"parameters": {"dataset": "d1"}}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("settings.json"));
    }
}
