//! YAML configuration file support.
//!
//! Lets deployments pin the triage knobs in a single file instead of CLI
//! flags:
//!
//! ```yaml
//! version: "1"
//! name: "docs-kb nightly"
//! threshold: 0.85
//! similarity:
//!   version: 1
//!   block_size: 512
//!   use_parallel: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use similarity::SimilarityConfig;

use crate::pipeline::TriageConfig;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("unsupported config version: {0:?}")]
    UnsupportedVersion(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// On-disk configuration for a triage run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Configuration format version; only "1" is supported.
    pub version: String,
    /// Optional human-readable label, surfaced in logs only.
    #[serde(default)]
    pub name: Option<String>,
    /// Similarity threshold for grouping.
    #[serde(default = "FileConfig::default_threshold")]
    pub threshold: f32,
    /// Similarity engine configuration.
    #[serde(default)]
    pub similarity: SimilarityConfig,
}

impl FileConfig {
    fn default_threshold() -> f32 {
        TriageConfig::default().threshold
    }

    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigLoadError> {
        let config: FileConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version.trim() != "1" {
            return Err(ConfigLoadError::UnsupportedVersion(self.version.clone()));
        }
        self.to_triage_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    /// The runtime configuration this file describes.
    pub fn to_triage_config(&self) -> TriageConfig {
        TriageConfig {
            threshold: self.threshold,
            similarity: self.similarity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = FileConfig::from_yaml("version: \"1\"\n").unwrap();
        assert_eq!(config.threshold, TriageConfig::default().threshold);
        assert_eq!(config.similarity, SimilarityConfig::default());
        assert_eq!(config.name, None);
    }

    #[test]
    fn full_config_round_trips_into_triage_config() {
        let yaml = r#"
version: "1"
name: "nightly"
threshold: 0.7
similarity:
  version: 1
  block_size: 512
  use_parallel: true
"#;
        let config = FileConfig::from_yaml(yaml).unwrap();
        let triage = config.to_triage_config();
        assert_eq!(triage.threshold, 0.7);
        assert_eq!(triage.similarity.block_size, 512);
        assert!(triage.similarity.use_parallel);
    }

    #[test]
    fn unsupported_version_rejected() {
        let res = FileConfig::from_yaml("version: \"2\"\n");
        assert!(matches!(res, Err(ConfigLoadError::UnsupportedVersion(_))));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let res = FileConfig::from_yaml("version: \"1\"\nthreshold: 1.5\n");
        assert!(matches!(res, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn malformed_yaml_rejected() {
        let res = FileConfig::from_yaml("version: [unclosed");
        assert!(matches!(res, Err(ConfigLoadError::YamlParse(_))));
    }
}
