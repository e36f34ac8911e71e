//! Export run configuration (YAML v1)
//!
//! ```yaml
//! version: 1
//! output_root: preprocessing
//! verbose: true
//! progress_every: 10000
//! citations: data/training_set.txt
//! articles: data/node_information.csv
//! features: [original, similarity]
//! params:
//!   metric: pagerank
//!   percentile: "0.9"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::feature_params::{FeatureParams, ParamOverrides};
use crate::features::feature_export::FeatureKind;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Export run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Directory the per-feature output trees are created under
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Log extraction progress
    #[serde(default)]
    pub verbose: bool,

    /// Rows between two progress lines (>= 1)
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    /// Labeled citation records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<PathBuf>,

    /// Article metadata CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<PathBuf>,

    /// Features to export (all when empty)
    #[serde(default)]
    pub features: Vec<String>,

    /// Raw parameter overrides shared by all selected features
    #[serde(default)]
    pub params: ParamOverrides,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("preprocessing")
}

fn default_progress_every() -> usize {
    10_000
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            version: 1,
            output_root: default_output_root(),
            verbose: false,
            progress_every: default_progress_every(),
            citations: None,
            articles: None,
            features: Vec::new(),
            params: ParamOverrides::new(),
        }
    }
}

impl ExportConfig {
    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: ExportConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }

    /// Selected feature kinds (all kinds when none are listed)
    pub fn selected_kinds(&self) -> ConfigResult<Vec<FeatureKind>> {
        if self.features.is_empty() {
            return Ok(FeatureKind::ALL.to_vec());
        }
        self.features
            .iter()
            .map(|name| {
                FeatureKind::from_name(name).ok_or_else(|| ConfigError::UnknownFeature {
                    name: name.clone(),
                    valid: FeatureKind::names(),
                })
            })
            .collect()
    }

    /// Version, frequency and per-feature parameter checks
    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        if self.progress_every == 0 {
            return Err(ConfigError::range_with_hint(
                "progress_every",
                self.progress_every,
                1,
                usize::MAX,
                "Progress frequency must be at least 1",
            ));
        }

        for kind in self.selected_kinds()? {
            FeatureParams::resolve(kind, &self.params)?;
        }
        Ok(())
    }
}
