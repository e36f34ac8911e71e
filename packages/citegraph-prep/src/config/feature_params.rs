//! Typed per-feature parameters
//!
//! Raw `key=value` overrides are resolved into one typed record per feature
//! kind and validated before any extractor is built. Keys a kind does not
//! declare are ignored, so one override map can be shared across features.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use crate::features::feature_export::FeatureKind;

/// Raw parameter overrides, sorted by key
pub type ParamOverrides = BTreeMap<String, String>;

/// Parse a CLI `key=value` pair
pub fn parse_override(raw: &str) -> ConfigResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::invalid_value("param", raw, "key=value")),
    }
}

// ============================================================================
// Similarity graph parameters
// ============================================================================

/// Score read off the abstract-similarity graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// Vertex degree
    Degrees,
    /// PageRank score
    Pagerank,
}

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 2] = [Self::Degrees, Self::Pagerank];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Pagerank => "pagerank",
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "degrees" => Ok(Self::Degrees),
            "pagerank" => Ok(Self::Pagerank),
            _ => Err(ConfigError::invalid_value(
                "metric",
                s,
                Self::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of the abstract-similarity graph feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityParams {
    /// Score taken from the similarity graph (default: degrees)
    pub metric: SimilarityMetric,

    /// Quantile of pairwise similarities used as edge threshold (0.0..=1.0, default 0.95)
    pub percentile: f64,
}

impl Default for SimilarityParams {
    fn default() -> Self {
        Self {
            metric: SimilarityMetric::Degrees,
            percentile: 0.95,
        }
    }
}

impl SimilarityParams {
    pub const KEYS: &'static [&'static str] = &["metric", "percentile"];

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.percentile) {
            return Err(ConfigError::range_with_hint(
                "percentile",
                self.percentile,
                0.0,
                1.0,
                "Percentile is a fraction of the similarity distribution",
            ));
        }
        Ok(())
    }

    fn apply(&mut self, overrides: &ParamOverrides) -> ConfigResult<()> {
        if let Some(raw) = overrides.get("metric") {
            self.metric = raw.parse()?;
        }
        if let Some(raw) = overrides.get("percentile") {
            self.percentile = raw
                .parse::<f64>()
                .map_err(|_| ConfigError::invalid_value("percentile", raw, "a number in [0, 1]"))?;
            // -0.0 and 0.0 must render to the same path
            self.percentile += 0.0;
        }
        Ok(())
    }
}

// ============================================================================
// Resolved parameter record
// ============================================================================

/// Resolved, validated parameters for one feature kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureParams {
    /// Kinds without tunable parameters
    None,
    Similarity(SimilarityParams),
}

impl FeatureParams {
    /// Declared defaults of a kind
    pub fn defaults(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Similarity => Self::Similarity(SimilarityParams::default()),
            _ => Self::None,
        }
    }

    /// Apply the overrides a kind declares, then validate
    pub fn resolve(kind: FeatureKind, overrides: &ParamOverrides) -> ConfigResult<Self> {
        let mut params = Self::defaults(kind);
        if let Self::Similarity(similarity) = &mut params {
            similarity.apply(overrides)?;
            similarity.validate()?;
        }
        Ok(params)
    }

    /// Path-relevant `(key, value)` pairs sorted by key
    pub fn path_components(&self) -> Vec<(&'static str, String)> {
        let mut components = match self {
            Self::None => Vec::new(),
            Self::Similarity(p) => vec![
                ("metric", p.metric.to_string()),
                ("percentile", p.percentile.to_string()),
            ],
        };
        components.sort_by_key(|(key, _)| *key);
        components
    }

    /// `key_value_` suffix used in output file names
    pub fn path_suffix(&self) -> String {
        self.path_components()
            .into_iter()
            .map(|(key, value)| format!("{}_{}_", key, value))
            .collect()
    }

    pub fn as_similarity(&self) -> Option<&SimilarityParams> {
        match self {
            Self::Similarity(p) => Some(p),
            Self::None => None,
        }
    }
}
