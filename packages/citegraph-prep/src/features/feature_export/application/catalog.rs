//! Process-wide, read-only feature catalog

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::config::FeatureParams;
use crate::errors::{CitegraphError, Result};
use crate::features::extractors::standard_factory;
use crate::features::feature_export::domain::{FeatureKind, FeatureSpec};

static STANDARD_CATALOG: Lazy<FeatureCatalog> = Lazy::new(FeatureCatalog::standard);

/// Ordered set of feature specs, one per kind
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    specs: Vec<FeatureSpec>,
}

impl FeatureCatalog {
    /// Catalog over arbitrary specs (first spec wins on a repeated kind)
    pub fn new(specs: Vec<FeatureSpec>) -> Self {
        let mut unique: Vec<FeatureSpec> = Vec::with_capacity(specs.len());
        for spec in specs {
            if !unique.iter().any(|seen| seen.kind == spec.kind) {
                unique.push(spec);
            }
        }
        Self { specs: unique }
    }

    /// All nine kinds with their production extractors
    pub fn standard() -> Self {
        Self::new(
            FeatureKind::ALL
                .into_iter()
                .map(|kind| FeatureSpec::new(kind, standard_factory(kind)))
                .collect(),
        )
    }

    /// Shared standard catalog
    pub fn global() -> &'static FeatureCatalog {
        &STANDARD_CATALOG
    }

    pub fn specs(&self) -> &[FeatureSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered names, in catalog order
    pub fn names(&self) -> Vec<String> {
        self.specs.iter().map(|spec| spec.name().to_string()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&FeatureSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    /// Spec by name, or an error listing every registered name
    pub fn spec(&self, name: &str) -> Result<&FeatureSpec> {
        self.find(name)
            .ok_or_else(|| CitegraphError::unknown_feature(name, self.names()))
    }

    /// JSON description of every spec (name, template, columns, defaults)
    pub fn describe(&self) -> Value {
        Value::Array(
            self.specs
                .iter()
                .map(|spec| {
                    let defaults = match &spec.defaults {
                        FeatureParams::None => json!({}),
                        FeatureParams::Similarity(p) => json!({
                            "metric": p.metric.as_str(),
                            "percentile": p.percentile,
                        }),
                    };
                    json!({
                        "name": spec.name(),
                        "path_template": spec.path_template,
                        "columns": spec.columns,
                        "defaults": defaults,
                    })
                })
                .collect(),
        )
    }
}
