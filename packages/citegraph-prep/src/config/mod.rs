//! Configuration system
//!
//! - `feature_params`: typed, validated parameters per feature kind
//! - `export_config`: YAML run configuration for the export binary

pub mod error;
pub mod export_config;
pub mod feature_params;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use export_config::ExportConfig;
pub use feature_params::{
    parse_override, FeatureParams, ParamOverrides, SimilarityMetric, SimilarityParams,
};
