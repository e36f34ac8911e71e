//! Error types for citegraph-prep
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::ArticleId;

/// Main error type for citegraph-prep operations
#[derive(Debug, Error)]
pub enum CitegraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed input record
    #[error("Parse error at {location}: {message}")]
    Parse { location: String, message: String },

    /// Citation record pointing at an article absent from the metadata
    #[error("Dangling reference: article {id} is not in the article set (referenced as {role})")]
    UnknownArticle { id: ArticleId, role: &'static str },

    /// Article id listed twice
    #[error("Duplicate article id {0}")]
    DuplicateArticle(ArticleId),

    /// Feature name not in the catalog
    #[error("Unknown feature '{name}'. Choose among: {}", valid.join(", "))]
    UnknownFeature { name: String, valid: Vec<String> },

    /// Feature subset matched nothing in the catalog
    #[error("No features selected. Select existing features among: {}", valid.join(", "))]
    NoFeaturesSelected { valid: Vec<String> },

    /// Export requested before any matrix was computed
    #[error("Nothing to export: compute a feature before exporting it")]
    NothingComputed,

    /// Export requested under a different name than the bound session
    #[error("Feature mismatch: session holds '{bound}', export requested '{requested}'")]
    FeatureMismatch { bound: String, requested: String },

    /// Matrix width does not match the declared column schema
    #[error("Schema mismatch for '{feature}': {columns} declared columns, matrix has {width}")]
    SchemaMismatch {
        feature: String,
        columns: usize,
        width: usize,
    },

    /// Extractor broke the one-row-per-edge contract
    #[error("Extractor contract violated for '{feature}': {rows} rows for {edges} edges")]
    ExtractorContract {
        feature: String,
        rows: usize,
        edges: usize,
    },

    /// Extractor-internal failure
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CitegraphError {
    /// Create a parse error for a location (file:line, row number, ...)
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        CitegraphError::Parse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-feature error listing the valid names
    pub fn unknown_feature(name: impl Into<String>, valid: Vec<String>) -> Self {
        CitegraphError::UnknownFeature {
            name: name.into(),
            valid,
        }
    }

    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        CitegraphError::Extraction(msg.into())
    }
}

/// Result type alias for citegraph operations
pub type Result<T> = std::result::Result<T, CitegraphError>;
