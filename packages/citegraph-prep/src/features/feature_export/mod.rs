//! Feature export
//!
//! The registry side of the pipeline:
//!
//! - `domain`: the closed [`FeatureKind`] set, [`FeatureSpec`] catalog entries, [`FeatureMatrix`]
//! - `ports`: the [`FeatureExtractor`] contract and its construction context
//! - `application`: [`FeatureCatalog`], [`ExtractorSession`] and [`FeatureExporter`]
//! - `infrastructure`: CSV output

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    feature_path, ExporterSettings, ExtractorSession, FeatureCatalog, FeatureExporter,
    SessionOutcome,
};
pub use domain::{matrix_from_rows, ExtractorFactory, FeatureKind, FeatureMatrix, FeatureSpec};
pub use ports::{ExtractorContext, FeatureExtractor};
