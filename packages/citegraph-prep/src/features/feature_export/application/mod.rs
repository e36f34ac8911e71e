//! Feature registry use cases

pub mod catalog;
pub mod exporter;
pub mod session;

pub use catalog::FeatureCatalog;
pub use exporter::{feature_path, ExporterSettings, FeatureExporter};
pub use session::{ExtractorSession, SessionOutcome};
