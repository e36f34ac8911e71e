//! Feature registry: compute, cache and export feature matrices

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::catalog::FeatureCatalog;
use super::session::{BoundExtractor, ExtractorSession, SessionOutcome};
use crate::config::{ExportConfig, FeatureParams, ParamOverrides};
use crate::errors::{CitegraphError, Result};
use crate::features::feature_export::domain::FeatureSpec;
use crate::features::feature_export::infrastructure::write_feature_csv;
use crate::features::feature_export::ports::ExtractorContext;
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::TextNormalizer;

/// Run-wide exporter settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExporterSettings {
    /// Root of every per-feature output tree
    pub output_root: PathBuf,
    pub verbose: bool,
    pub progress_every: usize,
}

impl Default for ExporterSettings {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("preprocessing"),
            verbose: false,
            progress_every: 10_000,
        }
    }
}

impl From<&ExportConfig> for ExporterSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            output_root: config.output_root.clone(),
            verbose: config.verbose,
            progress_every: config.progress_every,
        }
    }
}

/// `<root>/<template>/output/<suffix><filename>`
pub fn feature_path(
    output_root: &Path,
    spec: &FeatureSpec,
    params: &FeatureParams,
    filename: &str,
) -> PathBuf {
    output_root
        .join(spec.path_template)
        .join("output")
        .join(format!("{}{}", params.path_suffix(), filename))
}

/// Computes and exports features against an immutable catalog.
///
/// The exporter itself is stateless; the single cached extractor lives in
/// the caller's [`ExtractorSession`]. Cache key is the feature name alone.
pub struct FeatureExporter<'c> {
    catalog: &'c FeatureCatalog,
    settings: ExporterSettings,
    normalizer: Arc<TextNormalizer>,
}

impl FeatureExporter<'static> {
    /// Exporter over the standard catalog
    pub fn new(settings: ExporterSettings) -> Self {
        Self::with_catalog(FeatureCatalog::global(), settings)
    }
}

impl<'c> FeatureExporter<'c> {
    pub fn with_catalog(catalog: &'c FeatureCatalog, settings: ExporterSettings) -> Self {
        Self {
            catalog,
            settings,
            normalizer: Arc::new(TextNormalizer::english()),
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        self.catalog
    }

    pub fn settings(&self) -> &ExporterSettings {
        &self.settings
    }

    fn context(&self, corpus: &Arc<Corpus>) -> ExtractorContext {
        ExtractorContext {
            corpus: Arc::clone(corpus),
            verbose: self.settings.verbose,
            progress_every: self.settings.progress_every,
            normalizer: Arc::clone(&self.normalizer),
        }
    }

    /// Compute `name` over `edges` and park the matrix in the session.
    ///
    /// ## Cache rule
    /// A session already bound to `name` keeps its extractor, even when the
    /// resolved parameters or the corpus differ (a warning is logged for
    /// parameters). Any other binding is replaced by a freshly built one.
    ///
    /// ## Errors
    /// - `UnknownFeature` for names outside the catalog
    /// - `Config` for invalid parameter overrides
    /// - `ExtractorContract` if the row count differs from `edges.len()`
    /// - construction and extraction errors, unchanged
    pub fn compute_feature(
        &self,
        session: &mut ExtractorSession,
        edges: &[CitationEdge],
        corpus: &Arc<Corpus>,
        name: &str,
        overrides: &ParamOverrides,
    ) -> Result<SessionOutcome> {
        let spec = self.catalog.spec(name)?;
        let params = FeatureParams::resolve(spec.kind, overrides)?;
        session.matrix = None;

        let outcome = match session.bound.as_ref() {
            Some(bound) if bound.kind == spec.kind => {
                if bound.params != params {
                    warn!(
                        "{}: reusing extractor built with {:?}, ignoring {:?}",
                        spec.name(),
                        bound.params,
                        params
                    );
                }
                SessionOutcome::Reused
            }
            _ => SessionOutcome::Constructed,
        };

        if outcome == SessionOutcome::Constructed {
            let extractor = (spec.build)(&self.context(corpus), &params)?;
            let previous = session.bound.replace(BoundExtractor {
                kind: spec.kind,
                params,
                extractor,
            });
            if let Some(previous) = previous {
                debug!("dropped {} extractor", previous.kind);
            }
        }

        let bound = session
            .bound
            .as_mut()
            .ok_or_else(|| CitegraphError::extraction("extractor session is unbound"))?;

        info!("{}: extracting {} edges ({:?})", spec.name(), edges.len(), outcome);
        let extracted = bound.extractor.extract_feature(edges);
        bound.extractor.reset();
        let matrix = extracted?;

        if matrix.nrows() != edges.len() {
            return Err(CitegraphError::ExtractorContract {
                feature: spec.name().to_string(),
                rows: matrix.nrows(),
                edges: edges.len(),
            });
        }

        session.matrix = Some(matrix);
        Ok(outcome)
    }

    /// Write the session's pending matrix under `name`'s schema.
    ///
    /// The matrix leaves the session on success and on schema mismatch.
    pub fn export_to(
        &self,
        session: &mut ExtractorSession,
        filename: &str,
        name: &str,
        overrides: &ParamOverrides,
    ) -> Result<PathBuf> {
        let spec = self.catalog.spec(name)?;
        let params = FeatureParams::resolve(spec.kind, overrides)?;

        if session.matrix.is_none() {
            return Err(CitegraphError::NothingComputed);
        }
        match session.current_feature() {
            Some(kind) if kind == spec.kind => {}
            bound => {
                return Err(CitegraphError::FeatureMismatch {
                    bound: bound.map_or("none", |kind| kind.name()).to_string(),
                    requested: name.to_string(),
                })
            }
        }

        let matrix = session
            .take_matrix()
            .ok_or(CitegraphError::NothingComputed)?;
        if matrix.ncols() != spec.columns.len() {
            return Err(CitegraphError::SchemaMismatch {
                feature: spec.name().to_string(),
                columns: spec.columns.len(),
                width: matrix.ncols(),
            });
        }

        let path = feature_path(&self.settings.output_root, spec, &params, filename);
        write_feature_csv(&path, spec.columns, &matrix)?;
        info!(
            "{}: wrote {} rows to {}",
            spec.name(),
            matrix.nrows(),
            path.display()
        );
        Ok(path)
    }

    /// Compute and export every catalogued feature with default parameters
    pub fn export_all_to(
        &self,
        session: &mut ExtractorSession,
        edges: &[CitationEdge],
        corpus: &Arc<Corpus>,
        filename: &str,
    ) -> Result<Vec<PathBuf>> {
        let defaults = ParamOverrides::new();
        let mut paths = Vec::with_capacity(self.catalog.len());
        for spec in self.catalog.specs() {
            self.compute_feature(session, edges, corpus, spec.name(), &defaults)?;
            paths.push(self.export_to(session, filename, spec.name(), &defaults)?);
        }
        Ok(paths)
    }

    /// Output paths of the requested features, in request order.
    ///
    /// Names outside the catalog are skipped; an empty result is an error.
    pub fn path_list_builder(
        &self,
        filename: &str,
        features: &[&str],
        overrides: &ParamOverrides,
    ) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(features.len());
        for spec in features.iter().filter_map(|name| self.catalog.find(name)) {
            let params = FeatureParams::resolve(spec.kind, overrides)?;
            paths.push(feature_path(
                &self.settings.output_root,
                spec,
                &params,
                filename,
            ));
        }

        if paths.is_empty() {
            return Err(CitegraphError::NoFeaturesSelected {
                valid: self.catalog.names(),
            });
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::feature_export::domain::{FeatureKind, FeatureMatrix};
    use crate::features::feature_export::ports::FeatureExtractor;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Emits `width` columns holding the edge position
    struct PositionExtractor {
        width: usize,
        short_by: usize,
    }

    impl FeatureExtractor for PositionExtractor {
        fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
            let rows = edges.len().saturating_sub(self.short_by);
            Ok(FeatureMatrix::from_shape_fn((rows, self.width), |(i, _)| i as f64))
        }

        fn reset(&mut self) {}
    }

    fn catalog(width: usize, short_by: usize, built: Arc<AtomicUsize>) -> FeatureCatalog {
        let specs = [FeatureKind::Lsa, FeatureKind::Similarity]
            .into_iter()
            .map(|kind| {
                let built = Arc::clone(&built);
                FeatureSpec::new(
                    kind,
                    Arc::new(
                        move |_: &ExtractorContext,
                              _: &FeatureParams|
                              -> Result<Box<dyn FeatureExtractor>> {
                            built.fetch_add(1, Ordering::SeqCst);
                            Ok(Box::new(PositionExtractor { width, short_by }))
                        },
                    ),
                )
            })
            .collect();
        FeatureCatalog::new(specs)
    }

    fn edges(n: usize) -> Vec<CitationEdge> {
        (0..n as i64).map(|i| CitationEdge::unlabeled(i, i + 1)).collect()
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let built = Arc::new(AtomicUsize::new(0));
        let catalog = catalog(1, 0, Arc::clone(&built));
        let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
        let corpus = Arc::new(Corpus::default());
        let mut session = ExtractorSession::new();
        let none = ParamOverrides::new();

        let first = exporter
            .compute_feature(&mut session, &edges(3), &corpus, "lsa", &none)
            .unwrap();
        let second = exporter
            .compute_feature(&mut session, &edges(5), &corpus, "lsa", &none)
            .unwrap();
        assert_eq!(first, SessionOutcome::Constructed);
        assert_eq!(second, SessionOutcome::Reused);
        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert_eq!(session.matrix().unwrap().nrows(), 5);

        let third = exporter
            .compute_feature(&mut session, &edges(2), &corpus, "similarity", &none)
            .unwrap();
        assert_eq!(third, SessionOutcome::Constructed);
        assert_eq!(session.current_feature(), Some(FeatureKind::Similarity));
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unknown_feature_leaves_session_untouched() {
        let catalog = catalog(1, 0, Arc::new(AtomicUsize::new(0)));
        let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
        let mut session = ExtractorSession::new();

        let err = exporter
            .compute_feature(
                &mut session,
                &edges(1),
                &Arc::new(Corpus::default()),
                "journal",
                &ParamOverrides::new(),
            )
            .unwrap_err();
        assert!(matches!(err, CitegraphError::UnknownFeature { .. }));
        assert_eq!(session.current_feature(), None);
    }

    #[test]
    fn test_short_matrix_violates_contract() {
        let catalog = catalog(1, 1, Arc::new(AtomicUsize::new(0)));
        let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
        let mut session = ExtractorSession::new();

        let err = exporter
            .compute_feature(
                &mut session,
                &edges(4),
                &Arc::new(Corpus::default()),
                "lsa",
                &ParamOverrides::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CitegraphError::ExtractorContract { rows: 3, edges: 4, .. }
        ));
        assert!(session.matrix().is_none());
    }

    #[test]
    fn test_export_requires_matching_computed_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(1, 0, Arc::new(AtomicUsize::new(0)));
        let settings = ExporterSettings {
            output_root: dir.path().to_path_buf(),
            ..ExporterSettings::default()
        };
        let exporter = FeatureExporter::with_catalog(&catalog, settings);
        let corpus = Arc::new(Corpus::default());
        let mut session = ExtractorSession::new();
        let none = ParamOverrides::new();

        let err = exporter.export_to(&mut session, "f.csv", "lsa", &none).unwrap_err();
        assert!(matches!(err, CitegraphError::NothingComputed));

        exporter
            .compute_feature(&mut session, &edges(2), &corpus, "lsa", &none)
            .unwrap();
        let err = exporter
            .export_to(&mut session, "f.csv", "similarity", &none)
            .unwrap_err();
        assert!(matches!(err, CitegraphError::FeatureMismatch { .. }));
        assert!(session.matrix().is_some());

        let path = exporter.export_to(&mut session, "f.csv", "lsa", &none).unwrap();
        assert_eq!(path, dir.path().join("lsaFeatures/output/f.csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "lsa_similarity\n0\n1\n"
        );
        assert!(session.matrix().is_none());
        assert_eq!(session.current_feature(), Some(FeatureKind::Lsa));
    }

    #[test]
    fn test_schema_mismatch_discards_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(3, 0, Arc::new(AtomicUsize::new(0)));
        let settings = ExporterSettings {
            output_root: dir.path().to_path_buf(),
            ..ExporterSettings::default()
        };
        let exporter = FeatureExporter::with_catalog(&catalog, settings);
        let mut session = ExtractorSession::new();
        let none = ParamOverrides::new();

        exporter
            .compute_feature(&mut session, &edges(2), &Arc::new(Corpus::default()), "lsa", &none)
            .unwrap();
        let err = exporter.export_to(&mut session, "f.csv", "lsa", &none).unwrap_err();
        assert!(matches!(
            err,
            CitegraphError::SchemaMismatch { columns: 1, width: 3, .. }
        ));
        assert!(session.matrix().is_none());
    }

    #[test]
    fn test_path_list_builder_suffixes() {
        let exporter = FeatureExporter::new(ExporterSettings::default());
        let overrides: ParamOverrides = [("percentile".to_string(), "0.9".to_string())]
            .into_iter()
            .collect();

        let paths = exporter
            .path_list_builder("train.csv", &["similarity", "bogus", "journal"], &overrides)
            .unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from(
                    "preprocessing/abstractToGraphFeatures/output/metric_degrees_percentile_0.9_train.csv"
                ),
                PathBuf::from("preprocessing/journalFeatures/output/train.csv"),
            ]
        );
    }

    #[test]
    fn test_path_list_builder_rejects_empty_selection() {
        let exporter = FeatureExporter::new(ExporterSettings::default());
        let err = exporter
            .path_list_builder("x.csv", &["bogus"], &ParamOverrides::new())
            .unwrap_err();
        assert!(matches!(err, CitegraphError::NoFeaturesSelected { .. }));
    }
}
