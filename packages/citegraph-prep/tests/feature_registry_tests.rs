//! Feature registry behaviour: session caching, paths and full exports

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use citegraph_prep::config::{FeatureParams, ParamOverrides};
use citegraph_prep::features::feature_export::{
    ExtractorContext, FeatureExtractor, FeatureSpec,
};
use citegraph_prep::{
    Article, ArticleTable, CitationEdge, CitegraphError, Corpus, ExporterSettings,
    ExtractorSession, FeatureCatalog, FeatureExporter, FeatureKind, FeatureMatrix,
    SessionOutcome,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Test doubles
// ============================================================================

/// Counts constructions, extractions and resets
#[derive(Default)]
struct Counters {
    built: AtomicUsize,
    extracted: AtomicUsize,
    resets: AtomicUsize,
}

struct CountingExtractor {
    counters: Arc<Counters>,
    width: usize,
}

impl FeatureExtractor for CountingExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> citegraph_prep::Result<FeatureMatrix> {
        self.counters.extracted.fetch_add(1, Ordering::SeqCst);
        Ok(FeatureMatrix::from_shape_fn((edges.len(), self.width), |(i, j)| {
            (edges[i].source + j as i64) as f64
        }))
    }

    fn reset(&mut self) {
        self.counters.resets.fetch_add(1, Ordering::SeqCst);
    }
}

fn counting_catalog(counters: &Arc<Counters>) -> FeatureCatalog {
    FeatureCatalog::new(
        FeatureKind::ALL
            .into_iter()
            .map(|kind| {
                let counters = Arc::clone(counters);
                FeatureSpec::new(
                    kind,
                    Arc::new(
                        move |_: &ExtractorContext,
                              _: &FeatureParams|
                              -> citegraph_prep::Result<Box<dyn FeatureExtractor>> {
                            counters.built.fetch_add(1, Ordering::SeqCst);
                            Ok(Box::new(CountingExtractor {
                                counters: Arc::clone(&counters),
                                width: kind.columns().len(),
                            }))
                        },
                    ),
                )
            })
            .collect(),
    )
}

fn overrides(pairs: &[(&str, &str)]) -> ParamOverrides {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn corpus() -> Arc<Corpus> {
    let table = ArticleTable::new(vec![
        Article::new(1, 1999, "Black hole entropy from string theory")
            .with_authors(["Smith"])
            .with_journal("Phys.Lett.")
            .with_abstract("We compute the entropy of extremal black holes from D-brane states"),
        Article::new(2, 2000, "D-brane states and black hole microstates")
            .with_authors(["Smith", "Jones"])
            .with_journal("Phys.Lett.")
            .with_abstract("Counting D-brane bound states reproduces black hole entropy"),
        Article::new(3, 2001, "Lattice gauge theory at finite temperature")
            .with_authors(["Jones"])
            .with_journal("Nucl.Phys.")
            .with_abstract("Monte Carlo simulations of the deconfinement transition"),
        Article::new(4, 2001, "Neutrino masses in grand unified theories")
            .with_abstract("Seesaw mechanism and neutrino oscillation data"),
    ])
    .unwrap();
    let training = vec![
        CitationEdge::cited(2, 1),
        CitationEdge::cited(3, 2),
        CitationEdge::not_cited(4, 1),
        CitationEdge::cited(4, 3),
    ];
    Arc::new(Corpus::new(table, training))
}

// ============================================================================
// Session cache
// ============================================================================

#[test]
fn test_same_name_reuses_extractor() {
    let counters = Arc::new(Counters::default());
    let catalog = counting_catalog(&counters);
    let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
    let corpus = corpus();
    let mut session = ExtractorSession::new();
    let none = ParamOverrides::new();

    let batch_a = vec![CitationEdge::unlabeled(1, 2)];
    let batch_b = vec![CitationEdge::unlabeled(2, 3), CitationEdge::unlabeled(3, 4)];

    let outcomes = [
        exporter
            .compute_feature(&mut session, &batch_a, &corpus, "tfidf", &none)
            .unwrap(),
        exporter
            .compute_feature(&mut session, &batch_b, &corpus, "tfidf", &none)
            .unwrap(),
    ];
    assert_eq!(outcomes, [SessionOutcome::Constructed, SessionOutcome::Reused]);
    assert_eq!(counters.built.load(Ordering::SeqCst), 1);
    assert_eq!(counters.extracted.load(Ordering::SeqCst), 2);
    assert_eq!(counters.resets.load(Ordering::SeqCst), 2);
    assert_eq!(session.matrix().unwrap().nrows(), 2);
}

#[test]
fn test_different_name_rebuilds() {
    let counters = Arc::new(Counters::default());
    let catalog = counting_catalog(&counters);
    let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
    let corpus = corpus();
    let mut session = ExtractorSession::new();
    let edges = vec![CitationEdge::unlabeled(1, 2)];
    let none = ParamOverrides::new();

    for name in ["lsa", "journal", "lsa"] {
        let outcome = exporter
            .compute_feature(&mut session, &edges, &corpus, name, &none)
            .unwrap();
        assert_eq!(outcome, SessionOutcome::Constructed);
    }
    assert_eq!(counters.built.load(Ordering::SeqCst), 3);
    assert_eq!(session.current_feature(), Some(FeatureKind::Lsa));
}

#[test]
fn test_param_change_on_same_name_still_reuses() {
    let counters = Arc::new(Counters::default());
    let catalog = counting_catalog(&counters);
    let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
    let corpus = corpus();
    let mut session = ExtractorSession::new();
    let edges = vec![CitationEdge::unlabeled(1, 2)];

    exporter
        .compute_feature(&mut session, &edges, &corpus, "similarity", &ParamOverrides::new())
        .unwrap();
    let outcome = exporter
        .compute_feature(
            &mut session,
            &edges,
            &corpus,
            "similarity",
            &overrides(&[("metric", "pagerank")]),
        )
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Reused);
    assert_eq!(counters.built.load(Ordering::SeqCst), 1);
    let bound = session.current_params().unwrap().as_similarity().unwrap();
    assert_eq!(bound.metric.as_str(), "degrees");
}

#[test]
fn test_invalid_params_fail_before_construction() {
    let counters = Arc::new(Counters::default());
    let catalog = counting_catalog(&counters);
    let exporter = FeatureExporter::with_catalog(&catalog, ExporterSettings::default());
    let mut session = ExtractorSession::new();

    let err = exporter
        .compute_feature(
            &mut session,
            &[],
            &corpus(),
            "similarity",
            &overrides(&[("percentile", "2")]),
        )
        .unwrap_err();
    assert!(matches!(err, CitegraphError::Config(_)));
    assert_eq!(counters.built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_feature_names_catalog() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let mut session = ExtractorSession::new();
    let err = exporter
        .compute_feature(&mut session, &[], &corpus(), "pagerank", &ParamOverrides::new())
        .unwrap_err();

    let msg = err.to_string();
    for name in FeatureKind::names() {
        assert!(msg.contains(&name), "{msg} should list {name}");
    }
}

// ============================================================================
// Paths
// ============================================================================

#[test]
fn test_paths_are_deterministic() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let params = overrides(&[("percentile", "0.9"), ("metric", "pagerank")]);

    let first = exporter
        .path_list_builder("train.csv", &["similarity"], &params)
        .unwrap();
    let second = exporter
        .path_list_builder("train.csv", &["similarity"], &params)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![PathBuf::from(
            "preprocessing/abstractToGraphFeatures/output/metric_pagerank_percentile_0.9_train.csv"
        )]
    );
}

#[test]
fn test_distinct_params_give_distinct_paths() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let mut seen = BTreeMap::new();
    for metric in ["degrees", "pagerank"] {
        for percentile in ["0", "0.5", "0.9", "0.95", "1"] {
            let paths = exporter
                .path_list_builder(
                    "x.csv",
                    &["similarity"],
                    &overrides(&[("metric", metric), ("percentile", percentile)]),
                )
                .unwrap();
            let previous = seen.insert(paths[0].clone(), (metric, percentile));
            assert_eq!(previous, None, "collision on {:?}", paths[0]);
        }
    }
}

#[test]
fn test_explicit_default_matches_implicit() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let implicit = exporter
        .path_list_builder("x.csv", &["similarity"], &ParamOverrides::new())
        .unwrap();
    let explicit = exporter
        .path_list_builder(
            "x.csv",
            &["similarity"],
            &overrides(&[("metric", "degrees"), ("percentile", "0.95")]),
        )
        .unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn test_params_ignored_for_parameterless_features() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let paths = exporter
        .path_list_builder(
            "x.csv",
            &["original", "graphAuthors"],
            &overrides(&[("metric", "pagerank")]),
        )
        .unwrap();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("preprocessing/originalFeatures/output/x.csv"),
            PathBuf::from("preprocessing/graphAuthorsFeatures/output/x.csv"),
        ]
    );
}

#[test]
fn test_empty_selection_fails() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    for features in [&[][..], &["nope", "alsoNope"][..]] {
        let err = exporter
            .path_list_builder("x.csv", features, &ParamOverrides::new())
            .unwrap_err();
        assert!(matches!(err, CitegraphError::NoFeaturesSelected { .. }));
    }
}

// ============================================================================
// Full export with the production extractors
// ============================================================================

#[test]
fn test_export_all_writes_every_feature() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = FeatureExporter::new(ExporterSettings {
        output_root: dir.path().to_path_buf(),
        ..ExporterSettings::default()
    });
    let corpus = corpus();
    let edges = vec![
        CitationEdge::unlabeled(2, 1),
        CitationEdge::unlabeled(4, 3),
        CitationEdge::unlabeled(1, 4),
    ];
    let mut session = ExtractorSession::new();

    let paths = exporter
        .export_all_to(&mut session, &edges, &corpus, "batch.csv")
        .unwrap();
    assert_eq!(paths.len(), 9);
    assert!(session.matrix().is_none());
    assert_eq!(session.current_feature(), Some(FeatureKind::GraphAuthors));

    for (kind, path) in FeatureKind::ALL.iter().zip(&paths) {
        assert!(path.starts_with(dir.path().join(kind.path_template())));
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, kind.columns().to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), edges.len(), "{}", kind);
        for row in rows {
            for value in row.iter() {
                assert!(value.parse::<f64>().unwrap().is_finite(), "{kind}: {value}");
            }
        }
    }
}

#[test]
fn test_export_uses_parameterised_path() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = FeatureExporter::new(ExporterSettings {
        output_root: dir.path().to_path_buf(),
        ..ExporterSettings::default()
    });
    let corpus = corpus();
    let edges = vec![CitationEdge::unlabeled(1, 2)];
    let params = overrides(&[("metric", "pagerank"), ("percentile", "0.5")]);
    let mut session = ExtractorSession::new();

    exporter
        .compute_feature(&mut session, &edges, &corpus, "similarity", &params)
        .unwrap();
    let path = exporter
        .export_to(&mut session, "pairs.csv", "similarity", &params)
        .unwrap();

    assert_eq!(
        path,
        dir.path()
            .join("abstractToGraphFeatures/output/metric_pagerank_percentile_0.5_pairs.csv")
    );
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("source_similarity,target_similarity\n"));

    let err = exporter
        .export_to(&mut session, "pairs.csv", "similarity", &params)
        .unwrap_err();
    assert!(matches!(err, CitegraphError::NothingComputed));
}

#[test]
fn test_dangling_edge_propagates_from_extractor() {
    let exporter = FeatureExporter::new(ExporterSettings::default());
    let mut session = ExtractorSession::new();
    let err = exporter
        .compute_feature(
            &mut session,
            &[CitationEdge::unlabeled(1, 99)],
            &corpus(),
            "original",
            &ParamOverrides::new(),
        )
        .unwrap_err();
    assert!(matches!(err, CitegraphError::UnknownArticle { id: 99, .. }));
    assert!(session.matrix().is_none());
}

#[test]
fn test_production_extractors_are_stable_across_reset() {
    let corpus = corpus();
    let context = ExtractorContext::new(
        Arc::clone(&corpus),
        Arc::new(citegraph_prep::shared::TextNormalizer::english()),
    );
    let edges = vec![
        CitationEdge::unlabeled(2, 1),
        CitationEdge::unlabeled(4, 3),
        CitationEdge::unlabeled(1, 4),
    ];

    for spec in FeatureCatalog::global().specs() {
        let mut extractor = (spec.build)(&context, &spec.defaults).unwrap();
        let first = extractor.extract_feature(&edges).unwrap();
        extractor.reset();
        extractor.reset();
        let second = extractor.extract_feature(&edges).unwrap();

        assert_eq!(first.dim(), (edges.len(), spec.columns.len()), "{}", spec.kind);
        assert_eq!(first, second, "{}", spec.kind);
    }
}
