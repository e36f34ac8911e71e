//! Feature export domain: the closed set of feature kinds and their specs

use ndarray::Array2;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::config::FeatureParams;
use crate::features::feature_export::ports::{ExtractorContext, FeatureExtractor};
use crate::errors::Result;

/// Numeric feature matrix: one row per edge, one column per schema entry
pub type FeatureMatrix = Array2<f64>;

/// Stack fixed-width rows into a matrix
pub fn matrix_from_rows<const K: usize>(rows: Vec<[f64; K]>) -> FeatureMatrix {
    Array2::from(rows)
}

// ============================================================
// Feature kinds
// ============================================================

/// Every feature the exporter knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FeatureKind {
    Original,
    Lsa,
    Journal,
    InOutDegree,
    Similarity,
    Intersection,
    GraphArticle,
    Tfidf,
    GraphAuthors,
}

impl FeatureKind {
    /// Catalog order
    pub const ALL: [FeatureKind; 9] = [
        Self::Original,
        Self::Lsa,
        Self::Journal,
        Self::InOutDegree,
        Self::Similarity,
        Self::Intersection,
        Self::GraphArticle,
        Self::Tfidf,
        Self::GraphAuthors,
    ];

    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Lsa => "lsa",
            Self::Journal => "journal",
            Self::InOutDegree => "inOutDegree",
            Self::Similarity => "similarity",
            Self::Intersection => "intersection",
            Self::GraphArticle => "graphArticle",
            Self::Tfidf => "tfidf",
            Self::GraphAuthors => "graphAuthors",
        }
    }

    /// Output directory under the output root
    pub fn path_template(&self) -> &'static str {
        match self {
            Self::Original => "originalFeatures",
            Self::Lsa => "lsaFeatures",
            Self::Journal => "journalFeatures",
            Self::InOutDegree => "inOutFeatures",
            Self::Similarity => "abstractToGraphFeatures",
            Self::Intersection => "intersectionFeatures",
            Self::GraphArticle => "graphArticleFeatures",
            Self::Tfidf => "tfidfFeatures",
            Self::GraphAuthors => "graphAuthorsFeatures",
        }
    }

    /// Declared column schema
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Original => &["overlap_title", "temp_diff", "comm_auth"],
            Self::Lsa => &["lsa_similarity"],
            Self::Journal => &["same_journal", "journal_link_rate"],
            Self::InOutDegree => &[
                "source_outdegree",
                "source_indegree",
                "target_outdegree",
                "target_indegree",
            ],
            Self::Similarity => &["source_similarity", "target_similarity"],
            Self::Intersection => &["common_neighbors", "jaccard"],
            Self::GraphArticle => &["source_pagerank", "target_pagerank"],
            Self::Tfidf => &["tfidf_title", "tfidf_abstract"],
            Self::GraphAuthors => &[
                "author_citations",
                "author_self_citations",
                "author_collaborations",
            ],
        }
    }

    /// Parameter keys encoded into output paths
    pub fn param_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Similarity => crate::config::SimilarityParams::KEYS,
            _ => &[],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// All registry names in catalog order
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.name().to_string()).collect()
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================
// Feature spec
// ============================================================

/// Constructor capability of a feature kind
pub type ExtractorFactory =
    Arc<dyn Fn(&ExtractorContext, &FeatureParams) -> Result<Box<dyn FeatureExtractor>> + Send + Sync>;

/// Catalog entry: schema, output template, defaults and constructor
#[derive(Clone)]
pub struct FeatureSpec {
    pub kind: FeatureKind,
    pub columns: &'static [&'static str],
    pub path_template: &'static str,
    pub defaults: FeatureParams,
    pub build: ExtractorFactory,
}

impl FeatureSpec {
    /// Spec with the kind's declared schema, template and defaults
    pub fn new(kind: FeatureKind, build: ExtractorFactory) -> Self {
        Self {
            kind,
            columns: kind.columns(),
            path_template: kind.path_template(),
            defaults: FeatureParams::defaults(kind),
            build,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Debug for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSpec")
            .field("kind", &self.kind)
            .field("columns", &self.columns)
            .field("path_template", &self.path_template)
            .field("defaults", &self.defaults)
            .finish()
    }
}
