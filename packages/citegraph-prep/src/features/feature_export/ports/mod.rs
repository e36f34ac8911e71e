//! Feature Extractor Port
//!
//! Contract between the exporter and the individual feature computations:
//!
//! ```text
//! FeatureExporter ──compute_feature──▶ dyn FeatureExtractor
//!                                        ├─ extract_feature(edges) → rows × columns
//!                                        └─ reset()
//! ```
//!
//! Extractors may fit models or build graphs at construction time; a
//! constructed extractor is reused across calls for the same feature name.

use std::sync::Arc;

use crate::errors::Result;
use crate::features::feature_export::domain::FeatureMatrix;
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::{ProgressReporter, TextNormalizer};

/// A single feature computation bound to a corpus
pub trait FeatureExtractor: Send {
    /// One row per edge, in input order, one column per declared schema entry
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix>;

    /// Drop per-call state (memoised pair values). Fitted models survive.
    fn reset(&mut self);
}

/// Construction context handed to extractor factories
#[derive(Clone)]
pub struct ExtractorContext {
    pub corpus: Arc<Corpus>,
    pub verbose: bool,
    pub progress_every: usize,
    pub normalizer: Arc<TextNormalizer>,
}

impl ExtractorContext {
    pub fn new(corpus: Arc<Corpus>, normalizer: Arc<TextNormalizer>) -> Self {
        Self {
            corpus,
            verbose: false,
            progress_every: 10_000,
            normalizer,
        }
    }

    /// Progress reporter honouring the verbosity settings
    pub fn progress(&self, label: &'static str) -> ProgressReporter {
        ProgressReporter::new(label, self.verbose, self.progress_every)
    }
}

impl std::fmt::Debug for ExtractorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorContext")
            .field("articles", &self.corpus.articles.len())
            .field("training", &self.corpus.training.len())
            .field("verbose", &self.verbose)
            .field("progress_every", &self.progress_every)
            .finish()
    }
}
