//! Abstract similarity graph scores
//!
//! Abstracts are TF-IDF vectorised (terms in more than half of the
//! documents dropped). Article pairs whose cosine similarity reaches the
//! `percentile` quantile of all positive pair similarities are linked in an
//! undirected graph; each endpoint is then scored by degree or PageRank.

use ahash::AHashMap;
use petgraph::graph::UnGraph;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use super::pagerank::PageRankEngine;
use super::text_model::SparseVector;
use super::tfidf::field_vectors;
use crate::config::{FeatureParams, SimilarityMetric, SimilarityParams};
use crate::errors::Result;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::ProgressReporter;

/// Documents containing a term more often than this fraction are ignored
pub const MAX_DOCUMENT_FREQUENCY: f64 = 0.5;

/// Positive cosine similarities `(i, j, sim)` with `i < j`, ordered by `i` then `j`
pub fn pairwise_similarities(vectors: &[SparseVector]) -> Vec<(usize, usize, f64)> {
    let mut postings: AHashMap<usize, Vec<(usize, f64)>> = AHashMap::new();
    for (doc, vector) in vectors.iter().enumerate() {
        for &(term, weight) in vector {
            postings.entry(term).or_default().push((doc, weight));
        }
    }

    (0..vectors.len())
        .into_par_iter()
        .map(|i| {
            let mut dots: AHashMap<usize, f64> = AHashMap::new();
            for &(term, weight) in &vectors[i] {
                for &(j, other) in postings.get(&term).map(Vec::as_slice).unwrap_or(&[]) {
                    if j > i {
                        *dots.entry(j).or_insert(0.0) += weight * other;
                    }
                }
            }
            let mut pairs: Vec<(usize, usize, f64)> = dots
                .into_iter()
                .filter(|(_, sim)| *sim > 0.0)
                .map(|(j, sim)| (i, j, sim))
                .collect();
            pairs.sort_by_key(|&(_, j, _)| j);
            pairs
        })
        .flatten()
        .collect()
}

/// Quantile with linear interpolation between closest ranks.
///
/// `None` for an empty sample.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Undirected graph over article rows linking pairs at or above the threshold
pub fn similarity_graph(
    documents: usize,
    pairs: &[(usize, usize, f64)],
    percentile: f64,
) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(documents, 0);
    let nodes: Vec<_> = (0..documents).map(|_| graph.add_node(())).collect();

    let similarities: Vec<f64> = pairs.iter().map(|&(_, _, sim)| sim).collect();
    if let Some(threshold) = quantile(&similarities, percentile) {
        for &(i, j, sim) in pairs {
            if sim >= threshold {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
        debug!(
            "similarity graph: threshold {:.4}, {} of {} pairs kept",
            threshold,
            graph.edge_count(),
            pairs.len()
        );
    }
    graph
}

/// `[source_similarity, target_similarity]`
pub struct SimilarityExtractor {
    corpus: Arc<Corpus>,
    scores: Vec<f64>,
    progress: ProgressReporter,
}

impl SimilarityExtractor {
    pub fn new(context: &ExtractorContext, params: SimilarityParams) -> Self {
        let abstracts: Vec<&str> = context
            .corpus
            .articles
            .articles()
            .iter()
            .map(|article| article.abstract_text.as_str())
            .collect();
        let (_, vectors) =
            field_vectors(&context.normalizer, &abstracts, Some(MAX_DOCUMENT_FREQUENCY));

        let pairs = pairwise_similarities(&vectors);
        let graph = similarity_graph(vectors.len(), &pairs, params.percentile);
        let scores = match params.metric {
            SimilarityMetric::Degrees => graph
                .node_indices()
                .map(|node| graph.neighbors(node).count() as f64)
                .collect(),
            SimilarityMetric::Pagerank => PageRankEngine::default().compute(&graph),
        };
        info!(
            "similarity graph: {} articles, {} edges, metric {}, percentile {}",
            graph.node_count(),
            graph.edge_count(),
            params.metric,
            params.percentile
        );

        Self {
            corpus: Arc::clone(&context.corpus),
            scores,
            progress: context.progress("similarity features"),
        }
    }
}

impl FeatureExtractor for SimilarityExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = self.corpus.articles.resolve_edge(edge)?;
            rows.push([self.scores[s], self.scores[t]]);
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    let params = params.as_similarity().copied().unwrap_or_default();
    Ok(Box::new(SimilarityExtractor::new(context, params)))
}
