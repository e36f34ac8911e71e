//! PageRank of both endpoints in the training article graph

use tracing::debug;

use super::in_out::vertex;
use super::pagerank::PageRankEngine;
use super::training_article_graph;
use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::citation_graph::ArticleGraph;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::CitationEdge;
use crate::shared::ProgressReporter;

/// `[source_pagerank, target_pagerank]`
pub struct GraphArticleExtractor {
    graph: ArticleGraph,
    scores: Vec<f64>,
    progress: ProgressReporter,
}

impl GraphArticleExtractor {
    pub fn new(context: &ExtractorContext) -> Result<Self> {
        let graph = training_article_graph(context)?;
        let scores = PageRankEngine::default().compute(graph.graph());
        debug!("article PageRank over {} vertices", scores.len());
        Ok(Self {
            graph,
            scores,
            progress: context.progress("article PageRank features"),
        })
    }
}

impl FeatureExtractor for GraphArticleExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let source = vertex(&self.graph, edge.source, "source")?;
            let target = vertex(&self.graph, edge.target, "target")?;
            rows.push([self.scores[source.index()], self.scores[target.index()]]);
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(GraphArticleExtractor::new(context)?))
}
