//! Common neighbours and Jaccard index in the training article graph

use ahash::AHashSet;
use petgraph::graph::NodeIndex;

use super::in_out::vertex;
use super::training_article_graph;
use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::citation_graph::ArticleGraph;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::CitationEdge;
use crate::shared::ProgressReporter;

/// `[common_neighbors, jaccard]` over undirected neighbour sets
pub struct IntersectionExtractor {
    graph: ArticleGraph,
    neighbors: Vec<AHashSet<NodeIndex>>,
    progress: ProgressReporter,
}

impl IntersectionExtractor {
    pub fn new(context: &ExtractorContext) -> Result<Self> {
        let graph = training_article_graph(context)?;
        let neighbors = graph
            .graph()
            .node_indices()
            .map(|node| graph.graph().neighbors_undirected(node).collect())
            .collect();

        Ok(Self {
            graph,
            neighbors,
            progress: context.progress("intersection features"),
        })
    }
}

impl FeatureExtractor for IntersectionExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let source = &self.neighbors[vertex(&self.graph, edge.source, "source")?.index()];
            let target = &self.neighbors[vertex(&self.graph, edge.target, "target")?.index()];

            let common = source.intersection(target).count();
            let union = source.len() + target.len() - common;
            let jaccard = if union == 0 {
                0.0
            } else {
                common as f64 / union as f64
            };
            rows.push([common as f64, jaccard]);
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(IntersectionExtractor::new(context)?))
}
