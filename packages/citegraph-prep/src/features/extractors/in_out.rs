//! In/out degrees in the training article graph

use petgraph::graph::NodeIndex;

use super::training_article_graph;
use crate::config::FeatureParams;
use crate::errors::{CitegraphError, Result};
use crate::features::citation_graph::ArticleGraph;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{ArticleId, CitationEdge};
use crate::shared::ProgressReporter;

/// Graph vertex of an edge endpoint, or a dangling-reference error
pub(crate) fn vertex(graph: &ArticleGraph, id: ArticleId, role: &'static str) -> Result<NodeIndex> {
    graph
        .index_of(id)
        .ok_or(CitegraphError::UnknownArticle { id, role })
}

/// `[source_outdegree, source_indegree, target_outdegree, target_indegree]`.
///
/// Parallel citation records count once each.
pub struct InOutDegreeExtractor {
    graph: ArticleGraph,
    progress: ProgressReporter,
}

impl InOutDegreeExtractor {
    pub fn new(context: &ExtractorContext) -> Result<Self> {
        Ok(Self {
            graph: training_article_graph(context)?,
            progress: context.progress("in/out degree features"),
        })
    }
}

impl FeatureExtractor for InOutDegreeExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let source = vertex(&self.graph, edge.source, "source")?;
            let target = vertex(&self.graph, edge.target, "target")?;
            rows.push([
                self.graph.out_degree(source) as f64,
                self.graph.in_degree(source) as f64,
                self.graph.out_degree(target) as f64,
                self.graph.in_degree(target) as f64,
            ]);
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(InOutDegreeExtractor::new(context)?))
}
