//! Article citation graph builder

use ahash::AHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::errors::{CitegraphError, Result};
use crate::features::citation_graph::domain::ArticleGraph;
use crate::shared::models::{ArticleId, ArticleTable, CitationEdge};
use crate::shared::ProgressReporter;

/// Builds the directed article graph from labeled citation records.
///
/// ## Semantics
/// - One vertex per article id, index = position in the id list
/// - One edge per label-1 record, in input order
/// - Parallel edges are NOT merged (unlike the author graphs)
#[derive(Debug, Clone)]
pub struct ArticleGraphBuilder {
    progress: ProgressReporter,
}

impl ArticleGraphBuilder {
    pub fn new() -> Self {
        Self {
            progress: ProgressReporter::silent("article graph"),
        }
    }

    /// Log progress every `every` records
    pub fn with_progress(mut self, every: usize) -> Self {
        self.progress = ProgressReporter::new("article graph", true, every);
        self
    }

    /// Build from an explicit id list.
    ///
    /// ## Errors
    /// - `DuplicateArticle` if the id list repeats an id
    /// - `UnknownArticle` if a label-1 record references an id not in the list
    pub fn build(
        &self,
        citations: &[CitationEdge],
        article_ids: &[ArticleId],
    ) -> Result<ArticleGraph> {
        let mut graph = DiGraph::with_capacity(article_ids.len(), citations.len());
        let mut id_to_index = AHashMap::with_capacity(article_ids.len());

        for &id in article_ids {
            let index = graph.add_node(id);
            if id_to_index.insert(id, index).is_some() {
                return Err(CitegraphError::DuplicateArticle(id));
            }
        }

        let lookup = |id: ArticleId, role: &'static str| -> Result<NodeIndex> {
            id_to_index
                .get(&id)
                .copied()
                .ok_or(CitegraphError::UnknownArticle { id, role })
        };

        for (position, edge) in citations.iter().enumerate() {
            self.progress.tick(position, citations.len());
            if !edge.is_citation() {
                continue;
            }
            let source = lookup(edge.source, "source")?;
            let target = lookup(edge.target, "target")?;
            graph.add_edge(source, target, ());
        }

        debug!(
            "article graph: {} vertices, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(ArticleGraph { graph, id_to_index })
    }

    /// Build over every article of the table, in table order
    pub fn build_from_table(
        &self,
        citations: &[CitationEdge],
        articles: &ArticleTable,
    ) -> Result<ArticleGraph> {
        self.build(citations, &articles.ids())
    }
}

impl Default for ArticleGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_label_one_becomes_edge() {
        let citations = vec![
            CitationEdge::cited(1, 2),
            CitationEdge::not_cited(2, 3),
            CitationEdge::unlabeled(3, 1),
        ];
        let graph = ArticleGraphBuilder::new().build(&citations, &[1, 2, 3]).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_multiplicity(1, 2), 1);
    }

    #[test]
    fn test_duplicate_records_stay_parallel() {
        let citations = vec![CitationEdge::cited(1, 2), CitationEdge::cited(1, 2)];
        let graph = ArticleGraphBuilder::new().build(&citations, &[1, 2]).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_multiplicity(1, 2), 2);
        assert_eq!(graph.out_degree(graph.index_of(1).unwrap()), 2);
        assert_eq!(graph.in_degree(graph.index_of(2).unwrap()), 2);
    }

    #[test]
    fn test_index_follows_id_list_order() {
        let graph = ArticleGraphBuilder::new().build(&[], &[42, 7, 19]).unwrap();
        assert_eq!(graph.index_of(42), Some(NodeIndex::new(0)));
        assert_eq!(graph.index_of(7), Some(NodeIndex::new(1)));
        assert_eq!(graph.index_of(19), Some(NodeIndex::new(2)));
        assert_eq!(graph.article_at(NodeIndex::new(2)), Some(19));
    }

    #[test]
    fn test_dangling_reference_fails() {
        let err = ArticleGraphBuilder::new()
            .build(&[CitationEdge::cited(1, 99)], &[1, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            CitegraphError::UnknownArticle {
                id: 99,
                role: "target"
            }
        ));
    }

    #[test]
    fn test_duplicate_id_fails() {
        let err = ArticleGraphBuilder::new().build(&[], &[1, 1]).unwrap_err();
        assert!(matches!(err, CitegraphError::DuplicateArticle(1)));
    }
}
