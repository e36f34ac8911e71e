//! Author citation graph builder

use std::collections::BTreeMap;
use tracing::debug;

use super::author_vertices::author_vertices;
use super::simplify::combine_parallel_edges;
use crate::errors::Result;
use crate::features::citation_graph::domain::{AuthorCitationGraph, AuthorNode};
use crate::shared::models::{ArticleTable, CitationEdge};
use crate::shared::ProgressReporter;

/// Builds the directed, weighted author → cited-author graph.
///
/// ## Algorithm
/// For every label-1 record, each (source author, target author) pair of
/// the cross product either bumps the author's self-citation weight (same
/// author) or adds a unit edge. Parallel edges are summed afterwards.
///
/// Cost: O(citations × avg source authors × avg target authors).
#[derive(Debug, Clone)]
pub struct AuthorCitationGraphBuilder {
    progress: ProgressReporter,
}

impl AuthorCitationGraphBuilder {
    pub fn new() -> Self {
        Self {
            progress: ProgressReporter::silent("author citation graph"),
        }
    }

    /// Log progress every `every` records
    pub fn with_progress(mut self, every: usize) -> Self {
        self.progress = ProgressReporter::new("author citation graph", true, every);
        self
    }

    pub fn build(
        &self,
        citations: &[CitationEdge],
        articles: &ArticleTable,
    ) -> Result<AuthorCitationGraph> {
        let mut vertices = author_vertices(articles, |name| AuthorNode::new(name));
        let mut unit_edges = 0usize;

        for (position, edge) in citations.iter().enumerate() {
            self.progress.tick(position, citations.len());
            if !edge.is_citation() {
                continue;
            }
            let (source, target) = articles.resolve_edge(edge)?;
            for &citing in &vertices.per_article[source] {
                for &cited in &vertices.per_article[target] {
                    if citing == cited {
                        vertices.graph[citing].self_citations += 1;
                    } else {
                        vertices.graph.add_edge(citing, cited, 1);
                        unit_edges += 1;
                    }
                }
            }
        }

        let graph = combine_parallel_edges(vertices.graph);
        debug!(
            "author citation graph: {} authors, {} unit edges combined into {}",
            graph.node_count(),
            unit_edges,
            graph.edge_count()
        );

        Ok(AuthorCitationGraph {
            graph,
            author_to_index: vertices.author_to_index,
        })
    }
}

impl Default for AuthorCitationGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw `(citing author, cited author) → count` tally over label-1 records.
///
/// Same cross product as the graph builder, but self pairs are kept as
/// ordinary entries.
pub fn author_citation_counts(
    citations: &[CitationEdge],
    articles: &ArticleTable,
) -> Result<BTreeMap<(String, String), u32>> {
    let mut counts = BTreeMap::new();
    for edge in citations.iter().filter(|edge| edge.is_citation()) {
        let (source, target) = articles.resolve_edge(edge)?;
        let source_authors = &articles.articles()[source].authors;
        let target_authors = &articles.articles()[target].authors;
        for citing in source_authors {
            for cited in target_authors {
                *counts.entry((citing.clone(), cited.clone())).or_insert(0) += 1;
            }
        }
    }
    Ok(counts)
}
