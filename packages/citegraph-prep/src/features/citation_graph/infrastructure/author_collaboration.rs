//! Author collaboration graph builder

use ahash::AHashSet;
use petgraph::Undirected;
use tracing::debug;

use super::author_vertices::author_vertices;
use super::simplify::combine_parallel_edges;
use crate::features::citation_graph::domain::AuthorCollaborationGraph;
use crate::shared::models::ArticleTable;

/// Builds the undirected co-authorship graph.
///
/// Every article with `k` distinct authors contributes one unit edge per
/// unordered pair (C(k,2) edges); edges are then summed across the corpus.
/// Citation records play no part.
#[derive(Debug, Clone, Default)]
pub struct AuthorCollaborationGraphBuilder;

impl AuthorCollaborationGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, articles: &ArticleTable) -> AuthorCollaborationGraph {
        let mut vertices =
            author_vertices::<String, Undirected>(articles, |name| name.to_string());
        let mut unit_edges = 0usize;

        for authors in &vertices.per_article {
            // A name listed twice on one article counts once
            let mut seen = AHashSet::with_capacity(authors.len());
            let distinct: Vec<_> = authors.iter().filter(|a| seen.insert(**a)).collect();

            for (i, &a) in distinct.iter().enumerate() {
                for &b in &distinct[i + 1..] {
                    vertices.graph.add_edge(*a, *b, 1);
                    unit_edges += 1;
                }
            }
        }

        let graph = combine_parallel_edges(vertices.graph);
        debug!(
            "author collaboration graph: {} authors, {} unit edges combined into {}",
            graph.node_count(),
            unit_edges,
            graph.edge_count()
        );

        AuthorCollaborationGraph {
            graph,
            author_to_index: vertices.author_to_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Article;

    #[test]
    fn test_pairs_summed_across_articles() {
        let table = ArticleTable::new(vec![
            Article::new(1, 2000, "a").with_authors(["Smith", "Jones", "Lee"]),
            Article::new(2, 2001, "b").with_authors(["Jones", "Smith"]),
            Article::new(3, 2002, "c").with_authors(["Lee"]),
        ])
        .unwrap();

        let graph = AuthorCollaborationGraphBuilder::new().build(&table);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weight("Smith", "Jones"), Some(2));
        assert_eq!(graph.weight("Jones", "Smith"), Some(2));
        assert_eq!(graph.weight("Smith", "Lee"), Some(1));
        assert_eq!(graph.weight("Jones", "Lee"), Some(1));
    }

    #[test]
    fn test_single_author_articles_add_no_edges() {
        let table = ArticleTable::new(vec![
            Article::new(1, 2000, "a").with_authors(["Smith"]),
            Article::new(2, 2000, "b"),
        ])
        .unwrap();
        let graph = AuthorCollaborationGraphBuilder::new().build(&table);
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_repeated_name_counts_once() {
        let table = ArticleTable::new(vec![
            Article::new(1, 2000, "a").with_authors(["Smith", "Jones", "Smith"])
        ])
        .unwrap();
        let graph = AuthorCollaborationGraphBuilder::new().build(&table);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("Smith", "Jones"), Some(1));
        assert_eq!(graph.weight("Smith", "Smith"), None);
    }
}
