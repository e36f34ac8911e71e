//! Citation graph domain models
//!
//! - `ArticleGraph`: directed, one vertex per article, parallel edges kept
//! - `AuthorCitationGraph`: directed, weighted, one edge per ordered author pair
//! - `AuthorCollaborationGraph`: undirected, weighted, one edge per author pair

use ahash::AHashMap;
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::shared::models::ArticleId;

// ============================================================
// Article graph
// ============================================================

/// Directed citation graph over articles.
///
/// Vertex `i` is the `i`-th id of the list the graph was built from; every
/// label-1 record is one edge, duplicates included.
#[derive(Debug, Clone)]
pub struct ArticleGraph {
    pub(crate) graph: DiGraph<ArticleId, ()>,
    pub(crate) id_to_index: AHashMap<ArticleId, NodeIndex>,
}

impl ArticleGraph {
    pub fn graph(&self) -> &DiGraph<ArticleId, ()> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, id: ArticleId) -> Option<NodeIndex> {
        self.id_to_index.get(&id).copied()
    }

    pub fn article_at(&self, index: NodeIndex) -> Option<ArticleId> {
        self.graph.node_weight(index).copied()
    }

    /// Number of `source → target` edges (parallel edges counted)
    pub fn edge_multiplicity(&self, source: ArticleId, target: ArticleId) -> usize {
        match (self.index_of(source), self.index_of(target)) {
            (Some(s), Some(t)) => self
                .graph
                .edges_directed(s, Direction::Outgoing)
                .filter(|edge| edge.target() == t)
                .count(),
            _ => 0,
        }
    }

    /// Edges leaving `index`, parallel edges counted
    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Outgoing).count()
    }

    /// Edges entering `index`, parallel edges counted
    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Incoming).count()
    }
}

// ============================================================
// Author graphs
// ============================================================

/// Author vertex with its aggregate self-citation weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorNode {
    pub name: String,
    pub self_citations: u32,
}

impl AuthorNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            self_citations: 0,
        }
    }
}

/// Directed author → cited-author graph with summed weights
#[derive(Debug, Clone)]
pub struct AuthorCitationGraph {
    pub(crate) graph: DiGraph<AuthorNode, u32>,
    pub(crate) author_to_index: AHashMap<String, NodeIndex>,
}

impl AuthorCitationGraph {
    pub fn graph(&self) -> &DiGraph<AuthorNode, u32> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, author: &str) -> Option<NodeIndex> {
        self.author_to_index.get(author).copied()
    }

    /// Weight of `citing → cited`, if the pair ever occurred
    pub fn weight(&self, citing: &str, cited: &str) -> Option<u32> {
        let edge = self
            .graph
            .find_edge(self.index_of(citing)?, self.index_of(cited)?)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn weight_by_index(&self, citing: NodeIndex, cited: NodeIndex) -> u32 {
        self.graph
            .find_edge(citing, cited)
            .and_then(|edge| self.graph.edge_weight(edge).copied())
            .unwrap_or(0)
    }

    pub fn self_citations(&self, author: &str) -> Option<u32> {
        self.index_of(author)
            .map(|index| self.graph[index].self_citations)
    }
}

/// Undirected co-authorship graph with summed weights
#[derive(Debug, Clone)]
pub struct AuthorCollaborationGraph {
    pub(crate) graph: UnGraph<String, u32>,
    pub(crate) author_to_index: AHashMap<String, NodeIndex>,
}

impl AuthorCollaborationGraph {
    pub fn graph(&self) -> &UnGraph<String, u32> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, author: &str) -> Option<NodeIndex> {
        self.author_to_index.get(author).copied()
    }

    /// Number of articles co-signed by `a` and `b` (order irrelevant)
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let edge = self.graph.find_edge(self.index_of(a)?, self.index_of(b)?)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn weight_by_index(&self, a: NodeIndex, b: NodeIndex) -> u32 {
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge).copied())
            .unwrap_or(0)
    }
}
