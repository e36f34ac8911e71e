//! Citation Graph - articles and authors as petgraph graphs
//!
//! ## Graphs
//! - **ArticleGraph**: directed citations between articles, parallel edges kept
//! - **AuthorCitationGraph**: directed author → cited author, weights summed,
//!   per-author self-citation counts
//! - **AuthorCollaborationGraph**: undirected co-authorship, weights summed
//!
//! ## Architecture
//! - Domain: graph types and read accessors
//! - Infrastructure: one builder per graph + the parallel-edge combiner
//! - Application: `CitationGraphSet` building all three from a corpus
//!
//! The article graph keeps duplicate records as parallel edges while both
//! author graphs sum them. Extractors read degrees off the article graph and
//! weights off the author graphs, so the two conventions must stay as they are.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::CitationGraphSet;
pub use domain::{ArticleGraph, AuthorCitationGraph, AuthorCollaborationGraph, AuthorNode};
pub use infrastructure::{
    author_citation_counts, combine_parallel_edges, ArticleGraphBuilder,
    AuthorCitationGraphBuilder, AuthorCollaborationGraphBuilder,
};
