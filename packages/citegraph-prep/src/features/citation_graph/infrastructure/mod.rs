//! Graph builder implementations

mod article_graph;
mod author_citation;
mod author_collaboration;
mod author_vertices;
mod simplify;

pub use article_graph::ArticleGraphBuilder;
pub use author_citation::{author_citation_counts, AuthorCitationGraphBuilder};
pub use author_collaboration::AuthorCollaborationGraphBuilder;
pub use simplify::combine_parallel_edges;
