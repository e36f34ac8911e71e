//! Build all three graphs of a corpus in one call

use tracing::info;

use super::domain::{ArticleGraph, AuthorCitationGraph, AuthorCollaborationGraph};
use super::infrastructure::{
    ArticleGraphBuilder, AuthorCitationGraphBuilder, AuthorCollaborationGraphBuilder,
};
use crate::errors::Result;
use crate::shared::models::Corpus;

/// The article, author-citation and author-collaboration graphs of a corpus
#[derive(Debug, Clone)]
pub struct CitationGraphSet {
    pub articles: ArticleGraph,
    pub author_citations: AuthorCitationGraph,
    pub author_collaborations: AuthorCollaborationGraph,
}

impl CitationGraphSet {
    /// Build every graph from `corpus.training` and the article table
    pub fn build(corpus: &Corpus) -> Result<Self> {
        let articles =
            ArticleGraphBuilder::new().build_from_table(&corpus.training, &corpus.articles)?;
        let author_citations =
            AuthorCitationGraphBuilder::new().build(&corpus.training, &corpus.articles)?;
        let author_collaborations = AuthorCollaborationGraphBuilder::new().build(&corpus.articles);

        info!(
            "citation graphs: {} articles / {} citations, {} authors / {} citation pairs / {} collaboration pairs",
            articles.vertex_count(),
            articles.edge_count(),
            author_citations.vertex_count(),
            author_citations.edge_count(),
            author_collaborations.edge_count()
        );

        Ok(Self {
            articles,
            author_citations,
            author_collaborations,
        })
    }
}
