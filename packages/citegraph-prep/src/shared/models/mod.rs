//! Shared domain models (articles, citation records)

mod article;
mod citation;

pub use article::{parse_authors, Article, ArticleTable, Corpus, AUTHOR_SEPARATOR};
pub use citation::{CitationEdge, CitationLabel};

/// Integer article identifier as found in the dataset files
pub type ArticleId = i64;
