//! Article metadata

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::{ArticleId, CitationEdge};
use crate::errors::{CitegraphError, Result};

/// Separator used by the metadata file to join author names
pub const AUTHOR_SEPARATOR: &str = ", ";

/// One article of the metadata table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub year: i32,
    pub title: String,
    /// Author names in file order (possibly empty)
    pub authors: Vec<String>,
    pub journal: String,
    pub abstract_text: String,
}

impl Article {
    pub fn new(id: ArticleId, year: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            year,
            title: title.into(),
            authors: Vec::new(),
            journal: String::new(),
            abstract_text: String::new(),
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = text.into();
        self
    }
}

/// Split a joined author field, dropping empty tokens.
///
/// A missing field is an empty list, not an error.
pub fn parse_authors(field: Option<&str>) -> Vec<String> {
    match field {
        Some(raw) => raw
            .split(AUTHOR_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Ordered article table with an id → row index map.
///
/// Invariant: the index map is a bijection between the ids and `0..len()`.
#[derive(Debug, Clone, Default)]
pub struct ArticleTable {
    articles: Vec<Article>,
    id_to_index: AHashMap<ArticleId, usize>,
}

impl ArticleTable {
    /// Build the table, rejecting duplicate ids
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        let mut id_to_index = AHashMap::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            if id_to_index.insert(article.id, index).is_some() {
                return Err(CitegraphError::DuplicateArticle(article.id));
            }
        }
        Ok(Self {
            articles,
            id_to_index,
        })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Article ids in table order
    pub fn ids(&self) -> Vec<ArticleId> {
        self.articles.iter().map(|a| a.id).collect()
    }

    pub fn index_of(&self, id: ArticleId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.index_of(id).map(|index| &self.articles[index])
    }

    /// Row index for an id, or a dangling-reference error naming its role
    pub fn require_index(&self, id: ArticleId, role: &'static str) -> Result<usize> {
        self.index_of(id)
            .ok_or(CitegraphError::UnknownArticle { id, role })
    }

    /// Resolve both endpoints of an edge to row indexes
    pub fn resolve_edge(&self, edge: &CitationEdge) -> Result<(usize, usize)> {
        Ok((
            self.require_index(edge.source, "source")?,
            self.require_index(edge.target, "target")?,
        ))
    }
}

/// Everything an extractor may look at besides the edge batch.
///
/// `training` holds the labeled records the citation graphs are built from;
/// it is usually the full training file, independent of the batch being
/// featurised.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub articles: ArticleTable,
    pub training: Vec<CitationEdge>,
}

impl Corpus {
    pub fn new(articles: ArticleTable, training: Vec<CitationEdge>) -> Self {
        Self { articles, training }
    }
}
