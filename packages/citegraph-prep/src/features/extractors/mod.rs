//! Feature extractors
//!
//! One module per feature kind, plus shared numerics:
//!
//! | Kind | Module | Fitted at construction |
//! |------|--------|------------------------|
//! | original | `original` | title token sets |
//! | lsa | `lsa` | rank-k document subspace |
//! | journal | `journal` | journal → journal citation rates |
//! | inOutDegree | `in_out` | training article graph |
//! | similarity | `similarity` | abstract similarity graph scores |
//! | intersection | `intersection` | undirected neighbour sets |
//! | graphArticle | `graph_article` | article PageRank |
//! | tfidf | `tfidf` | title and abstract vectors |
//! | graphAuthors | `graph_authors` | author citation + collaboration graphs |

pub mod graph_article;
pub mod graph_authors;
pub mod in_out;
pub mod intersection;
pub mod journal;
pub mod lsa;
pub mod original;
pub mod pagerank;
pub mod similarity;
pub mod text_model;
pub mod tfidf;

use ahash::AHashMap;
use std::sync::Arc;

use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::citation_graph::{ArticleGraph, ArticleGraphBuilder};
use crate::features::feature_export::{
    ExtractorContext, ExtractorFactory, FeatureExtractor, FeatureKind,
};

pub use pagerank::{PageRankEngine, PageRankSettings};
pub use text_model::{cosine, SparseVector, TfidfModel};

/// Production constructor of a kind
pub fn standard_factory(kind: FeatureKind) -> ExtractorFactory {
    match kind {
        FeatureKind::Original => factory(original::build),
        FeatureKind::Lsa => factory(lsa::build),
        FeatureKind::Journal => factory(journal::build),
        FeatureKind::InOutDegree => factory(in_out::build),
        FeatureKind::Similarity => factory(similarity::build),
        FeatureKind::Intersection => factory(intersection::build),
        FeatureKind::GraphArticle => factory(graph_article::build),
        FeatureKind::Tfidf => factory(tfidf::build),
        FeatureKind::GraphAuthors => factory(graph_authors::build),
    }
}

fn factory<F>(build: F) -> ExtractorFactory
where
    F: Fn(&ExtractorContext, &FeatureParams) -> Result<Box<dyn FeatureExtractor>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(build)
}

/// Training article graph, with progress when verbose
pub(crate) fn training_article_graph(context: &ExtractorContext) -> Result<ArticleGraph> {
    let builder = if context.verbose {
        ArticleGraphBuilder::new().with_progress(context.progress_every)
    } else {
        ArticleGraphBuilder::new()
    };
    builder.build_from_table(&context.corpus.training, &context.corpus.articles)
}

/// Per-call memo of values keyed by article row pair
#[derive(Debug, Clone, Default)]
pub(crate) struct PairMemo<V> {
    values: AHashMap<(usize, usize), V>,
}

impl<V: Copy> PairMemo<V> {
    pub fn get_or_insert_with(&mut self, key: (usize, usize), compute: impl FnOnce() -> V) -> V {
        *self.values.entry(key).or_insert_with(compute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
