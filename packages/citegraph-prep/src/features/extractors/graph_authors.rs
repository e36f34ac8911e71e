//! Author-level citation, self-citation and collaboration counts

use ahash::AHashSet;
use std::sync::Arc;

use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::citation_graph::{
    AuthorCitationGraph, AuthorCitationGraphBuilder, AuthorCollaborationGraph,
    AuthorCollaborationGraphBuilder,
};
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::ProgressReporter;

/// `[author_citations, author_self_citations, author_collaborations]`.
///
/// For source authors `a` and target authors `b`:
/// - citations: Σ weight(a → b) in the author citation graph
/// - self citations: Σ self-citation weight of authors on both articles
/// - collaborations: Σ weight({a, b}) in the collaboration graph, a ≠ b
pub struct GraphAuthorsExtractor {
    corpus: Arc<Corpus>,
    citations: AuthorCitationGraph,
    collaborations: AuthorCollaborationGraph,
    progress: ProgressReporter,
}

impl GraphAuthorsExtractor {
    pub fn new(context: &ExtractorContext) -> Result<Self> {
        let corpus = &context.corpus;
        let builder = if context.verbose {
            AuthorCitationGraphBuilder::new().with_progress(context.progress_every)
        } else {
            AuthorCitationGraphBuilder::new()
        };
        let citations = builder.build(&corpus.training, &corpus.articles)?;
        let collaborations = AuthorCollaborationGraphBuilder::new().build(&corpus.articles);

        Ok(Self {
            corpus: Arc::clone(corpus),
            citations,
            collaborations,
            progress: context.progress("author graph features"),
        })
    }

    fn row(&self, source_authors: &[String], target_authors: &[String]) -> [f64; 3] {
        let mut cited = 0u64;
        let mut collaborated = 0u64;
        for a in source_authors {
            for b in target_authors {
                if a == b {
                    continue;
                }
                cited += u64::from(self.citations.weight(a, b).unwrap_or(0));
                collaborated += u64::from(self.collaborations.weight(a, b).unwrap_or(0));
            }
        }

        let target_set: AHashSet<&str> = target_authors.iter().map(String::as_str).collect();
        let self_cited: u64 = source_authors
            .iter()
            .map(String::as_str)
            .collect::<AHashSet<_>>()
            .intersection(&target_set)
            .map(|name| u64::from(self.citations.self_citations(name).unwrap_or(0)))
            .sum();

        [cited as f64, self_cited as f64, collaborated as f64]
    }
}

impl FeatureExtractor for GraphAuthorsExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let articles = &self.corpus.articles;
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = articles.resolve_edge(edge)?;
            rows.push(self.row(
                &articles.articles()[s].authors,
                &articles.articles()[t].authors,
            ));
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(GraphAuthorsExtractor::new(context)?))
}
