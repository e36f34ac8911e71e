//! Title overlap, publication gap and shared authors

use ahash::AHashSet;
use std::sync::Arc;

use super::text_model::tokenize_all;
use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::ProgressReporter;

/// `[overlap_title, temp_diff, comm_auth]` per edge
pub struct OriginalExtractor {
    corpus: Arc<Corpus>,
    title_tokens: Vec<AHashSet<String>>,
    progress: ProgressReporter,
}

impl OriginalExtractor {
    pub fn new(context: &ExtractorContext) -> Self {
        let titles: Vec<&str> = context
            .corpus
            .articles
            .articles()
            .iter()
            .map(|article| article.title.as_str())
            .collect();
        let title_tokens = tokenize_all(&context.normalizer, &titles)
            .into_iter()
            .map(|tokens| tokens.into_iter().collect())
            .collect();

        Self {
            corpus: Arc::clone(&context.corpus),
            title_tokens,
            progress: context.progress("original features"),
        }
    }
}

impl FeatureExtractor for OriginalExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let articles = &self.corpus.articles;
        let mut rows = Vec::with_capacity(edges.len());

        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = articles.resolve_edge(edge)?;
            let (source, target) = (&articles.articles()[s], &articles.articles()[t]);

            let overlap = self.title_tokens[s]
                .intersection(&self.title_tokens[t])
                .count();
            let temp_diff = source.year - target.year;
            let target_authors: AHashSet<&str> =
                target.authors.iter().map(String::as_str).collect();
            let shared = source
                .authors
                .iter()
                .map(String::as_str)
                .collect::<AHashSet<_>>()
                .intersection(&target_authors)
                .count();

            rows.push([overlap as f64, temp_diff as f64, shared as f64]);
        }

        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(OriginalExtractor::new(context)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CitegraphError;
    use crate::shared::models::{Article, ArticleTable};
    use crate::shared::TextNormalizer;

    fn context() -> ExtractorContext {
        let table = ArticleTable::new(vec![
            Article::new(1, 2001, "Supersymmetric gauge theories").with_authors(["Smith", "Lee"]),
            Article::new(2, 1998, "Gauge theories on the lattice").with_authors(["Lee"]),
            Article::new(3, 1999, "Black holes"),
        ])
        .unwrap();
        ExtractorContext::new(
            Arc::new(Corpus::new(table, Vec::new())),
            Arc::new(TextNormalizer::english()),
        )
    }

    #[test]
    fn test_rows_follow_edges() {
        let mut extractor = OriginalExtractor::new(&context());
        let matrix = extractor
            .extract_feature(&[CitationEdge::unlabeled(1, 2), CitationEdge::unlabeled(3, 1)])
            .unwrap();

        assert_eq!(matrix.dim(), (2, 3));
        assert_eq!(matrix.row(0).to_vec(), vec![2.0, 3.0, 1.0]);
        assert_eq!(matrix.row(1).to_vec(), vec![0.0, -2.0, 0.0]);
    }

    #[test]
    fn test_unknown_article_is_dangling() {
        let mut extractor = OriginalExtractor::new(&context());
        let err = extractor
            .extract_feature(&[CitationEdge::unlabeled(1, 7)])
            .unwrap_err();
        assert!(matches!(err, CitegraphError::UnknownArticle { id: 7, .. }));
    }
}
