//! Title and abstract TF-IDF cosine similarity

use std::sync::Arc;
use tracing::debug;

use super::text_model::{cosine, tokenize_all, SparseVector, TfidfModel};
use super::PairMemo;
use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{Corpus, CitationEdge};
use crate::shared::{ProgressReporter, TextNormalizer};

/// Vectors of one text field for every article, in table order
pub(crate) fn field_vectors(
    normalizer: &TextNormalizer,
    texts: &[&str],
    max_df: Option<f64>,
) -> (TfidfModel, Vec<SparseVector>) {
    let documents = tokenize_all(normalizer, texts);
    let model = TfidfModel::fit(&documents, max_df);
    let vectors = model.transform_all(&documents);
    (model, vectors)
}

/// `[tfidf_title, tfidf_abstract]`
pub struct TfidfExtractor {
    corpus: Arc<Corpus>,
    titles: Vec<SparseVector>,
    abstracts: Vec<SparseVector>,
    memo: PairMemo<[f64; 2]>,
    progress: ProgressReporter,
}

impl TfidfExtractor {
    pub fn new(context: &ExtractorContext) -> Self {
        let articles = context.corpus.articles.articles();
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        let abstracts: Vec<&str> = articles.iter().map(|a| a.abstract_text.as_str()).collect();

        let (title_model, titles) = field_vectors(&context.normalizer, &titles, None);
        let (abstract_model, abstracts) = field_vectors(&context.normalizer, &abstracts, None);
        debug!(
            "tfidf vocabularies: {} title terms, {} abstract terms",
            title_model.vocabulary_len(),
            abstract_model.vocabulary_len()
        );

        Self {
            corpus: Arc::clone(&context.corpus),
            titles,
            abstracts,
            memo: PairMemo::default(),
            progress: context.progress("tfidf features"),
        }
    }
}

impl FeatureExtractor for TfidfExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = self.corpus.articles.resolve_edge(edge)?;
            let (titles, abstracts) = (&self.titles, &self.abstracts);
            rows.push(self.memo.get_or_insert_with((s, t), || {
                [
                    cosine(&titles[s], &titles[t]),
                    cosine(&abstracts[s], &abstracts[t]),
                ]
            }));
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {
        debug!("tfidf: dropping {} memoised pairs", self.memo.len());
        self.memo.clear();
    }
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(TfidfExtractor::new(context)))
}
