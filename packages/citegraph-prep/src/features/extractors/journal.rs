//! Journal match and journal-to-journal citation rate

use ahash::AHashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{CitationEdge, CitationLabel, Corpus};
use crate::shared::ProgressReporter;

#[derive(Debug, Clone, Copy, Default)]
struct LinkTally {
    cited: u32,
    total: u32,
}

/// `[same_journal, journal_link_rate]` per edge.
///
/// The rate table counts, over labeled training records, how often a
/// source journal → target journal pair is an actual citation.
pub struct JournalExtractor {
    corpus: Arc<Corpus>,
    rates: AHashMap<(String, String), LinkTally>,
    progress: ProgressReporter,
}

impl JournalExtractor {
    pub fn new(context: &ExtractorContext) -> Result<Self> {
        let corpus = &context.corpus;
        let mut rates: AHashMap<(String, String), LinkTally> = AHashMap::new();

        for edge in &corpus.training {
            let Some(label) = edge.label else { continue };
            let (s, t) = corpus.articles.resolve_edge(edge)?;
            let source = &corpus.articles.articles()[s].journal;
            let target = &corpus.articles.articles()[t].journal;
            if source.is_empty() || target.is_empty() {
                continue;
            }
            let tally = rates.entry((source.clone(), target.clone())).or_default();
            tally.total += 1;
            if label == CitationLabel::Cited {
                tally.cited += 1;
            }
        }
        debug!("journal link table: {} journal pairs", rates.len());

        Ok(Self {
            corpus: Arc::clone(corpus),
            rates,
            progress: context.progress("journal features"),
        })
    }

    fn link_rate(&self, source: &str, target: &str) -> f64 {
        if source.is_empty() || target.is_empty() {
            return 0.0;
        }
        self.rates
            .get(&(source.to_string(), target.to_string()))
            .filter(|tally| tally.total > 0)
            .map_or(0.0, |tally| tally.cited as f64 / tally.total as f64)
    }
}

impl FeatureExtractor for JournalExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let articles = &self.corpus.articles;
        let mut rows = Vec::with_capacity(edges.len());

        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = articles.resolve_edge(edge)?;
            let source = &articles.articles()[s].journal;
            let target = &articles.articles()[t].journal;

            let same = !source.is_empty() && source == target;
            rows.push([
                if same { 1.0 } else { 0.0 },
                self.link_rate(source, target),
            ]);
        }

        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {}
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(JournalExtractor::new(context)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Article, ArticleTable};
    use crate::shared::TextNormalizer;

    fn context() -> ExtractorContext {
        let table = ArticleTable::new(vec![
            Article::new(1, 2000, "a").with_journal("Nucl.Phys."),
            Article::new(2, 2000, "b").with_journal("Phys.Lett."),
            Article::new(3, 2000, "c").with_journal("Phys.Lett."),
            Article::new(4, 2000, "d"),
        ])
        .unwrap();
        let training = vec![
            CitationEdge::cited(1, 2),
            CitationEdge::not_cited(1, 3),
            CitationEdge::cited(1, 3),
            CitationEdge::cited(1, 3),
            CitationEdge::unlabeled(1, 2),
            CitationEdge::cited(4, 1),
        ];
        ExtractorContext::new(
            Arc::new(Corpus::new(table, training)),
            Arc::new(TextNormalizer::english()),
        )
    }

    #[test]
    fn test_same_journal_and_rates() {
        let mut extractor = JournalExtractor::new(&context()).unwrap();
        let matrix = extractor
            .extract_feature(&[
                CitationEdge::unlabeled(1, 2),
                CitationEdge::unlabeled(2, 3),
                CitationEdge::unlabeled(4, 1),
            ])
            .unwrap();

        assert_eq!(matrix.row(0).to_vec(), vec![0.0, 0.75]);
        assert_eq!(matrix.row(1).to_vec(), vec![1.0, 0.0]);
        assert_eq!(matrix.row(2).to_vec(), vec![0.0, 0.0]);
    }
}
