//! TF-IDF vocabulary model and sparse document vectors
//!
//! ```text
//! idf(t)   = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)  = count(t, d) * idf(t), then L2-normalised per document
//! ```

use ahash::AHashMap;
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::shared::TextNormalizer;

/// `(term index, weight)` pairs sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

/// Normalise every text in parallel, keeping input order
pub fn tokenize_all<S: AsRef<str> + Sync>(
    normalizer: &TextNormalizer,
    texts: &[S],
) -> Vec<Vec<String>> {
    texts
        .par_iter()
        .map(|text| normalizer.normalize(text.as_ref()))
        .collect()
}

/// Fitted vocabulary with smooth idf weights
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fit over tokenised documents.
    ///
    /// `max_df` drops terms present in more than that fraction of documents.
    /// Term indexes follow lexical order.
    pub fn fit(documents: &[Vec<String>], max_df: Option<f64>) -> Self {
        let n = documents.len();
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            let mut distinct: Vec<&str> = tokens.iter().map(String::as_str).collect();
            distinct.sort_unstable();
            distinct.dedup();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = AHashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            if let Some(limit) = max_df {
                if df as f64 > limit * n as f64 {
                    continue;
                }
            }
            vocabulary.insert(term.to_string(), idf.len());
            idf.push(((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// L2-normalised TF-IDF vector; empty when no token is in the vocabulary
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(index) = self.term_index(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    pub fn transform_all(&self, documents: &[Vec<String>]) -> Vec<SparseVector> {
        documents
            .par_iter()
            .map(|tokens| self.transform(tokens))
            .collect()
    }
}

/// Dot product of two sorted sparse vectors
pub fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// Cosine of two L2-normalised vectors (0 when either is empty)
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    sparse_dot(a, b)
}
