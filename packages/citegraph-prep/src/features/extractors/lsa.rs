//! Latent semantic analysis similarity
//!
//! Documents (title + abstract) form a sparse TF-IDF matrix `A` (docs × terms).
//! A rank-k basis `Q` of its column space comes from seeded randomised
//! subspace iteration:
//!
//! ```text
//! Q = orth(A Ω)                          Ω: terms × k, uniform in [-1, 1)
//! repeat POWER_ITERATIONS: Q = orth(A orth(Aᵀ Q))
//! C = (Aᵀ Q)ᵀ (Aᵀ Q)                     k × k
//! sim(i, j) = q_i C q_jᵀ / sqrt(q_i C q_iᵀ · q_j C q_jᵀ)
//! ```
//!
//! which is the cosine of rows i and j of `U_k Σ_k` for `Q Qᵀ A = U_k Σ_k V_kᵀ`.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::debug;

use super::text_model::{tokenize_all, SparseVector, TfidfModel};
use super::PairMemo;
use crate::config::FeatureParams;
use crate::errors::Result;
use crate::features::feature_export::{
    matrix_from_rows, ExtractorContext, FeatureExtractor, FeatureMatrix,
};
use crate::shared::models::{CitationEdge, Corpus};
use crate::shared::ProgressReporter;

pub const MAX_COMPONENTS: usize = 64;
pub const POWER_ITERATIONS: usize = 4;
const SEED: u64 = 42;
const EPSILON: f64 = 1e-12;

/// Orthonormalise columns in place (modified Gram-Schmidt).
///
/// Columns that collapse to zero stay zero.
fn orthonormalize(matrix: &mut Array2<f64>) {
    for j in 0..matrix.ncols() {
        for i in 0..j {
            let basis = matrix.column(i).to_owned();
            let projection = basis.dot(&matrix.column(j));
            matrix.column_mut(j).scaled_add(-projection, &basis);
        }
        let norm = matrix.column(j).dot(&matrix.column(j)).sqrt();
        let mut column = matrix.column_mut(j);
        if norm > EPSILON {
            column /= norm;
        } else {
            column.fill(0.0);
        }
    }
}

/// `A X` for sparse `A` (rows × terms) and dense `X` (terms × k)
fn sparse_times(rows: &[SparseVector], dense: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((rows.len(), dense.ncols()));
    for (i, row) in rows.iter().enumerate() {
        let mut target = out.row_mut(i);
        for &(term, weight) in row {
            target.scaled_add(weight, &dense.row(term));
        }
    }
    out
}

/// `Aᵀ Y` for sparse `A` (rows × terms) and dense `Y` (rows × k)
fn sparse_transpose_times(rows: &[SparseVector], terms: usize, dense: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((terms, dense.ncols()));
    for (i, row) in rows.iter().enumerate() {
        let source = dense.row(i);
        for &(term, weight) in row {
            out.row_mut(term).scaled_add(weight, &source);
        }
    }
    out
}

/// Rank-k document embedding supporting cosine queries
#[derive(Debug, Clone)]
pub struct LsaModel {
    basis: Array2<f64>,
    weighted: Array2<f64>,
    norms: Array1<f64>,
}

impl LsaModel {
    /// Fit over L2-normalised TF-IDF rows with `terms` columns
    pub fn fit(rows: &[SparseVector], terms: usize, seed: u64) -> Self {
        let k = MAX_COMPONENTS.min(rows.len()).min(terms);
        if k == 0 {
            return Self {
                basis: Array2::zeros((rows.len(), 0)),
                weighted: Array2::zeros((rows.len(), 0)),
                norms: Array1::zeros(rows.len()),
            };
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let omega = Array2::from_shape_simple_fn((terms, k), || rng.random_range(-1.0..1.0));

        let mut basis = sparse_times(rows, &omega);
        orthonormalize(&mut basis);
        for _ in 0..POWER_ITERATIONS {
            let mut term_basis = sparse_transpose_times(rows, terms, &basis);
            orthonormalize(&mut term_basis);
            basis = sparse_times(rows, &term_basis);
            orthonormalize(&mut basis);
        }

        let projected = sparse_transpose_times(rows, terms, &basis);
        let gram = projected.t().dot(&projected);
        let weighted = basis.dot(&gram);
        let norms = (&weighted * &basis).sum_axis(Axis(1)).mapv(|v| v.max(0.0).sqrt());

        debug!("lsa: {} documents, {} terms, rank {}", rows.len(), terms, k);
        Self {
            basis,
            weighted,
            norms,
        }
    }

    pub fn rank(&self) -> usize {
        self.basis.ncols()
    }

    /// Cosine similarity of documents `i` and `j` in the latent space
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        let denominator = self.norms[i] * self.norms[j];
        if denominator <= EPSILON {
            return 0.0;
        }
        self.weighted.row(i).dot(&self.basis.row(j)) / denominator
    }
}

/// `[lsa_similarity]`
pub struct LsaExtractor {
    corpus: Arc<Corpus>,
    model: LsaModel,
    memo: PairMemo<f64>,
    progress: ProgressReporter,
}

impl LsaExtractor {
    pub fn new(context: &ExtractorContext) -> Self {
        let texts: Vec<String> = context
            .corpus
            .articles
            .articles()
            .iter()
            .map(|article| format!("{} {}", article.title, article.abstract_text))
            .collect();
        let documents = tokenize_all(&context.normalizer, &texts);
        let tfidf = TfidfModel::fit(&documents, None);
        let rows = tfidf.transform_all(&documents);

        Self {
            corpus: Arc::clone(&context.corpus),
            model: LsaModel::fit(&rows, tfidf.vocabulary_len(), SEED),
            memo: PairMemo::default(),
            progress: context.progress("lsa features"),
        }
    }
}

impl FeatureExtractor for LsaExtractor {
    fn extract_feature(&mut self, edges: &[CitationEdge]) -> Result<FeatureMatrix> {
        let mut rows = Vec::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            self.progress.tick(position, edges.len());
            let (s, t) = self.corpus.articles.resolve_edge(edge)?;
            let model = &self.model;
            rows.push([self.memo.get_or_insert_with((s, t), || model.similarity(s, t))]);
        }
        Ok(matrix_from_rows(rows))
    }

    fn reset(&mut self) {
        debug!("lsa: dropping {} memoised pairs", self.memo.len());
        self.memo.clear();
    }
}

pub fn build(context: &ExtractorContext, _params: &FeatureParams) -> Result<Box<dyn FeatureExtractor>> {
    Ok(Box::new(LsaExtractor::new(context)))
}
