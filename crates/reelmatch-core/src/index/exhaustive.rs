//! Exhaustive cosine backend: the whole N×N similarity matrix, precomputed.

use std::sync::Arc;

use rayon::prelude::*;

use super::distance::cosine_with_norms;
use super::{BackendKind, Neighbor, SimilarityBackend};
use crate::features::{FeatureMatrix, SparseVector};

/// Dense pairwise cosine similarity matrix.
///
/// Building costs O(N²) cells; suited to catalogs whose N×N `f32` matrix
/// fits in memory.
#[derive(Debug, Clone)]
pub struct ExhaustiveCosine {
    features: Arc<FeatureMatrix>,
    norms: Vec<f32>,
    // row-major n × n
    similarities: Vec<f32>,
    n: usize,
}

impl ExhaustiveCosine {
    /// Computes every pairwise similarity. Rows are filled in parallel; each
    /// cell is independent so the result does not depend on scheduling.
    #[must_use]
    pub fn build(features: Arc<FeatureMatrix>) -> Self {
        let n = features.n_rows();
        let norms: Vec<f32> = features.rows().iter().map(SparseVector::norm).collect();
        let mut similarities = vec![0.0_f32; n * n];

        if n > 0 {
            similarities
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, out)| {
                    let a = features.row(i);
                    for (j, cell) in out.iter_mut().enumerate() {
                        *cell = cosine_with_norms(a, norms[i], features.row(j), norms[j]);
                    }
                });
        }

        Self {
            features,
            norms,
            similarities,
            n,
        }
    }

    /// Similarity row of `row`, one score per catalog item.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.similarities[row * self.n..(row + 1) * self.n]
    }

    /// Similarity between two rows.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> f32 {
        self.similarities[a * self.n + b]
    }

    fn rank(scores: impl Iterator<Item = Neighbor>, skip: Option<usize>, k: usize) -> Vec<Neighbor> {
        let mut ranked: Vec<Neighbor> = scores.filter(|nb| Some(nb.row) != skip).collect();
        ranked.sort_by(Neighbor::rank_cmp);
        ranked.truncate(k);
        ranked
    }
}

impl SimilarityBackend for ExhaustiveCosine {
    fn kind(&self) -> BackendKind {
        BackendKind::Cosine
    }

    fn top_k_similar(&self, row: usize, k: usize) -> Vec<Neighbor> {
        let scores = self
            .row(row)
            .iter()
            .enumerate()
            .map(|(j, &score)| Neighbor::new(j, score));
        Self::rank(scores, Some(row), k)
    }

    fn top_k_for_vector(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        let q_norm = query.norm();
        let scores = self
            .features
            .rows()
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(j, (r, &norm))| Neighbor::new(j, cosine_with_norms(query, q_norm, r, norm)));
        Self::rank(scores, None, k)
    }

    fn len(&self) -> usize {
        self.n
    }
}
