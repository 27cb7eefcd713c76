//! Nearest-neighbor backend: cosine-distance search queried per request.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::distance::{CosineDistance, DistanceEngine};
use super::hnsw::{HnswIndex, HnswParams};
use super::{BackendKind, Neighbor, NeighborStrategy, SimilarityBackend};
use crate::error::Result;
use crate::features::{FeatureMatrix, SparseVector};

enum Search {
    Exact,
    Hnsw(HnswIndex),
}

/// Cosine-distance neighbor search over the feature matrix.
///
/// A row query asks the search structure for `k + 1` neighbors, since the
/// row is normally its own nearest neighbor, strips the row itself and
/// reports `score = 1 - distance`.
pub struct NearestNeighbor {
    features: Arc<FeatureMatrix>,
    search: Search,
}

impl NearestNeighbor {
    /// Brute-force search; always exact.
    #[must_use]
    pub fn exact(features: Arc<FeatureMatrix>) -> Self {
        Self {
            features,
            search: Search::Exact,
        }
    }

    /// Approximate search over an HNSW graph built now.
    pub fn hnsw(features: Arc<FeatureMatrix>, params: HnswParams) -> Result<Self> {
        let index = HnswIndex::build(Arc::clone(&features), params)?;
        Ok(Self {
            features,
            search: Search::Hnsw(index),
        })
    }

    /// Builds the backend for the configured strategy.
    pub fn build(
        features: Arc<FeatureMatrix>,
        strategy: NeighborStrategy,
        params: HnswParams,
    ) -> Result<Self> {
        match strategy {
            NeighborStrategy::Exact => Ok(Self::exact(features)),
            NeighborStrategy::Hnsw => Self::hnsw(features, params),
        }
    }

    /// Strategy in use.
    #[must_use]
    pub fn strategy(&self) -> NeighborStrategy {
        match self.search {
            Search::Exact => NeighborStrategy::Exact,
            Search::Hnsw(_) => NeighborStrategy::Hnsw,
        }
    }

    /// `k` nearest rows as `(row, distance)`, ascending distance then row.
    ///
    /// Returns `min(k, rows)` hits on either strategy. When the HNSW graph
    /// reaches fewer rows than that, the missing ones are filled in from an
    /// exact scan.
    #[must_use]
    pub fn kneighbors(&self, query: &SparseVector, k: usize) -> Vec<(usize, f32)> {
        let want = k.min(self.features.n_rows());
        if want == 0 {
            return Vec::new();
        }
        match &self.search {
            Search::Exact => {
                let mut all = self.exact_scan(query);
                all.truncate(want);
                all
            }
            Search::Hnsw(index) => {
                let mut found = index.search(query, want);
                if found.len() < want {
                    let reached = found.len();
                    let seen: FxHashSet<usize> = found.iter().map(|&(row, _)| row).collect();
                    found.extend(
                        self.exact_scan(query)
                            .into_iter()
                            .filter(|(row, _)| !seen.contains(row)),
                    );
                    sort_hits(&mut found);
                    found.truncate(want);
                    tracing::debug!(reached, want, "HNSW search topped up from exact scan");
                }
                found
            }
        }
    }

    /// Every row with its distance to `query`, ascending distance then row.
    fn exact_scan(&self, query: &SparseVector) -> Vec<(usize, f32)> {
        let mut all: Vec<(usize, f32)> = self
            .features
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| (i, CosineDistance.distance(query, row)))
            .collect();
        sort_hits(&mut all);
        all
    }

    fn to_neighbors(found: impl IntoIterator<Item = (usize, f32)>) -> Vec<Neighbor> {
        found
            .into_iter()
            .map(|(row, distance)| Neighbor::new(row, CosineDistance.to_score(distance)))
            .collect()
    }
}

fn sort_hits(hits: &mut [(usize, f32)]) {
    hits.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
}

impl SimilarityBackend for NearestNeighbor {
    fn kind(&self) -> BackendKind {
        BackendKind::NearestNeighbor
    }

    fn top_k_similar(&self, row: usize, k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }
        let found = self.kneighbors(self.features.row(row), k.saturating_add(1));
        let mut neighbors = Self::to_neighbors(found.into_iter().filter(|&(r, _)| r != row));
        neighbors.truncate(k);
        neighbors
    }

    fn top_k_for_vector(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        Self::to_neighbors(self.kneighbors(query, k))
    }

    fn len(&self) -> usize {
        self.features.n_rows()
    }
}

impl std::fmt::Debug for NearestNeighbor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearestNeighbor")
            .field("rows", &self.features.n_rows())
            .field("strategy", &self.strategy())
            .finish()
    }
}
