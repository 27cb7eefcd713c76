//! Similarity index: two interchangeable top-K retrieval backends over the
//! same feature matrix.
//!
//! - [`ExhaustiveCosine`]: full N×N cosine matrix, sorted per query.
//! - [`NearestNeighbor`]: cosine-distance neighbor search (exact scan or HNSW).
//!
//! Both return neighbors ordered by descending score with ties broken by
//! ascending row, and never include the query row itself.

mod distance;
mod exhaustive;
pub mod hnsw;
mod neighbor;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use distance::{cosine_similarity, cosine_with_norms, CosineDistance, DistanceEngine};
pub use exhaustive::ExhaustiveCosine;
pub use hnsw::{HnswIndex, HnswParams};
pub use neighbor::NearestNeighbor;

use crate::error::Error;
use crate::features::SparseVector;

/// Which retrieval backend serves a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Precomputed pairwise cosine matrix.
    #[default]
    Cosine,
    /// Per-request nearest-neighbor search.
    NearestNeighbor,
}

impl BackendKind {
    /// Both backends, in reporting order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Cosine, BackendKind::NearestNeighbor];

    /// Stable short name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::NearestNeighbor => "nearest_neighbor",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "nearest_neighbor" | "nearest-neighbor" | "nn" | "knn" => Ok(Self::NearestNeighbor),
            other => Err(Error::InvalidParameter(format!("unknown backend '{other}'"))),
        }
    }
}

/// Search strategy behind the nearest-neighbor backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborStrategy {
    /// Brute-force scan of every row.
    #[default]
    Exact,
    /// Approximate HNSW graph.
    Hnsw,
}

/// A retrieved row and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Catalog row index.
    pub row: usize,
    /// Similarity in `[-1, 1]`, higher is closer.
    pub score: f32,
}

impl Neighbor {
    /// Creates a neighbor.
    #[must_use]
    pub fn new(row: usize, score: f32) -> Self {
        Self { row, score }
    }

    /// Result ordering: descending score, then ascending row.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.row.cmp(&other.row))
    }
}

/// Polymorphic top-K capability shared by both backends.
///
/// Implementations are read-only after construction, so a single instance
/// can serve concurrent queries.
pub trait SimilarityBackend: Send + Sync {
    /// Backend identity.
    fn kind(&self) -> BackendKind;

    /// Up to `k` rows most similar to `row`, excluding `row` itself.
    ///
    /// `row` must be a valid index; callers resolve titles first.
    fn top_k_similar(&self, row: usize, k: usize) -> Vec<Neighbor>;

    /// Up to `k` rows most similar to an arbitrary query vector.
    fn top_k_for_vector(&self, query: &SparseVector, k: usize) -> Vec<Neighbor>;

    /// Number of indexed rows.
    fn len(&self) -> usize;

    /// Returns true if nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
