//! Approximate nearest-neighbor search with an HNSW graph.
//!
//! Used by the nearest-neighbor backend when
//! [`NeighborStrategy::Hnsw`](crate::index::NeighborStrategy::Hnsw) is selected.

mod graph;
mod layer;
mod ordered_float;
mod params;

use std::sync::Arc;
use std::time::Instant;

pub use graph::NativeHnsw;
pub use layer::NodeId;
pub use params::HnswParams;

use super::distance::CosineDistance;
use crate::error::Result;
use crate::features::{FeatureMatrix, SparseVector};

/// Cosine-distance HNSW index over every row of a feature matrix.
pub struct HnswIndex {
    graph: NativeHnsw<CosineDistance>,
    params: HnswParams,
}

impl HnswIndex {
    /// Inserts rows `0..n` in order.
    pub fn build(features: Arc<FeatureMatrix>, params: HnswParams) -> Result<Self> {
        params.validate()?;
        let start = Instant::now();
        let n = features.n_rows();
        let mut graph = NativeHnsw::new(
            CosineDistance,
            features,
            params.max_connections,
            params.ef_construction,
        );
        for row in 0..n {
            graph.insert(row);
        }
        tracing::debug!(
            nodes = n,
            layers = graph.layer_count(),
            elapsed_ms = start.elapsed().as_millis(),
            "HNSW graph built"
        );
        Ok(Self { graph, params })
    }

    /// `k` nearest rows as `(row, cosine distance)`, ascending distance.
    #[must_use]
    pub fn search(&self, query: &SparseVector, k: usize) -> Vec<(NodeId, f32)> {
        self.graph.search(query, k, self.params.ef_for(k))
    }

    /// Parameters the graph was built with.
    #[must_use]
    pub fn params(&self) -> HnswParams {
        self.params
    }

    /// Number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Underlying graph.
    #[must_use]
    pub fn graph(&self) -> &NativeHnsw<CosineDistance> {
        &self.graph
    }
}

impl std::fmt::Debug for HnswIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HnswIndex")
            .field("len", &self.len())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
