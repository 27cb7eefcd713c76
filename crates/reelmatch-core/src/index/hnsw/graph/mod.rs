//! HNSW Graph Structure
//!
//! Implements the hierarchical navigable small world graph
//! (Malkov & Yashunin) over the rows of a feature matrix.
//!
//! # Module Organization
//!
//! - `insert`: Node insertion and layer growth
//! - `search`: k-NN search and layer-level search
//! - `neighbors`: Neighbor selection and bidirectional connections
//!
//! The graph is built once and read-only afterwards, so it needs no locks.
//! Layer assignment uses a fixed-seed xorshift generator: the same matrix
//! always produces the same graph.

mod insert;
mod neighbors;
mod search;

use std::sync::Arc;

use super::layer::{Layer, NodeId};
use crate::features::{FeatureMatrix, SparseVector};
use crate::index::distance::DistanceEngine;

const RNG_SEED: u64 = 0x5DEE_CE66_D1A4_B5B5;
const MAX_LEVEL: usize = 15;

/// Native HNSW index over feature-matrix rows.
///
/// # Type Parameters
///
/// * `D` - Distance engine
pub struct NativeHnsw<D: DistanceEngine> {
    /// Distance computation engine
    pub(super) distance: D,
    /// Row storage; node ids are row indices
    pub(super) features: Arc<FeatureMatrix>,
    /// Hierarchical layers (layer 0 = bottom, dense connections)
    pub(super) layers: Vec<Layer>,
    /// Entry point for search (highest layer node)
    pub(super) entry_point: Option<NodeId>,
    /// Maximum layer for entry point
    pub(super) max_layer: usize,
    /// Number of inserted nodes
    pub(super) count: usize,
    /// PRNG state for layer selection
    pub(super) rng_state: u64,
    /// Maximum connections per node (M parameter)
    pub(super) max_connections: usize,
    /// Maximum connections at layer 0 (M0 = 2*M)
    pub(super) max_connections_0: usize,
    /// ef_construction parameter
    pub(super) ef_construction: usize,
    /// Level multiplier for layer selection (1/ln(M))
    pub(super) level_mult: f64,
}

impl<D: DistanceEngine> NativeHnsw<D> {
    /// Creates an empty graph over `features`; call [`NativeHnsw::insert`]
    /// for each row to index.
    // Reason: M is a small positive parameter, exact in f64.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(
        distance: D,
        features: Arc<FeatureMatrix>,
        max_connections: usize,
        ef_construction: usize,
    ) -> Self {
        let max_connections = max_connections.max(2);
        let capacity = features.n_rows();
        Self {
            distance,
            features,
            layers: vec![Layer::new(capacity)],
            entry_point: None,
            max_layer: 0,
            count: 0,
            rng_state: RNG_SEED,
            max_connections,
            max_connections_0: max_connections * 2,
            ef_construction: ef_construction.max(1),
            level_mult: 1.0 / (max_connections as f64).ln(),
        }
    }

    /// Returns the number of indexed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no node has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of layers currently allocated.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer-0 neighbors of `node`.
    #[must_use]
    pub fn base_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.layers[0].get_neighbors(node)
    }

    pub(super) fn vector(&self, node: NodeId) -> &SparseVector {
        self.features.row(node)
    }

    // SAFETY: Layer selection uses exponential distribution capped at MAX_LEVEL.
    // - cast_precision_loss: u64 to f64 may lose precision but is acceptable for PRNG
    // - cast_possible_truncation: floor() result is capped, fitting in usize
    // - cast_sign_loss: -ln(uniform) is always positive since uniform is in (0, 1]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub(super) fn random_layer(&mut self) -> usize {
        let mut state = self.rng_state;
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        self.rng_state = state;
        let uniform = (state as f64) / (u64::MAX as f64);
        let uniform_safe = uniform.max(f64::MIN_POSITIVE);
        let level = (-uniform_safe.ln() * self.level_mult).floor() as usize;
        level.min(MAX_LEVEL)
    }
}
