//! HNSW search operations.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use super::super::layer::NodeId;
use super::super::ordered_float::OrderedFloat;
use super::NativeHnsw;
use crate::features::SparseVector;
use crate::index::distance::DistanceEngine;

impl<D: DistanceEngine> NativeHnsw<D> {
    /// Searches for the `k` nearest nodes to `query`.
    ///
    /// Results are `(node, distance)` sorted by ascending distance, ties by
    /// ascending node id.
    #[must_use]
    pub fn search(&self, query: &SparseVector, k: usize, ef_search: usize) -> Vec<(NodeId, f32)> {
        let Some(ep) = self.entry_point else {
            return Vec::new();
        };

        let mut current_ep = ep;
        for layer_idx in (1..=self.max_layer).rev() {
            current_ep = self.search_layer_single(query, current_ep, layer_idx);
        }

        let mut candidates = self.search_layer(query, vec![current_ep], ef_search.max(k), 0);
        candidates.truncate(k);
        candidates
    }

    // =========================================================================
    // Layer-level search helpers
    // =========================================================================

    /// Greedy descent: follows strictly closer neighbors until none remain.
    pub(in crate::index::hnsw) fn search_layer_single(
        &self,
        query: &SparseVector,
        entry: NodeId,
        layer: usize,
    ) -> NodeId {
        let mut best = entry;
        let mut best_dist = self.distance.distance(query, self.vector(entry));

        loop {
            let mut improved = false;
            for &neighbor in self.layers[layer].get_neighbors(best) {
                let dist = self.distance.distance(query, self.vector(neighbor));
                if dist < best_dist {
                    best = neighbor;
                    best_dist = dist;
                    improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        best
    }

    /// Search a single layer with `ef` candidates.
    pub(in crate::index::hnsw) fn search_layer(
        &self,
        query: &SparseVector,
        entry_points: Vec<NodeId>,
        ef: usize,
        layer: usize,
    ) -> Vec<(NodeId, f32)> {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut candidates: BinaryHeap<Reverse<(OrderedFloat, NodeId)>> = BinaryHeap::new();
        let mut results: BinaryHeap<(OrderedFloat, NodeId)> = BinaryHeap::new();

        for ep in entry_points {
            if visited.insert(ep) {
                let dist = self.distance.distance(query, self.vector(ep));
                candidates.push(Reverse((OrderedFloat(dist), ep)));
                results.push((OrderedFloat(dist), ep));
            }
        }

        while let Some(Reverse((OrderedFloat(c_dist), c_node))) = candidates.pop() {
            let furthest_dist = results.peek().map_or(f32::MAX, |r| r.0 .0);

            if c_dist > furthest_dist && results.len() >= ef {
                break;
            }

            for &neighbor in self.layers[layer].get_neighbors(c_node) {
                if visited.insert(neighbor) {
                    let dist = self.distance.distance(query, self.vector(neighbor));
                    let furthest = results.peek().map_or(f32::MAX, |r| r.0 .0);

                    if dist <= furthest || results.len() < ef {
                        candidates.push(Reverse((OrderedFloat(dist), neighbor)));
                        results.push((OrderedFloat(dist), neighbor));

                        if results.len() > ef {
                            results.pop();
                        }
                    }
                }
            }
        }

        let mut result_vec: Vec<(NodeId, f32)> =
            results.into_iter().map(|(d, n)| (n, d.0)).collect();
        result_vec.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        result_vec
    }
}
