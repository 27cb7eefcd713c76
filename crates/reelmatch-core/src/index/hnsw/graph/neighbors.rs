//! HNSW neighbor selection and bidirectional connection management.

use super::super::layer::NodeId;
use super::NativeHnsw;
use crate::index::distance::DistanceEngine;

impl<D: DistanceEngine> NativeHnsw<D> {
    /// Diversity-aware neighbor selection.
    ///
    /// `candidates` must be sorted by ascending distance. A candidate is kept
    /// when it is closer to the new node than to every already selected
    /// neighbor; remaining slots are back-filled in distance order.
    pub(in crate::index::hnsw) fn select_neighbors(
        &self,
        candidates: &[(NodeId, f32)],
        max_neighbors: usize,
    ) -> Vec<NodeId> {
        if candidates.len() <= max_neighbors {
            return candidates.iter().map(|(id, _)| *id).collect();
        }

        let mut selected: Vec<NodeId> = Vec::with_capacity(max_neighbors);

        for &(candidate_id, candidate_dist) in candidates {
            if selected.len() >= max_neighbors {
                break;
            }

            let candidate_vec = self.vector(candidate_id);
            let is_diverse = selected.iter().all(|&s| {
                candidate_dist <= self.distance.distance(candidate_vec, self.vector(s))
            });

            if is_diverse || selected.is_empty() {
                selected.push(candidate_id);
            }
        }

        if selected.len() < max_neighbors {
            for &(candidate_id, _) in candidates {
                if selected.len() >= max_neighbors {
                    break;
                }
                if !selected.contains(&candidate_id) {
                    selected.push(candidate_id);
                }
            }
        }

        selected
    }

    /// Adds `new_node` to the adjacency list of `neighbor`, pruning to the
    /// `max_conn` closest when the list is full.
    pub(in crate::index::hnsw) fn add_bidirectional_connection(
        &mut self,
        new_node: NodeId,
        neighbor: NodeId,
        layer: usize,
        max_conn: usize,
    ) {
        let mut all_neighbors = self.layers[layer].get_neighbors(neighbor).to_vec();
        if all_neighbors.contains(&new_node) {
            return;
        }
        all_neighbors.push(new_node);

        if all_neighbors.len() > max_conn {
            let neighbor_vec = self.vector(neighbor);
            let mut with_dist: Vec<(NodeId, f32)> = all_neighbors
                .iter()
                .map(|&n| (n, self.distance.distance(neighbor_vec, self.vector(n))))
                .collect();

            with_dist.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            all_neighbors = with_dist
                .into_iter()
                .take(max_conn)
                .map(|(n, _)| n)
                .collect();
        }

        self.layers[layer].set_neighbors(neighbor, all_neighbors);
    }
}
