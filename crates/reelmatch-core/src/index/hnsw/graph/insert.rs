//! HNSW insert operations.

use super::super::layer::{Layer, NodeId};
use super::NativeHnsw;
use crate::index::distance::DistanceEngine;

impl<D: DistanceEngine> NativeHnsw<D> {
    /// Links row `node_id` of the feature matrix into the graph.
    ///
    /// Rows must be inserted at most once.
    pub fn insert(&mut self, node_id: NodeId) {
        let node_layer = self.random_layer();
        while self.layers.len() <= node_layer {
            self.layers.push(Layer::new(node_id + 1));
        }
        for layer in &mut self.layers {
            layer.ensure_capacity(node_id);
        }

        if let Some(ep) = self.entry_point {
            let features = std::sync::Arc::clone(&self.features);
            let query = features.row(node_id);

            let mut current_ep = ep;
            for layer_idx in (node_layer + 1..=self.max_layer).rev() {
                current_ep = self.search_layer_single(query, current_ep, layer_idx);
            }
            for layer_idx in (0..=node_layer.min(self.max_layer)).rev() {
                let neighbors =
                    self.search_layer(query, vec![current_ep], self.ef_construction, layer_idx);
                let max_conn = if layer_idx == 0 {
                    self.max_connections_0
                } else {
                    self.max_connections
                };
                let selected = self.select_neighbors(&neighbors, max_conn);
                self.layers[layer_idx].set_neighbors(node_id, selected.clone());
                for &neighbor in &selected {
                    self.add_bidirectional_connection(node_id, neighbor, layer_idx, max_conn);
                }
                if let Some(&(closest, _)) = neighbors.first() {
                    current_ep = closest;
                }
            }
        } else {
            self.entry_point = Some(node_id);
        }

        if node_layer > self.max_layer {
            self.max_layer = node_layer;
            self.entry_point = Some(node_id);
        }
        self.count += 1;
    }
}
