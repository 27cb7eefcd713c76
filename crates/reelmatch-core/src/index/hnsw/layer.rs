//! Per-layer adjacency lists.

/// Node identifier: the catalog row index.
pub type NodeId = usize;

/// One HNSW layer. Nodes absent from the layer have no neighbors.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    neighbors: Vec<Vec<NodeId>>,
}

impl Layer {
    /// Creates a layer with room for `capacity` nodes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(capacity),
        }
    }

    /// Grows the adjacency table so `node` is addressable.
    pub fn ensure_capacity(&mut self, node: NodeId) {
        if self.neighbors.len() <= node {
            self.neighbors.resize_with(node + 1, Vec::new);
        }
    }

    /// Neighbors of `node`, empty if unknown.
    #[must_use]
    pub fn get_neighbors(&self, node: NodeId) -> &[NodeId] {
        self.neighbors.get(node).map_or(&[], Vec::as_slice)
    }

    /// Replaces the neighbor list of `node`.
    pub fn set_neighbors(&mut self, node: NodeId, neighbors: Vec<NodeId>) {
        self.ensure_capacity(node);
        self.neighbors[node] = neighbors;
    }
}
