//! Local clustering coefficient over symmetrized adjacency.

use crate::model::{NavGraph, NodeId};

/// `2·T / (k·(k−1))` where `k` is the undirected degree of `id` and `T` the
/// number of neighbor pairs joined by an edge in either direction.
///
/// Nodes with fewer than two neighbors have no possible triangle and score 0.
pub fn local_clustering(graph: &NavGraph, id: NodeId) -> f64 {
    let neighbors = graph.undirected_neighbor_ids(id);
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    let mut triangles = 0u64;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if graph.linked(a, b) {
                triangles += 1;
            }
        }
    }

    2.0 * triangles as f64 / (k * (k - 1)) as f64
}

/// Coefficient of every node, indexed by [`NodeId`].
pub fn clustering_coefficients(graph: &NavGraph) -> Vec<f64> {
    graph.node_ids().map(|id| local_clustering(graph, id)).collect()
}

/// Mean over all nodes, zeros included. `None` for an empty graph.
pub fn average_clustering(coefficients: &[f64]) -> Option<f64> {
    if coefficients.is_empty() {
        return None;
    }
    Some(coefficients.iter().sum::<f64>() / coefficients.len() as f64)
}
