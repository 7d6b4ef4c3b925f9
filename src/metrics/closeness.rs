//! Closeness centrality on the reachable subgraph.
//!
//! For a node `u` that reaches `r` other nodes at total distance `s`, the
//! centrality is `r / s`. Nodes outside `u`'s reach do not penalize it, and a
//! node that reaches nothing scores 0.

use crate::distance::{DistanceMatrix, UNREACHABLE};
use crate::model::NodeId;

/// Centrality of `source` from its distance row.
pub fn closeness_of(distances: &DistanceMatrix, source: NodeId) -> f64 {
    let (reachable, total) = distances
        .row(source)
        .iter()
        .filter(|&&d| d != 0 && d != UNREACHABLE)
        .fold((0u64, 0u64), |(r, t), &d| (r + 1, t + u64::from(d)));

    if reachable == 0 {
        0.0
    } else {
        reachable as f64 / total as f64
    }
}

/// Centrality of every node, indexed by [`NodeId`].
pub fn closeness_centrality(distances: &DistanceMatrix) -> Vec<f64> {
    (0..distances.node_count())
        .map(|i| closeness_of(distances, NodeId::from(i)))
        .collect()
}
