//! Average shortest path length.

use serde::{Deserialize, Serialize};

use crate::distance::{DistanceMatrix, UNREACHABLE};

/// Aggregate over every ordered pair `u != v`.
///
/// Unreachable pairs are excluded from `average` and counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLengthStats {
    /// Mean hop count over reachable pairs; `None` when no pair is reachable.
    pub average: Option<f64>,
    pub reachable_pairs: u64,
    pub unreachable_pairs: u64,
    pub total_hops: u64,
}

pub fn path_length_stats(distances: &DistanceMatrix) -> PathLengthStats {
    let mut total_hops = 0u64;
    let mut reachable_pairs = 0u64;
    let mut unreachable_pairs = 0u64;

    for source in 0..distances.node_count() {
        for (target, &d) in distances.row(source.into()).iter().enumerate() {
            if target == source {
                continue;
            }
            if d == UNREACHABLE {
                unreachable_pairs += 1;
            } else {
                total_hops += u64::from(d);
                reachable_pairs += 1;
            }
        }
    }

    if unreachable_pairs > 0 {
        tracing::warn!(unreachable_pairs, reachable_pairs, "graph has unreachable node pairs; excluded from average");
    }

    let average = (reachable_pairs > 0).then(|| total_hops as f64 / reachable_pairs as f64);

    PathLengthStats {
        average,
        reachable_pairs,
        unreachable_pairs,
        total_hops,
    }
}
