//! Edge records (the wire shape) and aggregated edges (the stored shape).

use serde::{Deserialize, Serialize};
use super::NodeId;

/// One observed navigation event batch: `source` was followed to `target`
/// `weight` times.
///
/// This is the exact per-edge shape every upstream producer must emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// A logical edge after duplicate records have been merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    /// Sum of the weights of every record for this ordered pair.
    pub weight: u64,
}
