//! Node identity in the navigation graph.

use serde::{Deserialize, Serialize};

/// Dense node identifier, assigned in first-appearance order.
///
/// The public API speaks in page labels; `NodeId` is the interned form used by
/// the distance and metrics engines to index rows and adjacency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index as u32)
    }
}
