//! The navigation graph: interned page labels, merged directed edges and the
//! adjacency derived from them.
//!
//! A [`NavGraph`] is assembled through a [`GraphBuilder`] and is immutable
//! afterwards. Every analysis pass reads the same frozen adjacency, so the
//! distance and metrics engines never have to worry about edges changing
//! underneath them.
//!
//! ## Adjacency rules
//!
//! - Duplicate records for one ordered pair merge into a single edge whose
//!   weight is the sum of the record weights.
//! - Self-loops are stored (they count toward `edge_count` and
//!   `total_weight`) but never appear in neighbor lists.
//! - `successors` / `predecessors` follow edge direction; the undirected
//!   neighbor set is their union and is only meant for clustering.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;

use super::{Edge, EdgeRecord, NodeId};
use crate::{Error, Result};

/// Inline neighbor list. Navigation pages rarely link to more than a handful
/// of distinct targets, so most lists never spill to the heap.
pub type Neighbors = SmallVec<[NodeId; 8]>;

// ============================================================================
// GraphBuilder
// ============================================================================

/// Accumulates edge records into a [`NavGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    weights: HashMap<(NodeId, NodeId), u64>,
    /// Distinct ordered pairs in first-seen order.
    pairs: Vec<(NodeId, NodeId)>,
    /// Highest 1-based input position offered so far, accepted or not.
    position: usize,
    records: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one edge, registering both endpoints if they are new.
    ///
    /// The edge is numbered as the next input position. A zero weight is
    /// rejected with [`Error::InvalidEdge`]; nothing is recorded for a
    /// rejected edge.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: u64) -> Result<()> {
        self.insert(self.position + 1, source, target, weight)
    }

    /// Add an owned record as the next input position.
    pub fn add_record(&mut self, record: &EdgeRecord) -> Result<()> {
        self.add_record_at(self.position + 1, record)
    }

    /// Add a record whose 1-based position in the input is already known.
    pub fn add_record_at(&mut self, position: usize, record: &EdgeRecord) -> Result<()> {
        self.insert(position, &record.source, &record.target, record.weight)
    }

    fn insert(&mut self, position: usize, source: &str, target: &str, weight: u64) -> Result<()> {
        self.position = self.position.max(position);
        if weight == 0 {
            return Err(Error::InvalidEdge {
                record: position,
                reason: format!("weight for {source} -> {target} must be positive, got 0"),
            });
        }
        self.records += 1;

        let src = self.intern(source);
        let dst = self.intern(target);

        match self.weights.entry((src, dst)) {
            Entry::Occupied(mut slot) => {
                let merged = slot.get().saturating_add(weight);
                slot.insert(merged);
            }
            Entry::Vacant(slot) => {
                slot.insert(weight);
                self.pairs.push((src, dst));
            }
        }
        Ok(())
    }

    /// Number of records accepted so far.
    pub fn records(&self) -> usize {
        self.records
    }

    fn intern(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = NodeId::from(self.labels.len());
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Freeze the builder into an immutable graph.
    pub fn build(self) -> NavGraph {
        let n = self.labels.len();
        let mut successors = vec![Neighbors::new(); n];
        let mut predecessors = vec![Neighbors::new(); n];

        for &(src, dst) in &self.pairs {
            if src == dst {
                continue;
            }
            successors[src.index()].push(dst);
            predecessors[dst.index()].push(src);
        }

        let total_weight = self.weights.values().fold(0u64, |acc, w| acc.saturating_add(*w));

        tracing::info!(
            nodes = n,
            edges = self.pairs.len(),
            total_weight,
            records = self.records,
            "navigation graph built"
        );

        NavGraph {
            labels: self.labels,
            index: self.index,
            weights: self.weights,
            pairs: self.pairs,
            successors,
            predecessors,
            total_weight,
        }
    }
}

// ============================================================================
// NavGraph
// ============================================================================

/// Immutable directed, weighted navigation graph.
#[derive(Debug, Clone)]
pub struct NavGraph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    weights: HashMap<(NodeId, NodeId), u64>,
    pairs: Vec<(NodeId, NodeId)>,
    successors: Vec<Neighbors>,
    predecessors: Vec<Neighbors>,
    total_weight: u64,
}

impl NavGraph {
    /// Build a graph from a sequence of records, failing on the first invalid one.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut builder = GraphBuilder::new();
        for record in records {
            builder.add_record(&record)?;
        }
        Ok(builder.build())
    }

    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    // ========================================================================
    // Size
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Distinct ordered pairs; merged duplicates count once.
    pub fn edge_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    // ========================================================================
    // Node lookup
    // ========================================================================

    /// All node labels, in first-appearance order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.labels.len()).map(NodeId::from)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Like [`node_id`](Self::node_id) but an unknown label is an error.
    pub fn resolve(&self, label: &str) -> Result<NodeId> {
        self.node_id(label)
            .ok_or_else(|| Error::UnknownNode(label.to_string()))
    }

    /// Label of an interned node.
    ///
    /// # Panics
    ///
    /// If `id` did not come from this graph.
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id.index()]
    }

    // ========================================================================
    // Adjacency by id
    // ========================================================================

    /// Direct successors, self-loops excluded.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id.index()]
    }

    /// Direct predecessors, self-loops excluded.
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.predecessors[id.index()]
    }

    /// Successors ∪ predecessors, sorted and deduplicated.
    pub fn undirected_neighbor_ids(&self, id: NodeId) -> Neighbors {
        let mut merged: Neighbors = self.successors(id)
            .iter()
            .chain(self.predecessors(id))
            .copied()
            .collect();
        merged.sort_unstable();
        merged.dedup();
        merged
    }

    /// True when an edge exists from `a` to `b` or from `b` to `a`.
    pub fn linked(&self, a: NodeId, b: NodeId) -> bool {
        self.weights.contains_key(&(a, b)) || self.weights.contains_key(&(b, a))
    }

    // ========================================================================
    // Adjacency by label
    // ========================================================================

    pub fn out_neighbors(&self, label: &str) -> Result<Vec<&str>> {
        let id = self.resolve(label)?;
        Ok(self.successors(id).iter().map(|&n| self.label(n)).collect())
    }

    pub fn in_neighbors(&self, label: &str) -> Result<Vec<&str>> {
        let id = self.resolve(label)?;
        Ok(self.predecessors(id).iter().map(|&n| self.label(n)).collect())
    }

    /// Union of out- and in-neighbors. Used by the clustering computation.
    pub fn undirected_neighbors(&self, label: &str) -> Result<Vec<&str>> {
        let id = self.resolve(label)?;
        Ok(self.undirected_neighbor_ids(id)
            .into_iter()
            .map(|n| self.label(n))
            .collect())
    }

    pub fn out_degree(&self, label: &str) -> Result<usize> {
        Ok(self.successors(self.resolve(label)?).len())
    }

    pub fn in_degree(&self, label: &str) -> Result<usize> {
        Ok(self.predecessors(self.resolve(label)?).len())
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Merged weight of the edge `source -> target`, if it exists.
    pub fn weight(&self, source: &str, target: &str) -> Option<u64> {
        let src = self.node_id(source)?;
        let dst = self.node_id(target)?;
        self.weights.get(&(src, dst)).copied()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.weight(source, target).is_some()
    }

    /// Merged edges in first-seen order, self-loops included.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.pairs.iter().map(|&(src, dst)| Edge {
            src,
            dst,
            weight: self.weights[&(src, dst)],
        })
    }
}
