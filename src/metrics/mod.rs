//! # Metrics Engine
//!
//! Derives the three navigation diagnostics from a frozen [`NavGraph`]:
//!
//! | Metric | Needs distances | Module |
//! |--------|-----------------|--------|
//! | Average shortest path length | yes | `path_length` |
//! | Closeness centrality | yes | `closeness` |
//! | Clustering coefficient | no | `clustering` |
//!
//! [`MetricsEngine`] computes the distance matrix lazily, at most once, and
//! only when a distance-based metric is requested. Callers may ask for any
//! subset; [`MetricsEngine::snapshot`] gathers all of them into an immutable
//! [`MetricsSnapshot`].

pub mod path_length;
pub mod closeness;
pub mod clustering;

use std::cell::OnceCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::distance::DistanceMatrix;
use crate::model::NavGraph;
use crate::Result;

pub use path_length::{path_length_stats, PathLengthStats};
pub use closeness::{closeness_centrality, closeness_of};
pub use clustering::{average_clustering, clustering_coefficients, local_clustering};

// ============================================================================
// Snapshot
// ============================================================================

/// Size summary of the analysed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInfo {
    pub num_nodes: usize,
    /// Distinct ordered pairs.
    pub num_edges: usize,
    pub total_weight: u64,
}

impl GraphInfo {
    pub fn of(graph: &NavGraph) -> Self {
        Self {
            num_nodes: graph.node_count(),
            num_edges: graph.edge_count(),
            total_weight: graph.total_weight(),
        }
    }
}

/// Every metric for one graph, computed in one pass.
///
/// Per-node maps are keyed by page label and ordered, so two snapshots of the
/// same input compare (and serialize) identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub graph_info: GraphInfo,
    pub average_shortest_path_length: Option<f64>,
    pub reachable_pairs: u64,
    pub unreachable_pairs: u64,
    pub average_clustering_coefficient: Option<f64>,
    pub closeness_centrality: BTreeMap<String, f64>,
    pub clustering_coefficient: BTreeMap<String, f64>,
}

impl MetricsSnapshot {
    /// Centrality of one page.
    pub fn closeness(&self, label: &str) -> Result<f64> {
        self.closeness_centrality
            .get(label)
            .copied()
            .ok_or_else(|| crate::Error::UnknownNode(label.to_string()))
    }

    /// Clustering coefficient of one page.
    pub fn clustering(&self, label: &str) -> Result<f64> {
        self.clustering_coefficient
            .get(label)
            .copied()
            .ok_or_else(|| crate::Error::UnknownNode(label.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.graph_info.num_nodes == 0
    }
}

// ============================================================================
// MetricsEngine
// ============================================================================

/// Computes metrics over one graph, sharing a single distance matrix.
pub struct MetricsEngine<'g> {
    graph: &'g NavGraph,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel_min_nodes: usize,
    distances: OnceCell<DistanceMatrix>,
}

impl<'g> MetricsEngine<'g> {
    pub fn new(graph: &'g NavGraph) -> Self {
        Self::with_config(graph, &AnalysisConfig::default())
    }

    pub fn with_config(graph: &'g NavGraph, config: &AnalysisConfig) -> Self {
        Self {
            graph,
            parallel_min_nodes: config.parallel_min_nodes,
            distances: OnceCell::new(),
        }
    }

    pub fn graph(&self) -> &'g NavGraph {
        self.graph
    }

    /// The distance matrix, computed on first use.
    pub fn distances(&self) -> &DistanceMatrix {
        self.distances.get_or_init(|| self.compute_distances())
    }

    fn compute_distances(&self) -> DistanceMatrix {
        #[cfg(feature = "parallel")]
        if self.graph.node_count() >= self.parallel_min_nodes {
            return DistanceMatrix::compute_parallel(self.graph);
        }
        DistanceMatrix::compute(self.graph)
    }

    // ========================================================================
    // Path length
    // ========================================================================

    pub fn path_length(&self) -> PathLengthStats {
        path_length_stats(self.distances())
    }

    pub fn average_shortest_path_length(&self) -> Option<f64> {
        self.path_length().average
    }

    // ========================================================================
    // Closeness
    // ========================================================================

    pub fn closeness_centrality(&self) -> BTreeMap<String, f64> {
        self.by_label(closeness_centrality(self.distances()))
    }

    pub fn closeness(&self, label: &str) -> Result<f64> {
        let id = self.graph.resolve(label)?;
        Ok(closeness_of(self.distances(), id))
    }

    // ========================================================================
    // Clustering
    // ========================================================================

    pub fn clustering_coefficients(&self) -> BTreeMap<String, f64> {
        self.by_label(clustering_coefficients(self.graph))
    }

    pub fn clustering(&self, label: &str) -> Result<f64> {
        let id = self.graph.resolve(label)?;
        Ok(local_clustering(self.graph, id))
    }

    pub fn average_clustering_coefficient(&self) -> Option<f64> {
        average_clustering(&clustering_coefficients(self.graph))
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    pub fn snapshot(&self) -> MetricsSnapshot {
        let path = self.path_length();
        let clustering = clustering_coefficients(self.graph);
        let average_clustering_coefficient = average_clustering(&clustering);

        tracing::info!(
            nodes = self.graph.node_count(),
            average_path_length = ?path.average,
            unreachable_pairs = path.unreachable_pairs,
            average_clustering = ?average_clustering_coefficient,
            "navigation metrics computed"
        );

        MetricsSnapshot {
            graph_info: GraphInfo::of(self.graph),
            average_shortest_path_length: path.average,
            reachable_pairs: path.reachable_pairs,
            unreachable_pairs: path.unreachable_pairs,
            average_clustering_coefficient,
            closeness_centrality: self.by_label(closeness_centrality(self.distances())),
            clustering_coefficient: self.by_label(clustering),
        }
    }

    fn by_label(&self, values: Vec<f64>) -> BTreeMap<String, f64> {
        self.graph
            .nodes()
            .map(str::to_string)
            .zip(values)
            .collect()
    }
}
