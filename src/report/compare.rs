//! Side-by-side comparison of two analysed navigation graphs.
//!
//! Typical use is "current site vs. redesign": the left snapshot is the
//! baseline the right one is measured against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::{GraphInfo, MetricsSnapshot};

const TABLE_WIDTH: usize = 80;

/// The headline numbers of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSide {
    pub name: String,
    pub graph_info: GraphInfo,
    pub average_path_length: Option<f64>,
    pub average_clustering: Option<f64>,
    /// Highest closeness of any page.
    pub top_centrality: Option<f64>,
}

impl ComparisonSide {
    fn of(name: &str, snapshot: &MetricsSnapshot) -> Self {
        Self {
            name: name.to_string(),
            graph_info: snapshot.graph_info,
            average_path_length: snapshot.average_shortest_path_length,
            average_clustering: snapshot.average_clustering_coefficient,
            top_centrality: snapshot
                .closeness_centrality
                .values()
                .copied()
                .max_by(f64::total_cmp),
        }
    }
}

/// Differences between two snapshots. Every ratio is `None` when either side
/// is undefined or the denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: ComparisonSide,
    pub right: ComparisonSide,
    /// `left - right` node count.
    pub node_delta: i64,
    /// `left - right` edge count.
    pub edge_delta: i64,
    /// How much longer (positive) the right side's average path is, in percent of the left.
    pub path_length_change_pct: Option<f64>,
    /// Left average clustering divided by right.
    pub clustering_ratio: Option<f64>,
    /// How much higher (positive) the left side's top centrality is, in percent of the right.
    pub top_centrality_change_pct: Option<f64>,
}

pub fn compare(
    left_name: &str,
    left: &MetricsSnapshot,
    right_name: &str,
    right: &MetricsSnapshot,
) -> Comparison {
    let left = ComparisonSide::of(left_name, left);
    let right = ComparisonSide::of(right_name, right);

    Comparison {
        node_delta: left.graph_info.num_nodes as i64 - right.graph_info.num_nodes as i64,
        edge_delta: left.graph_info.num_edges as i64 - right.graph_info.num_edges as i64,
        path_length_change_pct: percent_change(right.average_path_length, left.average_path_length),
        clustering_ratio: ratio(left.average_clustering, right.average_clustering),
        top_centrality_change_pct: percent_change(left.top_centrality, right.top_centrality),
        left,
        right,
    }
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// `(value - base) / base * 100`.
fn percent_change(value: Option<f64>, base: Option<f64>) -> Option<f64> {
    ratio(value, base).map(|r| (r - 1.0) * 100.0)
}

fn cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, r) = (&self.left, &self.right);
        let rule = "=".repeat(TABLE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "NAVIGATION METRICS COMPARISON")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<30} {:<20} {:<20} {:<15}", "Metric", l.name, r.name, "Difference")?;
        writeln!(f, "{}", "-".repeat(TABLE_WIDTH))?;

        writeln!(
            f,
            "{:<30} {:<20} {:<20} {:+}",
            "Nodes (pages)", l.graph_info.num_nodes, r.graph_info.num_nodes, self.node_delta
        )?;
        writeln!(
            f,
            "{:<30} {:<20} {:<20} {:+}",
            "Edges (paths)", l.graph_info.num_edges, r.graph_info.num_edges, self.edge_delta
        )?;
        writeln!(
            f,
            "{:<30} {:<20} {:<20} {}",
            "Avg Path Length",
            cell(l.average_path_length, 2),
            cell(r.average_path_length, 2),
            self.path_length_change_pct
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:+.0}% longer")),
        )?;
        writeln!(
            f,
            "{:<30} {:<20} {:<20} {}",
            "Clustering Coefficient",
            cell(l.average_clustering, 3),
            cell(r.average_clustering, 3),
            self.clustering_ratio
                .map_or_else(|| "n/a".to_string(), |x| format!("{x:.1}x")),
        )?;
        writeln!(
            f,
            "{:<30} {:<20} {:<20} {}",
            "Top Centrality Score",
            cell(l.top_centrality, 3),
            cell(r.top_centrality, 3),
            self.top_centrality_change_pct
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:+.0}% higher")),
        )?;
        write!(f, "{rule}")
    }
}
