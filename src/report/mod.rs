//! # Report Adapter
//!
//! Turns a [`MetricsSnapshot`] into something people read: a structured
//! [`Summary`] with rating buckets and rankings, and a plain-text report.
//! Nothing here computes metrics; it only sorts, slices and thresholds what
//! the engine already produced.
//!
//! Rating thresholds:
//!
//! | Average path length | Rating |
//! |---------------------|--------|
//! | < 2.5 | Excellent |
//! | 2.5 – < 4.0 | Good |
//! | 4.0 – < 6.0 | Fair |
//! | ≥ 6.0 | Poor |
//!
//! | Average clustering | Rating |
//! |--------------------|--------|
//! | > 0.85 | High |
//! | > 0.6 | Moderate |
//! | otherwise | Low |

pub mod compare;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::metrics::{GraphInfo, MetricsSnapshot};

pub use compare::{compare, Comparison, ComparisonSide};

const RULE_WIDTH: usize = 70;

// ============================================================================
// Ratings
// ============================================================================

/// Qualitative bucket for the average shortest path length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PathRating {
    pub fn classify(average: f64) -> Self {
        if average < 2.5 {
            PathRating::Excellent
        } else if average < 4.0 {
            PathRating::Good
        } else if average < 6.0 {
            PathRating::Fair
        } else {
            PathRating::Poor
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            PathRating::Excellent => "EXCELLENT - Very efficient navigation",
            PathRating::Good => "GOOD - Reasonable navigation efficiency",
            PathRating::Fair => "FAIR - Consider shortening some paths",
            PathRating::Poor => "POOR - UI has very long navigation paths",
        }
    }
}

/// Qualitative bucket for the average clustering coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusteringRating {
    High,
    Moderate,
    Low,
}

impl ClusteringRating {
    pub fn classify(average: f64) -> Self {
        if average > 0.85 {
            ClusteringRating::High
        } else if average > 0.6 {
            ClusteringRating::Moderate
        } else {
            ClusteringRating::Low
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            ClusteringRating::High => "HIGH - Strong modularity, well-organized sections",
            ClusteringRating::Moderate => "MODERATE - Decent local connectivity",
            ClusteringRating::Low => "LOW - Pages could be better interconnected",
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// A page and its score in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLengthSummary {
    pub average: Option<f64>,
    pub reachable_pairs: u64,
    pub unreachable_pairs: u64,
    pub rating: Option<PathRating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteringSummary {
    pub average: Option<f64>,
    pub rating: Option<ClusteringRating>,
}

/// Serializable digest of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub graph_info: GraphInfo,
    pub path_length: PathLengthSummary,
    pub clustering: ClusteringSummary,
    /// Highest closeness first, at most `top_n` entries.
    pub top_central: Vec<RankedNode>,
    /// Nodes left out of `top_central`.
    pub remaining_nodes: usize,
    /// Highest clustering first; zero scores are never listed.
    pub most_clustered: Vec<RankedNode>,
    /// Lowest clustering first.
    pub least_clustered: Vec<RankedNode>,
}

impl Summary {
    pub fn from_snapshot(snapshot: &MetricsSnapshot, config: &ReportConfig) -> Self {
        let central = rank_descending(&snapshot.closeness_centrality);
        let remaining_nodes = central.len().saturating_sub(config.top_n);
        let top_central = central.into_iter().take(config.top_n).collect();

        let most_clustered = rank_descending(&snapshot.clustering_coefficient)
            .into_iter()
            .take(config.clustered_n)
            .filter(|n| n.score > 0.0)
            .collect();
        let least_clustered = rank_ascending(&snapshot.clustering_coefficient)
            .into_iter()
            .take(config.clustered_n)
            .collect();

        Self {
            graph_info: snapshot.graph_info,
            path_length: PathLengthSummary {
                average: snapshot.average_shortest_path_length,
                reachable_pairs: snapshot.reachable_pairs,
                unreachable_pairs: snapshot.unreachable_pairs,
                rating: snapshot.average_shortest_path_length.map(PathRating::classify),
            },
            clustering: ClusteringSummary {
                average: snapshot.average_clustering_coefficient,
                rating: snapshot.average_clustering_coefficient.map(ClusteringRating::classify),
            },
            top_central,
            remaining_nodes,
            most_clustered,
            least_clustered,
        }
    }
}

/// Score descending, label ascending on ties.
fn rank_descending(scores: &BTreeMap<String, f64>) -> Vec<RankedNode> {
    let mut ranked = to_ranked(scores);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
    ranked
}

/// Score ascending, label ascending on ties.
fn rank_ascending(scores: &BTreeMap<String, f64>) -> Vec<RankedNode> {
    let mut ranked = to_ranked(scores);
    ranked.sort_by(|a, b| match a.score.total_cmp(&b.score) {
        Ordering::Equal => a.label.cmp(&b.label),
        other => other,
    });
    ranked
}

fn to_ranked(scores: &BTreeMap<String, f64>) -> Vec<RankedNode> {
    scores
        .iter()
        .map(|(label, &score)| RankedNode { label: label.clone(), score })
        .collect()
}

/// Cut `label` to `width` characters, marking the cut with `...`.
pub fn truncate_label(label: &str, width: usize) -> Cow<'_, str> {
    match label.char_indices().nth(width) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &label[..cut])),
        None => Cow::Borrowed(label),
    }
}

// ============================================================================
// Text report
// ============================================================================

/// Plain-text rendering of a [`Summary`].
pub struct TextReport<'a> {
    summary: &'a Summary,
    label_width: usize,
    clustered_label_width: usize,
}

impl<'a> TextReport<'a> {
    pub fn new(summary: &'a Summary, config: &ReportConfig) -> Self {
        Self {
            summary,
            label_width: config.label_width,
            clustered_label_width: config.clustered_label_width,
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "UI NAVIGATION GRAPH METRICS REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        writeln!(f, "GRAPH STRUCTURE")?;
        writeln!(f, "  Nodes (pages/elements): {}", s.graph_info.num_nodes)?;
        writeln!(f, "  Edges (navigation paths): {}", s.graph_info.num_edges)?;
        writeln!(f, "  Total navigation events: {}", s.graph_info.total_weight)?;
        writeln!(f)?;

        writeln!(f, "AVERAGE SHORTEST PATH LENGTH")?;
        match (s.path_length.average, s.path_length.rating) {
            (Some(avg), Some(rating)) => {
                writeln!(f, "  L = {avg:.3} clicks")?;
                writeln!(f, "  Interpretation: On average, users need {avg:.1} clicks")?;
                writeln!(f, "                  to navigate between any two pages.")?;
                if s.path_length.unreachable_pairs > 0 {
                    writeln!(
                        f,
                        "  Note: {} unreachable page pairs excluded from the average",
                        s.path_length.unreachable_pairs
                    )?;
                }
                writeln!(f, "  {}", rating.verdict())?;
            }
            _ => writeln!(f, "  Undefined (no page can reach another page)")?,
        }
        writeln!(f)?;

        writeln!(f, "CLOSENESS CENTRALITY (Top {} Most Central Pages)", s.top_central.len())?;
        for (i, node) in s.top_central.iter().enumerate() {
            writeln!(f, "  {:2}. {}", i + 1, truncate_label(&node.label, self.label_width))?;
            writeln!(f, "      Centrality: {:.4}", node.score)?;
        }
        if s.remaining_nodes > 0 {
            writeln!(f, "  ... and {} more nodes", s.remaining_nodes)?;
        }
        writeln!(f)?;

        writeln!(f, "CLUSTERING COEFFICIENT")?;
        match (s.clustering.average, s.clustering.rating) {
            (Some(avg), Some(rating)) => {
                writeln!(f, "  Average: {avg:.4}")?;
                writeln!(f, "  Interpretation: {:.1}% of possible neighbor", avg * 100.0)?;
                writeln!(f, "                  connections are realized.")?;
                writeln!(f, "  {}", rating.verdict())?;
            }
            _ => writeln!(f, "  Undefined (empty graph)")?,
        }
        writeln!(f)?;

        writeln!(f, "  Most Clustered Nodes (Top {}):", s.most_clustered.len())?;
        for (i, node) in s.most_clustered.iter().enumerate() {
            writeln!(f, "    {}. {}: {:.3}", i + 1, truncate_label(&node.label, self.clustered_label_width), node.score)?;
        }
        writeln!(f)?;

        writeln!(f, "  Least Clustered Nodes (Bottom {}):", s.least_clustered.len())?;
        for (i, node) in s.least_clustered.iter().enumerate() {
            writeln!(f, "    {}. {}: {:.3}", i + 1, truncate_label(&node.label, self.clustered_label_width), node.score)?;
        }
        writeln!(f)?;
        write!(f, "{rule}")
    }
}

/// Summarize `snapshot` and render it as text.
pub fn render_text(snapshot: &MetricsSnapshot, config: &ReportConfig) -> String {
    let summary = Summary::from_snapshot(snapshot, config);
    TextReport::new(&summary, config).to_string()
}
