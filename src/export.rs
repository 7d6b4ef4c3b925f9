//! Metrics export: serialize a snapshot as the JSON document consumed by
//! dashboards and follow-up analysis.
//!
//! ```text
//! MetricsSnapshot → export_metrics_json() → {
//!   "graph_info": {"num_nodes", "num_edges", "total_weight"},
//!   "average_shortest_path_length": number | null,
//!   "average_clustering_coefficient": number | null,
//!   "closeness_centrality": {"<page>": number, ...},
//!   "clustering_coefficient": {"<page>": number, ...}
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metrics::{GraphInfo, MetricsSnapshot};
use crate::Result;

/// The export document. Borrowed from a snapshot when writing, owned when
/// read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsExport {
    pub graph_info: GraphInfo,
    pub average_shortest_path_length: Option<f64>,
    pub average_clustering_coefficient: Option<f64>,
    pub closeness_centrality: BTreeMap<String, f64>,
    pub clustering_coefficient: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct MetricsExportRef<'a> {
    graph_info: &'a GraphInfo,
    average_shortest_path_length: Option<f64>,
    average_clustering_coefficient: Option<f64>,
    closeness_centrality: &'a BTreeMap<String, f64>,
    clustering_coefficient: &'a BTreeMap<String, f64>,
}

impl<'a> From<&'a MetricsSnapshot> for MetricsExportRef<'a> {
    fn from(s: &'a MetricsSnapshot) -> Self {
        Self {
            graph_info: &s.graph_info,
            average_shortest_path_length: s.average_shortest_path_length,
            average_clustering_coefficient: s.average_clustering_coefficient,
            closeness_centrality: &s.closeness_centrality,
            clustering_coefficient: &s.clustering_coefficient,
        }
    }
}

/// Write the export document (pretty-printed, trailing newline) to `writer`.
pub fn export_metrics_json(snapshot: &MetricsSnapshot, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &MetricsExportRef::from(snapshot))?;
    writeln!(writer)?;
    Ok(())
}

/// Write the export document to a file, replacing it if it exists.
pub fn export_metrics_file(snapshot: &MetricsSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    export_metrics_json(snapshot, &mut file)?;
    file.flush()?;
    tracing::info!(path = %path.display(), "metrics exported");
    Ok(())
}

/// The export document as a JSON value.
pub fn to_json_value(snapshot: &MetricsSnapshot) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(MetricsExportRef::from(snapshot))?)
}

/// Parse a previously exported document.
pub fn read_metrics_json(json: &str) -> Result<MetricsExport> {
    Ok(serde_json::from_str(json)?)
}
