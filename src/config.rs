//! Analysis configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "ingest_policy": "skip",
//!   "report": { "top_n": 20, "clustered_n": 5, "label_width": 60, "clustered_label_width": 45 },
//!   "parallel_min_nodes": 1024
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ingest::IngestPolicy;
use crate::{Error, Result};

/// Settings for one analysis run: ingestion, engine and report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// What to do with a malformed edge record.
    pub ingest_policy: IngestPolicy,
    pub report: ReportConfig,
    /// Node count from which the distance matrix is computed on the rayon
    /// pool. Only consulted when built with the `parallel` feature.
    pub parallel_min_nodes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ingest_policy: IngestPolicy::default(),
            report: ReportConfig::default(),
            parallel_min_nodes: 512,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading analysis config");
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<()> {
        let widths = [
            ("label_width", self.report.label_width),
            ("clustered_label_width", self.report.clustered_label_width),
        ];
        for (name, width) in widths {
            if width < 4 {
                return Err(Error::Config(format!(
                    "report.{name} must be at least 4, got {width}"
                )));
            }
        }
        Ok(())
    }
}

/// Sizes for the human-readable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Nodes listed in the closeness ranking.
    pub top_n: usize,
    /// Nodes listed in each of the most/least clustered lists.
    pub clustered_n: usize,
    /// Labels longer than this are cut and suffixed with `...` in the
    /// closeness ranking.
    pub label_width: usize,
    /// Same, for the most/least clustered lists.
    pub clustered_label_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            clustered_n: 5,
            label_width: 50,
            clustered_label_width: 45,
        }
    }
}
