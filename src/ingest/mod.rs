//! # Edge Ingestion
//!
//! [`EdgeSource`] is the contract for whatever produces navigation events
//! (a crawler, a log exporter, a test fixture). The loader drains a source
//! into a [`GraphBuilder`], applying an explicit [`IngestPolicy`] to
//! malformed records:
//!
//! | Policy | On an invalid record |
//! |--------|----------------------|
//! | `Abort` (default) | The load fails with that record's [`Error::InvalidEdge`] |
//! | `Skip` | The record is logged, listed in [`IngestReport::skipped`], and the load continues |

pub mod json;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{EdgeRecord, GraphBuilder, NavGraph};
use crate::{Error, Result};

pub use json::JsonEdges;

// ============================================================================
// Source contract
// ============================================================================

/// Anything that can yield edge records in order.
///
/// Each item is either a well-formed record or the error describing why that
/// particular record is unusable.
pub trait EdgeSource {
    fn into_records(self) -> impl Iterator<Item = Result<EdgeRecord>>;
}

impl EdgeSource for Vec<EdgeRecord> {
    fn into_records(self) -> impl Iterator<Item = Result<EdgeRecord>> {
        self.into_iter().map(Ok)
    }
}

impl EdgeSource for Vec<Result<EdgeRecord>> {
    fn into_records(self) -> impl Iterator<Item = Result<EdgeRecord>> {
        self.into_iter()
    }
}

// ============================================================================
// Policy / format / report
// ============================================================================

/// How the loader treats a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
    /// Stop at the first invalid record.
    #[default]
    Abort,
    /// Drop invalid records and keep going.
    Skip,
}

/// Layout of a textual edge document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    /// A single JSON array of edge objects.
    JsonArray,
    /// One edge object per line.
    JsonLines,
}

impl InputFormat {
    /// `[` as first non-whitespace character means an array; anything else is
    /// read as JSON Lines.
    pub fn detect(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('[') => InputFormat::JsonArray,
            _ => InputFormat::JsonLines,
        }
    }
}

/// A record dropped under [`IngestPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based record (array) or line (JSONL) number.
    pub record: usize,
    pub reason: String,
}

/// Outcome of a load.
#[derive(Debug)]
pub struct IngestReport {
    pub graph: NavGraph,
    pub accepted: usize,
    pub skipped: Vec<SkippedRecord>,
}

// ============================================================================
// Loader
// ============================================================================

/// Drain `source` into a graph under `policy`.
pub fn ingest<S: EdgeSource>(source: S, policy: IngestPolicy) -> Result<IngestReport> {
    let mut builder = GraphBuilder::new();
    let mut skipped = Vec::new();

    for (index, item) in source.into_records().enumerate() {
        let outcome = item.and_then(|record| builder.add_record_at(index + 1, &record));
        match (outcome, policy) {
            (Ok(()), _) => {}
            (Err(e), IngestPolicy::Abort) => return Err(e),
            (Err(Error::InvalidEdge { record, reason }), IngestPolicy::Skip) => {
                tracing::warn!(record, %reason, "skipping invalid edge record");
                skipped.push(SkippedRecord { record, reason });
            }
            (Err(e), IngestPolicy::Skip) => return Err(e),
        }
    }

    let accepted = builder.records();
    if !skipped.is_empty() {
        tracing::warn!(accepted, skipped = skipped.len(), "edge records skipped during load");
    }

    Ok(IngestReport {
        graph: builder.build(),
        accepted,
        skipped,
    })
}

/// Load a JSON array or JSONL document held in memory.
pub fn load_str(text: &str, policy: IngestPolicy) -> Result<IngestReport> {
    ingest(JsonEdges::parse(text)?, policy)
}

/// Load a JSON array or JSONL file.
pub fn load_file(path: impl AsRef<Path>, policy: IngestPolicy) -> Result<IngestReport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let edges = JsonEdges::parse(&text)?;
    tracing::info!(path = %path.display(), format = ?edges.format(), records = edges.len(), "loading navigation edges");
    ingest(edges, policy)
}
