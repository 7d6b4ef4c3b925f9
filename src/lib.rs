//! # navmetrics: Navigation Graph Metrics
//!
//! Turns a weighted directed graph of page-to-page navigation events into
//! three diagnostics for judging how efficiently a UI can be navigated:
//!
//! - **average shortest path length** (clicks between any two pages),
//! - **closeness centrality** per page,
//! - **clustering coefficient** per page and on average.
//!
//! ## Design Principles
//!
//! 1. **Frozen input**: a [`NavGraph`] is immutable once built; every analysis
//!    pass reads the same adjacency
//! 2. **Hops, not weights**: distances count edges; weights are traffic volume
//! 3. **Undefined is not zero**: an average with nothing to average is `None`
//! 4. **Adapters own nothing**: reports and exports only read a [`MetricsSnapshot`]
//!
//! ## Quick Start
//!
//! ```rust
//! use navmetrics::{EdgeRecord, MetricsEngine, NavGraph};
//!
//! # fn example() -> navmetrics::Result<()> {
//! let graph = NavGraph::from_records(vec![
//!     EdgeRecord::new("Home", "Pricing", 12),
//!     EdgeRecord::new("Pricing", "Signup", 4),
//!     EdgeRecord::new("Signup", "Home", 1),
//! ])?;
//!
//! let snapshot = MetricsEngine::new(&graph).snapshot();
//! assert_eq!(snapshot.average_shortest_path_length, Some(1.5));
//! println!("{}", navmetrics::report::render_text(&snapshot, &Default::default()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | (default) | Sequential BFS sweeps |
//! | `parallel` | Distance-matrix rows computed on the rayon pool |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod ingest;
pub mod distance;
pub mod metrics;
pub mod report;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    NavGraph, GraphBuilder, EdgeRecord, Edge, NodeId,
};

// ============================================================================
// Re-exports: Ingestion
// ============================================================================

pub use ingest::{EdgeSource, IngestPolicy, IngestReport, InputFormat};

// ============================================================================
// Re-exports: Engines
// ============================================================================

pub use distance::DistanceMatrix;
pub use metrics::{MetricsEngine, MetricsSnapshot, GraphInfo, PathLengthStats};

// ============================================================================
// Re-exports: Configuration
// ============================================================================

pub use config::{AnalysisConfig, ReportConfig};

// ============================================================================
// Top-level pipeline
// ============================================================================

/// Run the full pipeline over an already-built graph: distances, metrics,
/// snapshot.
pub fn analyze(graph: &NavGraph, config: &AnalysisConfig) -> MetricsSnapshot {
    MetricsEngine::with_config(graph, config).snapshot()
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed edge record: missing field, wrong type or non-positive weight.
    /// `record` is the 1-based record (or line) number in the input.
    #[error("Invalid edge record {record}: {reason}")]
    InvalidEdge { record: usize, reason: String },

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
