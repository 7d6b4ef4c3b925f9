//! Ingestion tests against the fixture files in `tests/fixtures/`.
//!
//!   file → detect format → records → policy → graph → metrics

use std::path::PathBuf;

use navmetrics::ingest::{self, JsonEdges};
use navmetrics::{Error, IngestPolicy, InputFormat, MetricsEngine};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Fixture graphs
// ============================================================================

#[test]
fn test_hub_and_spoke() {
    let report = ingest::load_file(fixture("hub_and_spoke.json"), IngestPolicy::Abort).unwrap();
    assert_eq!(report.accepted, 6);
    assert!(report.skipped.is_empty());

    let g = &report.graph;
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 6);
    assert_eq!(g.total_weight(), 46);
    assert_eq!(g.out_degree("Homepage").unwrap(), 3);

    let snap = MetricsEngine::new(g).snapshot();
    assert_eq!(snap.average_shortest_path_length, Some(1.5));
    assert_eq!(snap.closeness("Homepage").unwrap(), 1.0);
    for page in ["Page1", "Page2", "Page3"] {
        assert_close(snap.closeness(page).unwrap(), 0.6);
        assert_eq!(snap.clustering(page).unwrap(), 0.0);
    }
    // Spokes are never linked to each other
    assert_eq!(snap.clustering("Homepage").unwrap(), 0.0);
    assert_eq!(snap.average_clustering_coefficient, Some(0.0));
}

#[test]
fn test_settings_module_jsonl() {
    let report = ingest::load_file(fixture("settings_module.jsonl"), IngestPolicy::Abort).unwrap();
    assert_eq!(report.accepted, 12);

    let g = &report.graph;
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 12);
    assert_eq!(g.total_weight(), 95);

    let snap = MetricsEngine::new(g).snapshot();
    assert_eq!(snap.average_shortest_path_length, Some(1.0));
    assert_eq!(snap.average_clustering_coefficient, Some(1.0));
    for &c in snap.closeness_centrality.values() {
        assert_eq!(c, 1.0);
    }
}

#[test]
fn test_deep_hierarchy() {
    let report = ingest::load_file(fixture("deep_hierarchy.json"), IngestPolicy::Abort).unwrap();
    let snap = MetricsEngine::new(&report.graph).snapshot();

    assert_eq!(snap.graph_info.num_nodes, 6);
    assert_eq!(snap.reachable_pairs, 30);
    assert_close(snap.average_shortest_path_length.unwrap(), 64.0 / 30.0);

    // The middle of the chain is the most central
    assert_eq!(snap.closeness("LevelB").unwrap(), 0.625);
    assert_eq!(snap.closeness("LevelC").unwrap(), 0.625);
    assert_close(snap.closeness("Home").unwrap(), 5.0 / 14.0);

    // A tree has no triangles
    assert_eq!(snap.average_clustering_coefficient, Some(0.0));
}

// ============================================================================
// Formats
// ============================================================================

#[test]
fn test_array_and_jsonl_produce_same_metrics() {
    let array = std::fs::read_to_string(fixture("hub_and_spoke.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&array).unwrap();
    let lines: String = records
        .iter()
        .map(|r| format!("{r}\n"))
        .collect();

    let from_array = ingest::load_str(&array, IngestPolicy::Abort).unwrap();
    let from_lines = ingest::load_str(&lines, IngestPolicy::Abort).unwrap();

    let a = MetricsEngine::new(&from_array.graph).snapshot();
    let b = MetricsEngine::new(&from_lines.graph).snapshot();
    assert_eq!(a, b);
}

#[test]
fn test_format_detection() {
    let array = std::fs::read_to_string(fixture("deep_hierarchy.json")).unwrap();
    let lines = std::fs::read_to_string(fixture("settings_module.jsonl")).unwrap();

    assert_eq!(JsonEdges::parse(&array).unwrap().format(), InputFormat::JsonArray);
    let parsed = JsonEdges::parse(&lines).unwrap();
    assert_eq!(parsed.format(), InputFormat::JsonLines);
    // The blank line is not a record
    assert_eq!(parsed.len(), 12);
}

#[test]
fn test_broken_document_fails_whole() {
    let err = ingest::load_str("[{\"source\": \"A\", ", IngestPolicy::Skip).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ingest::load_file(fixture("no_such_file.json"), IngestPolicy::Abort).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================================================
// Policies
// ============================================================================

#[test]
fn test_mixed_invalid_aborts_at_first_bad_line() {
    let err = ingest::load_file(fixture("mixed_invalid.jsonl"), IngestPolicy::Abort).unwrap_err();
    match err {
        Error::InvalidEdge { record, reason } => {
            assert_eq!(record, 3);
            assert!(reason.contains("target"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_mixed_invalid_skip_keeps_good_records() {
    let report = ingest::load_file(fixture("mixed_invalid.jsonl"), IngestPolicy::Skip).unwrap();

    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.record).collect();
    assert_eq!(skipped, vec![3, 4, 5]);
    assert_eq!(report.accepted, 3);

    let g = &report.graph;
    let mut pages: Vec<&str> = g.nodes().collect();
    pages.sort_unstable();
    assert_eq!(pages, vec!["Home", "Item", "Results", "Search"]);
    // The zero-weight Results -> Home line never made it in
    assert!(!g.has_edge("Results", "Home"));
    assert_eq!(g.total_weight(), 15);
}

#[test]
fn test_policy_from_config() {
    let config = navmetrics::AnalysisConfig::from_json_str(r#"{"ingest_policy": "skip"}"#).unwrap();
    let report = ingest::load_file(fixture("mixed_invalid.jsonl"), config.ingest_policy).unwrap();
    assert_eq!(report.skipped.len(), 3);
}

#[test]
fn test_positional_records_are_invalid() {
    let err = ingest::load_str(r#"[["A", "B", 2]]"#, IngestPolicy::Abort).unwrap_err();
    assert!(matches!(err, Error::InvalidEdge { record: 1, .. }));

    let report = ingest::load_str(
        "{\"source\": \"A\", \"target\": \"B\", \"weight\": 2}\n[\"A\", \"B\", 2]\n",
        IngestPolicy::Skip,
    )
    .unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].record, 2);
    assert_eq!(report.graph.weight("A", "B"), Some(2));
}

#[test]
fn test_in_memory_skips_keep_input_positions() {
    use navmetrics::EdgeRecord;

    let records = vec![
        EdgeRecord::new("Home", "Search", 4),
        EdgeRecord::new("Search", "Results", 0),
        EdgeRecord::new("Results", "Item", 0),
        EdgeRecord::new("Search", "Home", 1),
        EdgeRecord::new("Item", "Home", 0),
    ];
    let report = ingest::ingest(records, IngestPolicy::Skip).unwrap();
    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.record).collect();
    assert_eq!(skipped, vec![2, 3, 5]);
    assert_eq!(report.accepted, 2);
}
