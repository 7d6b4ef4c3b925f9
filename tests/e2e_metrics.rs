//! End-to-end tests for the metrics pipeline.
//!
//! Each test builds a small navigation graph whose metrics can be worked out
//! by hand and checks the full pass: records -> graph -> distances -> snapshot.

use navmetrics::{
    AnalysisConfig, DistanceMatrix, EdgeRecord, Error, MetricsEngine, MetricsSnapshot, NavGraph,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn graph(edges: &[(&str, &str)]) -> NavGraph {
    NavGraph::from_records(edges.iter().map(|(s, t)| EdgeRecord::new(*s, *t, 1))).unwrap()
}

/// Both directions for every listed pair.
fn bidirectional(pairs: &[(&str, &str)]) -> NavGraph {
    let edges: Vec<(&str, &str)> = pairs
        .iter()
        .flat_map(|&(a, b)| [(a, b), (b, a)])
        .collect();
    graph(&edges)
}

fn snapshot(g: &NavGraph) -> MetricsSnapshot {
    MetricsEngine::new(g).snapshot()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// 1. Distances
// ============================================================================

#[test]
fn test_self_distance_is_zero() {
    let g = graph(&[("A", "B"), ("B", "C"), ("C", "C"), ("D", "A")]);
    let dm = DistanceMatrix::compute(&g);
    for page in g.nodes() {
        assert_eq!(dm.distance(&g, page, page).unwrap(), Some(0));
    }
}

#[test]
fn test_distances_are_directed() {
    let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let dm = DistanceMatrix::compute(&g);
    assert_eq!(dm.distance(&g, "A", "B").unwrap(), Some(1));
    assert_eq!(dm.distance(&g, "B", "A").unwrap(), Some(2));
}

// ============================================================================
// 2. Duplicate merging
// ============================================================================

#[test]
fn test_duplicate_records_merge() {
    let g = NavGraph::from_records(vec![
        EdgeRecord::new("Home", "Cart", 3),
        EdgeRecord::new("Home", "Cart", 9),
        EdgeRecord::new("Cart", "Checkout", 1),
    ])
    .unwrap();

    assert_eq!(g.weight("Home", "Cart"), Some(12));
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.total_weight(), 13);

    let snap = snapshot(&g);
    assert_eq!(snap.graph_info.num_edges, 2);
    assert_eq!(snap.graph_info.total_weight, 13);
}

#[test]
fn test_weights_do_not_change_distances() {
    let light = graph(&[("A", "B"), ("B", "C"), ("A", "C")]);
    let heavy = NavGraph::from_records(vec![
        EdgeRecord::new("A", "B", 1000),
        EdgeRecord::new("B", "C", 1000),
        EdgeRecord::new("A", "C", 1),
    ])
    .unwrap();

    let a = snapshot(&light);
    let b = snapshot(&heavy);
    assert_eq!(a.average_shortest_path_length, b.average_shortest_path_length);
    assert_eq!(a.closeness_centrality, b.closeness_centrality);
}

// ============================================================================
// 3. Average shortest path length
// ============================================================================

#[test]
fn test_directed_three_cycle_average() {
    let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let snap = snapshot(&g);
    assert_eq!(snap.average_shortest_path_length, Some(1.5));
    assert_eq!(snap.reachable_pairs, 6);
    assert_eq!(snap.unreachable_pairs, 0);
}

#[test]
fn test_disconnected_components() {
    // Component sizes 2 and 3, each strongly connected
    let mut pairs = vec![("A", "B")];
    pairs.extend([("X", "Y"), ("Y", "Z"), ("X", "Z")]);
    let g = bidirectional(&pairs);

    let snap = snapshot(&g);
    assert_eq!(snap.unreachable_pairs, 2 * 3 * 2);
    assert_eq!(snap.reachable_pairs, 8);
    // Every reachable pair is one hop apart
    assert_eq!(snap.average_shortest_path_length, Some(1.0));
}

#[test]
fn test_all_pairs_unreachable_is_undefined() {
    let g = graph(&[("A", "A"), ("B", "B"), ("C", "C")]);
    let snap = snapshot(&g);
    assert_eq!(snap.average_shortest_path_length, None);
    assert_eq!(snap.unreachable_pairs, 6);
}

// ============================================================================
// 4. Closeness centrality
// ============================================================================

#[test]
fn test_out_star_closeness() {
    let g = graph(&[("H", "l1"), ("H", "l2"), ("H", "l3"), ("H", "l4")]);
    let engine = MetricsEngine::new(&g);

    assert!(engine.closeness("H").unwrap() > 0.0);
    for leaf in ["l1", "l2", "l3", "l4"] {
        assert_eq!(engine.closeness(leaf).unwrap(), 0.0);
    }
}

#[test]
fn test_closeness_uses_reachable_subgraph() {
    // A reaches B (1) and C (2); D -> E is unrelated
    let g = graph(&[("A", "B"), ("B", "C"), ("D", "E")]);
    let engine = MetricsEngine::new(&g);
    assert_close(engine.closeness("A").unwrap(), 2.0 / 3.0);
    assert_eq!(engine.closeness("D").unwrap(), 1.0);
}

// ============================================================================
// 5. Clustering coefficient
// ============================================================================

#[test]
fn test_low_degree_clustering_is_zero() {
    let g = graph(&[("Iso", "Iso"), ("A", "B")]);
    let engine = MetricsEngine::new(&g);
    assert_eq!(engine.clustering("Iso").unwrap(), 0.0);
    assert_eq!(engine.clustering("A").unwrap(), 0.0);
    assert_eq!(engine.clustering("B").unwrap(), 0.0);
}

#[test]
fn test_full_triangle_clustering() {
    let g = bidirectional(&[("A", "B"), ("B", "C"), ("A", "C")]);
    let snap = snapshot(&g);
    for page in ["A", "B", "C"] {
        assert_eq!(snap.clustering(page).unwrap(), 1.0);
    }
    assert_eq!(snap.average_clustering_coefficient, Some(1.0));
}

#[test]
fn test_average_clustering_includes_zero_nodes() {
    // Triangle plus a pendant node D hanging off A
    let g = bidirectional(&[("A", "B"), ("B", "C"), ("A", "C"), ("A", "D")]);
    let snap = snapshot(&g);
    // A: k=3, one linked pair of three -> 1/3; B, C: 1.0; D: 0
    assert_close(snap.clustering("A").unwrap(), 1.0 / 3.0);
    assert_close(snap.average_clustering_coefficient.unwrap(), (1.0 / 3.0 + 2.0) / 4.0);
}

// ============================================================================
// 6. Errors and empty input
// ============================================================================

#[test]
fn test_unknown_node_errors() {
    let g = graph(&[("A", "B")]);
    let engine = MetricsEngine::new(&g);
    assert!(matches!(engine.closeness("Nowhere"), Err(Error::UnknownNode(_))));
    assert!(matches!(engine.clustering("Nowhere"), Err(Error::UnknownNode(_))));
    assert!(matches!(g.out_neighbors("Nowhere"), Err(Error::UnknownNode(_))));
}

#[test]
fn test_empty_graph_all_undefined() {
    let snap = navmetrics::analyze(&NavGraph::empty(), &AnalysisConfig::default());
    assert_eq!(snap.graph_info.num_nodes, 0);
    assert_eq!(snap.average_shortest_path_length, None);
    assert_eq!(snap.average_clustering_coefficient, None);
    assert!(snap.closeness_centrality.is_empty());
}

#[test]
fn test_zero_weight_is_invalid_edge() {
    let err = NavGraph::from_records(vec![
        EdgeRecord::new("A", "B", 1),
        EdgeRecord::new("B", "C", 0),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::InvalidEdge { record: 2, .. }));
}

// ============================================================================
// 7. Determinism and independent requests
// ============================================================================

#[test]
fn test_pipeline_is_deterministic() {
    let records = vec![
        EdgeRecord::new("Dashboard", "Analytics", 30),
        EdgeRecord::new("Dashboard", "Reports", 25),
        EdgeRecord::new("Analytics", "Reports", 20),
        EdgeRecord::new("Reports", "Analytics", 18),
        EdgeRecord::new("Analytics", "Dashboard", 25),
        EdgeRecord::new("Settings", "Help", 3),
        EdgeRecord::new("Dashboard", "Settings", 15),
    ];

    let first = snapshot(&NavGraph::from_records(records.clone()).unwrap());
    let second = snapshot(&NavGraph::from_records(records).unwrap());

    assert_eq!(first, second);
    let bits = |s: &MetricsSnapshot| -> Vec<u64> {
        s.closeness_centrality
            .values()
            .chain(s.clustering_coefficient.values())
            .chain(s.average_shortest_path_length.iter())
            .map(|v| v.to_bits())
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_subset_requests_match_snapshot() {
    let g = bidirectional(&[("A", "B"), ("B", "C"), ("C", "D"), ("A", "C")]);
    let snap = snapshot(&g);

    let engine = MetricsEngine::new(&g);
    assert_eq!(engine.clustering_coefficients(), snap.clustering_coefficient);
    assert_eq!(engine.average_shortest_path_length(), snap.average_shortest_path_length);
    assert_eq!(engine.closeness_centrality(), snap.closeness_centrality);
    assert_eq!(engine.average_clustering_coefficient(), snap.average_clustering_coefficient);
}
