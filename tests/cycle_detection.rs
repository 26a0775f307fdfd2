// tests/cycle_detection.rs

use pipedag::dag::{DependencyGraph, TaskRefs};
use pipedag::errors::PipedagError;
use pipedag_test_utils::builders::graph_from_edges;
use pipedag_test_utils::init_tracing;

#[test]
fn direct_cycle_is_rejected() {
    init_tracing();

    let mut graph = graph_from_edges(&[("A", "B")]).unwrap();
    let err = graph.add_edge("B", "A").unwrap_err();

    assert!(matches!(err, PipedagError::Cycle(_)));
    assert_eq!(err.to_string(), "cycle detected: B --> A --> A");
}

#[test]
fn transitive_cycle_reports_the_discovered_path() {
    init_tracing();

    let mut graph = graph_from_edges(&[("A", "B"), ("B", "C")]).unwrap();
    let err = graph.add_edge("C", "A").unwrap_err();

    assert_eq!(err.to_string(), "cycle detected: C --> B --> A --> A");
}

#[test]
fn rejected_edge_leaves_the_graph_unchanged() {
    init_tracing();

    let mut graph =
        graph_from_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]).unwrap();

    let names_before: Vec<String> = graph.names().map(str::to_string).collect();
    let deps_before: Vec<Vec<String>> = names_before
        .iter()
        .map(|n| graph.dependencies_of(n).map(str::to_string).collect())
        .collect();
    let order_before = graph.render_order().unwrap();

    assert!(graph.add_edge("D", "A").is_err());

    let names_after: Vec<String> = graph.names().map(str::to_string).collect();
    let deps_after: Vec<Vec<String>> = names_after
        .iter()
        .map(|n| graph.dependencies_of(n).map(str::to_string).collect())
        .collect();

    assert_eq!(names_before, names_after);
    assert_eq!(deps_before, deps_after);
    assert_eq!(graph.render_order().unwrap(), order_before);
}

#[test]
fn bulk_declaration_propagates_cycle_errors() {
    init_tracing();

    let mut graph: DependencyGraph<()> = DependencyGraph::new();
    graph.add_task("A", None, ["B"], TaskRefs::Empty).unwrap();

    let err = graph.add_task("B", None, ["A"], TaskRefs::Empty).unwrap_err();
    assert!(err.to_string().contains("cycle detected"));
}
