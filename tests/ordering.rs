// tests/ordering.rs

use pipedag::dag::{DependencyGraph, TaskRefs};
use pipedag_test_utils::builders::{graph_from_edges, sorted_names};
use pipedag_test_utils::init_tracing;

#[test]
fn chain_emits_dependencies_first() {
    init_tracing();

    let mut graph = graph_from_edges(&[("A", "B"), ("B", "C")]).unwrap();
    assert_eq!(sorted_names(&mut graph).unwrap(), vec!["A", "B", "C"]);
    assert_eq!(graph.render_order().unwrap(), "A --> B --> C");
}

#[test]
fn diamond_emits_every_vertex_once() {
    init_tracing();

    let mut graph =
        graph_from_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]).unwrap();
    let order = sorted_names(&mut graph).unwrap();

    assert_eq!(order, vec!["A", "B", "C", "D"]);

    let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(pos("B") < pos("D"));
    assert!(pos("C") < pos("D"));
    assert_eq!(order.iter().filter(|n| *n == "D").count(), 1);
}

#[test]
fn bulk_declared_pipeline_matches_expected_order() {
    init_tracing();

    // B runs after A and before C; D after C; E after D and before F.
    let mut graph: DependencyGraph<()> = DependencyGraph::new();
    graph.add_task("A", None, TaskRefs::Empty, TaskRefs::Empty).unwrap();
    graph.add_task("B", None, ["C"], ["A"]).unwrap();
    graph.add_task("C", None, TaskRefs::Empty, ["B"]).unwrap();
    graph.add_task("D", None, TaskRefs::Empty, ["C"]).unwrap();
    graph.add_task("E", None, ["F"], ["D"]).unwrap();
    graph.add_task("F", None, TaskRefs::Empty, TaskRefs::Empty).unwrap();

    assert_eq!(
        graph.render_order().unwrap(),
        "A --> B --> C --> D --> E --> F"
    );
}

#[test]
fn single_names_are_accepted_for_bulk_orderings() {
    init_tracing();

    let mut graph: DependencyGraph<()> = DependencyGraph::new();
    graph.add_task("B", None, "C", "A").unwrap();

    let deps_of_b: Vec<&str> = graph.dependencies_of("B").collect();
    let deps_of_c: Vec<&str> = graph.dependencies_of("C").collect();
    assert_eq!(deps_of_b, vec!["A"]);
    assert_eq!(deps_of_c, vec!["B"]);
}

#[test]
fn isolated_vertices_keep_insertion_order() {
    init_tracing();

    let mut graph: DependencyGraph<()> = DependencyGraph::new();
    graph.add_vertex("C", None);
    graph.add_vertex("A", None);
    graph.add_vertex("B", None);

    assert_eq!(graph.render_order().unwrap(), "C --> A --> B");
}

#[test]
fn repeated_sorts_are_independent() {
    init_tracing();

    let mut graph =
        graph_from_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]).unwrap();
    let first = graph.render_order().unwrap();
    let second = graph.render_order().unwrap();

    assert_eq!(first, second);
}

#[test]
fn callback_receives_the_visit_stack() {
    init_tracing();

    let mut graph = graph_from_edges(&[("A", "B"), ("B", "C")]).unwrap();
    let mut seen: Vec<(String, Vec<String>)> = Vec::new();
    graph
        .topological_sort(|vertex, path| {
            let path = path.iter().map(|s| s.to_string()).collect();
            seen.push((vertex.name().to_string(), path));
        })
        .unwrap();

    // The only walk starts at C, the vertex nothing depends on, and the
    // path runs from that root down to the emitted vertex.
    assert_eq!(
        seen,
        vec![
            ("A".to_string(), vec!["C".to_string(), "B".to_string(), "A".to_string()]),
            ("B".to_string(), vec!["C".to_string(), "B".to_string()]),
            ("C".to_string(), vec!["C".to_string()]),
        ]
    );
}
