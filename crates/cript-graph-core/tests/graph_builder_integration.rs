use std::collections::HashSet;

use cript_graph_core::{DirectedGraph, DomainObject, Node, SchemaRegistry, build_graph};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn node(registry: &SchemaRegistry, node_type: &str, name: &str) -> Node {
    let node = Node::new(registry, node_type).unwrap();
    if node.schema().field("name").is_some() {
        node.set_text("name", name).unwrap();
    }
    node
}

/// Project with a collection/experiment chain, one material carrying two
/// properties, each property computed by its own computation, and both
/// computations also listed on the experiment.
fn example_project(registry: &SchemaRegistry) -> Node {
    let experiment = node(registry, "Experiment", "my experiment name");
    let collection = node(registry, "Collection", "my collection name");
    collection.push_reference("experiment", &experiment).unwrap();

    let project = node(registry, "Project", "my Project name");
    project.push_reference("collection", &collection).unwrap();

    let material = node(registry, "Material", "my material");
    material
        .set_text("identifiers", r#"[{"bigsmiles": "123456"}]"#)
        .unwrap();
    project.push_reference("material", &material).unwrap();

    let computation = node(registry, "Computation", "my computation name");
    computation.set_text("type", "analysis").unwrap();
    let property = Node::new(registry, "Property").unwrap();
    property
        .set_text("key", "modulus_shear")
        .unwrap()
        .set_text("type", "value")
        .unwrap()
        .set_number("value", 5.0)
        .unwrap()
        .set_text("unit", "GPa")
        .unwrap()
        .push_reference("computation", &computation)
        .unwrap();
    material.push_reference("property", &property).unwrap();

    let computation2 = node(registry, "Computation", "computation 2, new");
    computation2.set_text("type", "analysis").unwrap();
    let property2 = Node::new(registry, "Property").unwrap();
    property2
        .set_text("key", "modulus_loss")
        .unwrap()
        .push_reference("computation", &computation2)
        .unwrap();
    material.push_reference("property", &property2).unwrap();

    experiment
        .extend_references("computation", &[computation, computation2])
        .unwrap();
    project
}

fn reachable(root: &Node) -> (usize, usize) {
    // Independent recount: distinct objects and (parent, field, child) occurrences.
    let mut seen = HashSet::new();
    let mut occurrences = 0;
    let mut todo = vec![root.clone()];
    while let Some(current) = todo.pop() {
        if !seen.insert(current.uid()) {
            continue;
        }
        for (_, value) in current.fields() {
            for child in value.into_references() {
                occurrences += 1;
                todo.push(child);
            }
        }
    }
    (seen.len(), occurrences)
}

#[test]
fn example_project_has_expected_shape() {
    init_tracing();
    let registry = SchemaRegistry::cript();
    let project = example_project(&registry);

    let graph = build_graph(&project).unwrap();
    assert_eq!(graph.vertex_count(), 8);
    assert_eq!(graph.edge_count(), 9);
    assert_eq!(reachable(&project), (8, 9));
}

#[test]
fn building_twice_is_idempotent() {
    let registry = SchemaRegistry::cript();
    let project = example_project(&registry);

    let first = build_graph(&project).unwrap();
    let second = build_graph(&project).unwrap();
    assert_eq!(first.vertex_count(), second.vertex_count());
    assert_eq!(first.edges(), second.edges());
}

#[test]
fn linear_chain_produces_labeled_edges() {
    let registry = SchemaRegistry::cript();
    let project = node(&registry, "Project", "p");
    let collection = node(&registry, "Collection", "c");
    let experiment = node(&registry, "Experiment", "e");
    project.push_reference("collection", &collection).unwrap();
    collection.push_reference("experiment", &experiment).unwrap();

    let graph: DirectedGraph<Node> = build_graph(&project).unwrap();
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let root = graph.root().unwrap();
    let collection_id = graph.find(&collection.uid()).unwrap();
    let experiment_id = graph.find(&experiment.uid()).unwrap();
    assert_eq!(graph.successors(root), vec![collection_id]);
    assert_eq!(graph.successors(collection_id), vec![experiment_id]);
    assert_eq!(graph.edges_labeled("collection").count(), 1);
    assert_eq!(graph.edges_labeled("experiment").count(), 1);
    assert_eq!(graph.edges_to(root).count(), 0);
}

#[test]
fn graph_is_a_structural_snapshot() {
    let registry = SchemaRegistry::cript();
    let project = node(&registry, "Project", "before");
    let collection = node(&registry, "Collection", "c");
    project.push_reference("collection", &collection).unwrap();

    let graph = build_graph(&project).unwrap();

    // Structural edits after the build are not reflected.
    project
        .push_reference("material", &node(&registry, "Material", "late"))
        .unwrap();
    assert_eq!(graph.vertex_count(), 2);

    // Scalar edits are visible through the stored handles.
    project.set_text("name", "after").unwrap();
    let root = graph.vertex(graph.root().unwrap()).unwrap();
    assert_eq!(root.attribute("name").as_deref(), Some("after"));
}

#[test]
fn vertex_count_matches_reachable_objects_in_acyclic_trees() {
    let registry = SchemaRegistry::cript();
    let inventory = node(&registry, "Inventory", "shelf");
    let shared = node(&registry, "Material", "shared");

    for i in 0..5 {
        let material = node(&registry, "Material", &format!("m{i}"));
        for _ in 0..i {
            material.push_reference("component", &shared).unwrap();
        }
        inventory.push_reference("material", &material).unwrap();
    }

    let graph = build_graph(&inventory).unwrap();
    let (vertices, edges) = reachable(&inventory);
    assert_eq!(graph.vertex_count(), vertices);
    assert_eq!(graph.edge_count(), edges);
    assert_eq!(graph.vertex_count(), 7);
    assert_eq!(graph.edge_count(), 5 + 10);
}
