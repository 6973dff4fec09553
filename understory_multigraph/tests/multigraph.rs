// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_multigraph` crate.
//!
//! These exercise the public contract: index symmetry and compaction as seen
//! through [`MultigraphDebugInfo`], atomic failure of edge insertion, cascade
//! on node removal, and traversal order.

use understory_multigraph::{
    Edge, EdgeId, EdgeIdSource, Multigraph, MultigraphDebugInfo, Node, NodeId,
};

fn nodes(ids: &[&str]) -> Multigraph<usize, &'static str> {
    let mut graph = Multigraph::new();
    for (i, &id) in ids.iter().enumerate() {
        graph.insert_node(id, i);
    }
    graph
}

fn assert_indices_match_edges(info: MultigraphDebugInfo) {
    assert_eq!(info.outgoing_entries, info.edges, "outgoing index vs store");
    assert_eq!(info.incoming_entries, info.edges, "incoming index vs store");
    assert_eq!(info.outgoing_pairs, info.incoming_pairs, "bucket symmetry");
}

#[test]
fn empty_graph_basics() {
    let graph = Multigraph::<(), ()>::new();
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.first_node().is_none());
    assert_eq!(graph.edges_from("a").count(), 0);
    assert_eq!(graph.target_nodes("a").count(), 0);
    assert!(!graph.has_edge_between("a", "b"));
}

#[test]
fn repeated_add_remove_does_not_grow_indices() {
    let mut graph = nodes(&["a", "b"]);
    let baseline = graph.debug_info();

    for round in 0..1_000 {
        let ab = graph.add_edge_between("a", "b", "ab", None).unwrap().id.clone();
        let ba = graph.add_edge_between("b", "a", "ba", None).unwrap().id.clone();
        assert!(graph.has_edge_between("a", "b"), "round {round}");
        assert!(graph.has_edge_between("b", "a"), "round {round}");
        assert_indices_match_edges(graph.debug_info());

        assert_eq!(graph.remove_edge(&ab).unwrap().data, "ab");
        assert!(!graph.has_edge_between("a", "b"), "round {round}");
        assert!(graph.has_edge_between("b", "a"), "round {round}");
        graph.remove_edge(&ba).unwrap();
        assert!(!graph.has_edge_between("b", "a"), "round {round}");
    }

    assert_eq!(graph.debug_info(), baseline);
    assert_eq!(baseline.outgoing_sources, 0);
    assert_eq!(baseline.incoming_targets, 0);
}

#[test]
fn add_edge_failure_is_atomic() {
    let mut graph = nodes(&["a", "b"]);
    graph.add_edge(Edge::new("ab", "a", "b", "kept")).unwrap();
    let before = graph.debug_info();

    assert!(graph.add_edge(Edge::new("ac", "a", "c", "x")).is_none());
    assert!(graph.add_edge(Edge::new("ca", "c", "a", "x")).is_none());
    assert!(graph.add_edge_between("c", "d", "x", None).is_none());

    assert_eq!(graph.debug_info(), before);
    assert!(graph.edge("ac").is_none());
    assert_eq!(graph.edges_from("a").count(), 1);
    assert_eq!(graph.edges_to("a").count(), 0);
}

#[test]
fn remove_node_cascade_removes_exactly_incident_edges() {
    let mut graph = nodes(&["hub", "x", "y", "z"]);
    graph.add_edge(Edge::new("x-hub", "x", "hub", "in")).unwrap();
    graph.add_edge(Edge::new("y-hub", "y", "hub", "in")).unwrap();
    graph.add_edge(Edge::new("hub-z", "hub", "z", "out")).unwrap();
    graph.add_edge(Edge::new("hub-z-2", "hub", "z", "out")).unwrap();
    graph.add_edge(Edge::new("x-y", "x", "y", "bystander")).unwrap();
    graph.add_edge(Edge::new("z-x", "z", "x", "bystander")).unwrap();

    let degree = graph.in_degree("hub") + graph.out_degree("hub");
    let edges_before = graph.edge_count();
    assert_eq!(degree, 4);

    let removed = graph.remove_node("hub").expect("hub exists");
    assert_eq!(removed.data, 0);
    assert_eq!(graph.edge_count(), edges_before - degree);
    assert!(!graph.contains_node("hub"));
    for edge in graph.edges() {
        assert_ne!(edge.source.as_str(), "hub");
        assert_ne!(edge.target.as_str(), "hub");
    }
    assert_eq!(graph.target_nodes("x").map(NodeId::as_str).collect::<Vec<_>>(), ["y"]);
    assert_eq!(graph.source_nodes("z").count(), 0);
    assert_indices_match_edges(graph.debug_info());

    assert!(graph.remove_node("hub").is_none());
}

#[test]
fn bfs_is_deterministic() {
    let mut graph = nodes(&["A", "B", "C", "D"]);
    graph.add_edge_between("A", "B", "", None).unwrap();
    graph.add_edge_between("A", "C", "", None).unwrap();
    graph.add_edge_between("B", "D", "", None).unwrap();

    for _ in 0..10 {
        let mut visited = Vec::new();
        graph.breadth_first_traversal("A", |node| visited.push(node.id.clone()));
        assert_eq!(visited, ["A", "B", "C", "D"].map(NodeId::from));
    }
}

#[test]
fn parallel_edges_keep_insertion_order() {
    let mut graph = nodes(&["a", "b"]);
    for label in ["one", "two", "three"] {
        graph.add_edge_between("a", "b", label, None).unwrap();
    }
    let labels: Vec<_> = graph.edges_between("a", "b").map(|e| e.data).collect();
    assert_eq!(labels, ["one", "two", "three"]);
    assert_eq!(graph.first_edge_between("a", "b").unwrap().data, "one");
    // Distinct neighbors, not multiplicity.
    assert_eq!(graph.target_nodes("a").count(), 1);
    assert_eq!(graph.out_degree("a"), 3);
}

#[test]
fn custom_id_source() {
    struct Letters(u8);

    impl EdgeIdSource for Letters {
        fn next_edge_id(&mut self) -> EdgeId {
            let id = EdgeId::from(String::from(char::from(b'a' + self.0)));
            self.0 += 1;
            id
        }
    }

    let mut graph = Multigraph::<(), (), Letters>::with_id_source(Letters(0));
    graph.add_node(Node::new("n", ()));
    let first = graph.add_edge_between("n", "n", (), None).unwrap().id.clone();
    let second = graph.add_edge_between("n", "n", (), None).unwrap().id.clone();
    assert_eq!(first.as_str(), "a");
    assert_eq!(second.as_str(), "b");

    let explicit = graph
        .add_edge_between("n", "n", (), Some(EdgeId::from("mine")))
        .unwrap()
        .id
        .clone();
    assert_eq!(explicit.as_str(), "mine");
    assert_eq!(graph.id_source().0, 2);
}

#[test]
fn constant_id_source_replaces_edge() {
    let mut graph = Multigraph::<(), u32, _>::with_id_source(|| EdgeId::from("fixed"));
    graph.insert_node("a", ());
    graph.insert_node("b", ());
    graph.add_edge_between("a", "b", 1, None).unwrap();
    graph.add_edge_between("a", "b", 2, None).unwrap();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge("fixed").unwrap().data, 2);
    assert_eq!(graph.edges_between("a", "b").count(), 1);
    assert_indices_match_edges(graph.debug_info());
}
