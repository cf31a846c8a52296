use beluga::{Edge, Error, Graph};

fn two_node_edge(g: &mut Graph) -> (beluga::NodeId, beluga::NodeId, beluga::EdgeId) {
    let a = g.add_node();
    let b = g.add_node();
    let e = Edge::builder().source(a).target(b).add_to(g).unwrap();
    (a, b, e)
}

#[test]
fn edge_builder_requires_both_endpoints() {
    let mut g: Graph = Graph::new();
    let a = g.add_node();

    let err = Edge::builder().source(a).add_to(&mut g).unwrap_err();
    assert_eq!(err, Error::MissingEndpoint);
    let err = Edge::builder().target(a).add_to(&mut g).unwrap_err();
    assert_eq!(err, Error::MissingEndpoint);
    let err = Edge::builder().add_to(&mut g).unwrap_err();
    assert_eq!(err, Error::MissingEndpoint);

    assert_eq!(g.edge_count(), 0);
    assert!(g.node(a).connected_edges().next().is_none());
}

#[test]
fn edge_builder_rejects_self_loops() {
    let mut g: Graph = Graph::new();
    let a = g.add_node();
    let err = Edge::builder().source(a).target(a).add_to(&mut g).unwrap_err();
    assert_eq!(err, Error::SelfLoop);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn edge_builder_registers_adjacency_on_both_endpoints() {
    let mut g: Graph = Graph::new();
    let (a, b, e) = two_node_edge(&mut g);

    assert_eq!(g.node(a).outgoing(), &[e]);
    assert!(g.node(a).incoming().is_empty());
    assert_eq!(g.node(b).incoming(), &[e]);
    assert!(g.node(b).outgoing().is_empty());
    assert_eq!(g.edge(e).source(), a);
    assert_eq!(g.edge(e).target(), b);
}

#[test]
fn edge_builder_defaults_to_weight_one_and_delta_one() {
    let mut g: Graph = Graph::new();
    let (_, _, e) = two_node_edge(&mut g);
    assert_eq!(g.edge(e).weight, 1.0);
    assert_eq!(g.edge(e).delta, 1);
}

#[test]
fn other_returns_the_opposite_endpoint() {
    let mut g: Graph = Graph::new();
    let (a, b, e) = two_node_edge(&mut g);
    assert_eq!(g.edge(e).other(a), Ok(b));
    assert_eq!(g.edge(e).other(b), Ok(a));
}

#[test]
fn other_rejects_a_node_that_is_not_an_endpoint() {
    let mut g: Graph = Graph::new();
    let (_, _, e) = two_node_edge(&mut g);
    let c = g.add_node();
    assert_eq!(g.edge(e).other(c), Err(Error::NotAnEndpoint));
}

#[test]
fn edge_length_and_slack_follow_the_layers() {
    let mut g: Graph = Graph::new();
    let a = g.add_node();
    let b = g.add_node();
    let e = Edge::builder()
        .source(a)
        .target(b)
        .delta(2)
        .add_to(&mut g)
        .unwrap();

    g.node_mut(a).layer = 1;
    g.node_mut(b).layer = 4;
    assert_eq!(g.edge_length(e), 3);
    assert_eq!(g.slack(e), 1);
}

#[test]
fn make_connected_leaves_a_connected_graph_alone() {
    let mut g: Graph = Graph::new();
    two_node_edge(&mut g);
    assert_eq!(g.make_connected(), None);
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn make_connected_joins_components_under_a_single_root() {
    let mut g: Graph = Graph::new();
    // Three components: two separate edges and one isolated node.
    two_node_edge(&mut g);
    two_node_edge(&mut g);
    g.add_node();

    let root = g.make_connected().expect("graph has three components");
    assert_eq!(g.node_count(), 6);
    assert_eq!(g.node(root).outgoing().len(), 3);
    assert!(g.node(root).incoming().is_empty());
    for &e in g.node(root).outgoing() {
        assert_eq!(g.edge(e).weight, 0.0);
        assert_eq!(g.edge(e).delta, 0);
    }
    assert!(g.is_acyclic());
    assert_eq!(g.make_connected(), None);
}

#[test]
fn is_acyclic_accepts_an_empty_graph() {
    let mut g: Graph = Graph::new();
    assert!(g.is_acyclic());
}

#[test]
fn is_acyclic_accepts_a_single_edge() {
    let mut g: Graph = Graph::new();
    two_node_edge(&mut g);
    assert!(g.is_acyclic());
}

#[test]
fn is_acyclic_accepts_a_diamond() {
    let mut g: Graph = Graph::new();
    let a = g.add_node();
    let b = g.add_node();
    let c = g.add_node();
    let d = g.add_node();
    for (v, w) in [(a, b), (a, c), (b, d), (c, d)] {
        Edge::builder().source(v).target(w).add_to(&mut g).unwrap();
    }
    assert!(g.is_acyclic());
}

#[test]
fn is_acyclic_rejects_a_two_cycle() {
    let mut g: Graph = Graph::new();
    let a = g.add_node();
    let b = g.add_node();
    Edge::builder().source(a).target(b).add_to(&mut g).unwrap();
    Edge::builder().source(b).target(a).add_to(&mut g).unwrap();
    assert!(!g.is_acyclic());
}

#[test]
fn is_acyclic_rejects_a_cycle_reachable_from_a_source() {
    let mut g: Graph = Graph::new();
    let s = g.add_node();
    let d = g.add_node();
    let e = g.add_node();
    let f = g.add_node();
    for (v, w) in [(s, d), (d, e), (e, f), (f, d)] {
        Edge::builder().source(v).target(w).add_to(&mut g).unwrap();
    }
    assert!(!g.is_acyclic());
}

#[test]
fn origins_are_carried_untouched() {
    let mut g: Graph<&'static str> = Graph::new();
    let a = g.add_node_with_origin("first");
    let b = g.add_node();
    assert_eq!(g.node(a).origin, Some("first"));
    assert_eq!(g.node(b).origin, None);
}
