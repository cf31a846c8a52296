//! Graph model for layer assignment.
//!
//! Nodes and edges live in flat arenas owned by [`Graph`] and are referenced
//! by index ([`NodeId`], [`EdgeId`]). Adjacency is owned by the nodes: every
//! edge is registered in its source's outgoing list and its target's incoming
//! list when it is created.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Index of an edge in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the graph.
///
/// `origin` is an opaque caller-owned handle carried through a run untouched;
/// `layer` is the output of the layer assignment. The remaining fields are
/// transient working state owned by the engine.
#[derive(Debug, Clone)]
pub struct Node<O> {
    pub origin: Option<O>,
    pub layer: i32,
    pub(crate) incoming: Vec<EdgeId>,
    pub(crate) outgoing: Vec<EdgeId>,
    pub(crate) tree_node: bool,
    pub(crate) internal_id: usize,
    /// Incident tree edges whose cut value is still unresolved. Only
    /// populated during a cut-value pass.
    pub(crate) unknown_cutvalues: FxHashSet<EdgeId>,
}

impl<O> Node<O> {
    fn new(origin: Option<O>) -> Self {
        Self {
            origin,
            layer: 0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            tree_node: false,
            internal_id: 0,
            unknown_cutvalues: FxHashSet::default(),
        }
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// All incident edges, incoming first. Computed by chaining the two
    /// adjacency lists; callers that only need the degree should prefer
    /// [`Node::connected_edge_count`].
    pub fn connected_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.incoming.iter().copied().chain(self.outgoing.iter().copied())
    }

    pub fn connected_edge_count(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    pub(crate) fn connected_edge_at(&self, i: usize) -> Option<EdgeId> {
        if i < self.incoming.len() {
            Some(self.incoming[i])
        } else {
            self.outgoing.get(i - self.incoming.len()).copied()
        }
    }
}

/// A directed edge with a weight and a minimum length (`delta`).
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub weight: f64,
    pub delta: i32,
    pub(crate) tree_edge: bool,
    pub(crate) internal_id: usize,
}

impl Edge {
    pub fn builder() -> EdgeBuilder {
        EdgeBuilder::new()
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the endpoint opposite `node`, failing if `node` is neither
    /// endpoint.
    pub fn other(&self, node: NodeId) -> Result<NodeId> {
        if node == self.source {
            Ok(self.target)
        } else if node == self.target {
            Ok(self.source)
        } else {
            Err(Error::NotAnEndpoint)
        }
    }

    pub(crate) fn opposite_of(&self, node: NodeId) -> NodeId {
        if node == self.source { self.target } else { self.source }
    }
}

/// Fluent edge construction. Validation and linking happen atomically in
/// [`EdgeBuilder::add_to`]; no partially-linked edge is observable on failure.
#[derive(Debug)]
pub struct EdgeBuilder {
    source: Option<NodeId>,
    target: Option<NodeId>,
    weight: f64,
    delta: i32,
}

impl Default for EdgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            weight: 1.0,
            delta: 1,
        }
    }

    pub fn source(mut self, source: NodeId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Minimum length of the edge in layers. Defaults to 1.
    pub fn delta(mut self, delta: i32) -> Self {
        self.delta = delta;
        self
    }

    pub fn add_to<O>(self, graph: &mut Graph<O>) -> Result<EdgeId> {
        let (Some(source), Some(target)) = (self.source, self.target) else {
            return Err(Error::MissingEndpoint);
        };
        if source == target {
            return Err(Error::SelfLoop);
        }
        Ok(graph.link_edge(source, target, self.weight, self.delta))
    }
}

/// A directed multigraph: an arena of nodes and an arena of edges.
#[derive(Debug, Clone)]
pub struct Graph<O = ()> {
    pub(crate) nodes: Vec<Node<O>>,
    pub(crate) edges: Vec<Edge>,
}

impl<O> Default for Graph<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Graph<O> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(None));
        id
    }

    pub fn add_node_with_origin(&mut self, origin: O) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(origin)));
        id
    }

    pub fn node(&self, id: NodeId) -> &Node<O> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<O> {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<O> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<O> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Current length of an edge: `layer(target) - layer(source)`.
    pub fn edge_length(&self, e: EdgeId) -> i32 {
        let edge = &self.edges[e.0];
        self.nodes[edge.target.0].layer - self.nodes[edge.source.0].layer
    }

    /// Slack of an edge: its current length minus its minimum length. Zero
    /// slack means the edge is tight.
    pub fn slack(&self, e: EdgeId) -> i32 {
        self.edge_length(e) - self.edges[e.0].delta
    }

    pub(crate) fn link_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: f64,
        delta: i32,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            weight,
            delta,
            tree_edge: false,
            internal_id: 0,
        });
        self.nodes[source.0].outgoing.push(id);
        self.nodes[target.0].incoming.push(id);
        id
    }

    /// Joins the graph's weakly-connected components under a single
    /// artificial root.
    ///
    /// Finds one representative per component by undirected search. If there
    /// is more than one component, a fresh root node is connected to each
    /// representative by a zero-weight, zero-delta edge and returned;
    /// otherwise the graph is left untouched and `None` is returned. The
    /// added edges cannot introduce a cycle.
    pub fn make_connected(&mut self) -> Option<NodeId> {
        let mut visited = vec![false; self.nodes.len()];
        let mut representatives: Vec<NodeId> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            representatives.push(NodeId(start));
            visited[start] = true;
            stack.push(NodeId(start));

            while let Some(n) = stack.pop() {
                for e in self.nodes[n.0].connected_edges() {
                    let opposite = self.edges[e.0].opposite_of(n);
                    if !visited[opposite.0] {
                        visited[opposite.0] = true;
                        stack.push(opposite);
                    }
                }
            }
        }

        if representatives.len() <= 1 {
            return None;
        }

        let root = self.add_node();
        for rep in representatives {
            self.link_edge(root, rep, 0.0, 0);
        }
        Some(root)
    }

    /// Checks that the graph contains no directed cycle.
    ///
    /// Kahn-style: nodes are numbered from the zero-in-degree sources by
    /// propagating `layer(target) = max(layer(target), layer(source) + 1)`.
    /// Nodes on a cycle are never reached, which the final per-edge check
    /// detects. Overwrites every node's `layer` as working storage.
    pub fn is_acyclic(&mut self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }

        for node in &mut self.nodes {
            node.layer = 0;
        }

        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.incoming.len()).collect();
        let mut queue: VecDeque<NodeId> = (0..self.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .map(NodeId)
            .collect();
        if queue.is_empty() {
            return false;
        }

        while let Some(n) = queue.pop_front() {
            for i in 0..self.nodes[n.0].outgoing.len() {
                let e = self.nodes[n.0].outgoing[i];
                let target = self.edges[e.0].target;
                let source_layer = self.nodes[n.0].layer;

                let t = &mut self.nodes[target.0];
                t.layer = t.layer.max(source_layer + 1);

                in_degree[target.0] -= 1;
                if in_degree[target.0] == 0 {
                    queue.push_back(target);
                }
            }
        }

        self.edges
            .iter()
            .all(|e| self.nodes[e.target.0].layer > self.nodes[e.source.0].layer)
    }
}
