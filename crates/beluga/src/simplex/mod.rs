//! The network simplex layering engine.
//!
//! [`NetworkSimplex`] assigns every node of a connected, acyclic graph an
//! integer layer such that each edge spans at least its minimum length
//! (`delta`), minimizing the total weighted edge length. The method grows a
//! tight spanning tree over the seed layering, then repeatedly exchanges a
//! tree edge with negative cut value for a minimal-slack crossing edge until
//! no such tree edge remains.
//!
//! Both preconditions (connectedness, acyclicity) are the caller's
//! responsibility; violating them yields an incorrect or non-terminating
//! layering, not an error.

mod peeling;

use std::collections::VecDeque;

use crate::graph::{EdgeId, Graph, NodeId};
use crate::progress::{BasicProgressMonitor, ProgressMonitor};

/// Empirically determined node count above which peeling degree-1 nodes
/// before pivoting pays off.
const PEEL_LEAVES_THRESHOLD: usize = 40;

/// Cut values are compared against this instead of exact zero to absorb
/// accumulated floating-point error.
const FUZZY_NEGATIVE_ZERO: f64 = -1e-10;

#[derive(Debug, Clone, Copy)]
struct DfsFrame {
    node: NodeId,
    next_edge: usize,
    /// Minimum postorder id seen below this frame; only meaningful during
    /// the postorder traversal.
    lowest: i32,
}

/// Scratch state for a single run.
///
/// Nodes and edges taking part in the run get dense internal ids during
/// `initialize`; the flat buffers below are indexed by those ids and reused
/// across the pivot iterations.
#[derive(Debug, Default)]
struct RunState {
    /// Nodes taking part in the optimization (all nodes minus peeled leaves).
    active: Vec<NodeId>,
    /// Edges incident to active nodes, in dense internal-id order.
    edges: Vec<EdgeId>,
    /// Active nodes without incoming edges.
    sources: Vec<NodeId>,
    /// Spanning tree edges in insertion order, for deterministic pivoting.
    tree_edges: Vec<EdgeId>,

    edge_visited: Vec<bool>,
    po_id: Vec<i32>,
    lowest_po_id: Vec<i32>,
    post_order: i32,
    cutvalue: Vec<f64>,

    dfs_stack: Vec<DfsFrame>,
    leafs: Vec<NodeId>,
    peeled: Vec<(NodeId, EdgeId)>,
}

impl RunState {
    fn new(active: Vec<NodeId>) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    /// Assigns dense internal ids to the active nodes and their edges and
    /// sizes the scratch buffers. Tree flags from any previous run are
    /// cleared here.
    fn initialize<O>(&mut self, g: &mut Graph<O>) {
        self.sources.clear();
        self.edges.clear();

        for (index, &n) in self.active.iter().enumerate() {
            let node = g.node_mut(n);
            node.tree_node = false;
            node.internal_id = index;
        }
        for i in 0..self.active.len() {
            let n = self.active[i];
            if g.node(n).incoming().is_empty() {
                self.sources.push(n);
            }
            self.edges.extend(g.node(n).outgoing().iter().copied());
        }
        for (index, &e) in self.edges.iter().enumerate() {
            let edge = g.edge_mut(e);
            edge.tree_edge = false;
            edge.internal_id = index;
        }

        let num_nodes = self.active.len();
        self.po_id.clear();
        self.po_id.resize(num_nodes, 0);
        self.lowest_po_id.clear();
        self.lowest_po_id.resize(num_nodes, 0);

        let num_edges = self.edges.len();
        self.cutvalue.clear();
        self.cutvalue.resize(num_edges, 0.0);
        self.edge_visited.clear();
        self.edge_visited.resize(num_edges, false);

        self.tree_edges.clear();
        self.post_order = 1;
    }

    /// Builds a tight spanning tree over a feasible seed layering and
    /// computes postorder numbers and cut values for it.
    ///
    /// The seed layering is feasible but not tight everywhere. While the
    /// tight-edge DFS covers fewer than all active nodes, the incident
    /// non-tree edge with minimal slack is made tight by shifting the whole
    /// tree by that slack, which adds at least one node per round.
    fn feasible_tree<O>(&mut self, g: &mut Graph<O>) {
        self.layering_topological(g);

        if self.edges.is_empty() {
            return;
        }

        let start = self.active[0];
        self.edge_visited.fill(false);
        while self.tight_tree_dfs(g, start) < self.active.len() {
            let e = self
                .minimal_slack(g)
                .expect("a connected graph always has an edge incident to the tight tree");
            let mut slack = g.slack(e);
            if g.node(g.edge(e).target()).tree_node {
                slack = -slack;
            }

            for i in 0..self.active.len() {
                let n = self.active[i];
                if g.node(n).tree_node {
                    g.node_mut(n).layer += slack;
                }
            }
            self.edge_visited.fill(false);
        }

        self.edge_visited.fill(false);
        self.postorder_traversal(g, start);
        self.cutvalues(g);
    }

    /// Seeds a feasible layering by topological numbering from the sources:
    /// `layer(target) = max(layer(target), layer(source) + delta)`.
    fn layering_topological<O>(&mut self, g: &mut Graph<O>) {
        let mut incident: Vec<usize> = vec![0; self.active.len()];
        for &n in &self.active {
            incident[g.node(n).internal_id] = g.node(n).incoming().len();
        }

        let mut roots: VecDeque<NodeId> = self.sources.iter().copied().collect();
        while let Some(n) = roots.pop_front() {
            for i in 0..g.node(n).outgoing().len() {
                let e = g.node(n).outgoing()[i];
                let target = g.edge(e).target();
                let delta = g.edge(e).delta;
                let source_layer = g.node(n).layer;

                let t = g.node_mut(target);
                t.layer = t.layer.max(source_layer + delta);
                let target_internal = t.internal_id;

                incident[target_internal] -= 1;
                if incident[target_internal] == 0 {
                    roots.push_back(target);
                }
            }
        }
    }

    /// Grows the tree along unvisited tight edges starting at `start` and
    /// returns the number of nodes reached. Already-established tree edges
    /// are followed unconditionally.
    fn tight_tree_dfs<O>(&mut self, g: &mut Graph<O>, start: NodeId) -> usize {
        let mut count = 1;
        g.node_mut(start).tree_node = true;
        self.dfs_stack.clear();
        self.dfs_stack.push(DfsFrame {
            node: start,
            next_edge: 0,
            lowest: 0,
        });

        loop {
            let (node, i) = {
                let Some(top) = self.dfs_stack.last_mut() else {
                    break;
                };
                let i = top.next_edge;
                top.next_edge += 1;
                (top.node, i)
            };

            let Some(e) = g.node(node).connected_edge_at(i) else {
                self.dfs_stack.pop();
                continue;
            };

            let internal = g.edge(e).internal_id;
            if self.edge_visited[internal] {
                continue;
            }
            self.edge_visited[internal] = true;

            let opposite = g.edge(e).opposite_of(node);
            if g.edge(e).tree_edge {
                count += 1;
                g.node_mut(opposite).tree_node = true;
                self.dfs_stack.push(DfsFrame {
                    node: opposite,
                    next_edge: 0,
                    lowest: 0,
                });
            } else if !g.node(opposite).tree_node && g.slack(e) == 0 {
                g.edge_mut(e).tree_edge = true;
                self.tree_edges.push(e);
                count += 1;
                g.node_mut(opposite).tree_node = true;
                self.dfs_stack.push(DfsFrame {
                    node: opposite,
                    next_edge: 0,
                    lowest: 0,
                });
            }
        }

        count
    }

    /// The non-tree edge with exactly one endpoint in the tree and minimal
    /// slack. Its slack is never zero, else the DFS would have claimed it.
    fn minimal_slack<O>(&self, g: &Graph<O>) -> Option<EdgeId> {
        let mut best: Option<(i32, EdgeId)> = None;
        for &e in &self.edges {
            let edge = g.edge(e);
            if g.node(edge.source()).tree_node ^ g.node(edge.target()).tree_node {
                let slack = g.slack(e);
                match best {
                    Some((best_slack, _)) if slack >= best_slack => {}
                    _ => best = Some((slack, e)),
                }
            }
        }
        best.map(|(_, e)| e)
    }

    /// Postorder DFS over tree edges, recording each node's visit number
    /// (`po_id`) and the minimum visit number in its subtree
    /// (`lowest_po_id`). Together they answer subtree membership in O(1).
    fn postorder_traversal<O>(&mut self, g: &Graph<O>, start: NodeId) {
        self.dfs_stack.clear();
        self.dfs_stack.push(DfsFrame {
            node: start,
            next_edge: 0,
            lowest: i32::MAX,
        });

        loop {
            let (node, i) = {
                let Some(top) = self.dfs_stack.last_mut() else {
                    break;
                };
                let i = top.next_edge;
                top.next_edge += 1;
                (top.node, i)
            };

            if let Some(e) = g.node(node).connected_edge_at(i) {
                let edge = g.edge(e);
                if edge.tree_edge && !self.edge_visited[edge.internal_id] {
                    self.edge_visited[edge.internal_id] = true;
                    self.dfs_stack.push(DfsFrame {
                        node: edge.opposite_of(node),
                        next_edge: 0,
                        lowest: i32::MAX,
                    });
                }
                continue;
            }

            let frame = self.dfs_stack.pop().expect("frame checked above");
            let internal = g.node(frame.node).internal_id;
            self.po_id[internal] = self.post_order;
            self.lowest_po_id[internal] = frame.lowest.min(self.post_order);
            self.post_order += 1;

            if let Some(parent) = self.dfs_stack.last_mut() {
                parent.lowest = parent.lowest.min(self.lowest_po_id[internal]);
            }
        }
    }

    /// Computes the cut value of every tree edge in one linear pass.
    ///
    /// Splitting the tree at an edge yields a tail component (source side)
    /// and a head component (target side); the cut value is the weight of
    /// all graph edges crossing tail to head, the tree edge included, minus
    /// the weight of those crossing head to tail. The pass eliminates leaves
    /// of the tree-edge-only forest: a node with a single unresolved
    /// incident tree edge can resolve it from its own weight, the already
    /// resolved tree edges and the non-tree edges at that node.
    fn cutvalues<O>(&mut self, g: &mut Graph<O>) {
        self.leafs.clear();
        for i in 0..self.active.len() {
            let n = self.active[i];
            let mut unknown = std::mem::take(&mut g.node_mut(n).unknown_cutvalues);
            unknown.clear();
            for e in g.node(n).connected_edges() {
                if g.edge(e).tree_edge {
                    unknown.insert(e);
                }
            }
            let count = unknown.len();
            g.node_mut(n).unknown_cutvalues = unknown;
            if count == 1 {
                self.leafs.push(n);
            }
        }

        for i in 0..self.leafs.len() {
            let mut node = self.leafs[i];
            loop {
                let to_determine = {
                    let unknown = &g.node(node).unknown_cutvalues;
                    if unknown.len() != 1 {
                        break;
                    }
                    *unknown.iter().next().expect("length checked above")
                };

                let (det_source, det_target, det_internal, det_weight) = {
                    let edge = g.edge(to_determine);
                    (edge.source(), edge.target(), edge.internal_id, edge.weight)
                };
                let mut cut = det_weight;

                for e in g.node(node).connected_edges() {
                    if e == to_determine {
                        continue;
                    }
                    let edge = g.edge(e);
                    if edge.tree_edge {
                        // Resolved tree edge; sign depends on whether it runs
                        // in the same direction as the edge being resolved.
                        if edge.source() == det_source || edge.target() == det_target {
                            cut -= self.cutvalue[edge.internal_id] - edge.weight;
                        } else {
                            cut += self.cutvalue[edge.internal_id] - edge.weight;
                        }
                    } else if node == det_source {
                        if edge.source() == node {
                            cut += edge.weight;
                        } else {
                            cut -= edge.weight;
                        }
                    } else if edge.source() == node {
                        cut -= edge.weight;
                    } else {
                        cut += edge.weight;
                    }
                }

                self.cutvalue[det_internal] = cut;
                g.node_mut(det_source).unknown_cutvalues.remove(&to_determine);
                g.node_mut(det_target).unknown_cutvalues.remove(&to_determine);

                // The far endpoint may have become a leaf itself.
                node = if node == det_source { det_target } else { det_source };
            }
        }
    }

    /// Whether `node` lies in the head component (target side) of the tree
    /// split at `edge`, answered from the postorder numbers.
    fn is_in_head<O>(&self, g: &Graph<O>, node: NodeId, edge: EdgeId) -> bool {
        let e = g.edge(edge);
        let s = g.node(e.source()).internal_id;
        let t = g.node(e.target()).internal_id;
        let n = g.node(node).internal_id;

        if self.lowest_po_id[s] <= self.po_id[n]
            && self.po_id[n] <= self.po_id[s]
            && self.lowest_po_id[t] <= self.po_id[n]
            && self.po_id[n] <= self.po_id[t]
        {
            // `node` descends from both endpoints; the endpoint visited
            // earlier owns the inner subtree.
            return self.po_id[s] >= self.po_id[t];
        }
        self.po_id[s] < self.po_id[t]
    }

    /// Any tree edge with negative cut value, or `None` if the layering is
    /// optimal. No preference among candidates is needed for correctness.
    fn leave_edge<O>(&self, g: &Graph<O>) -> Option<EdgeId> {
        self.tree_edges.iter().copied().find(|&e| {
            let edge = g.edge(e);
            edge.tree_edge && self.cutvalue[edge.internal_id] < FUZZY_NEGATIVE_ZERO
        })
    }

    /// The minimal-slack edge running from the head component of `leave`
    /// into its tail component; swapping it in replaces `leave` in the tree.
    ///
    /// Panics if `leave` is not a tree edge, or if no crossing edge exists
    /// (impossible for a connected graph and a negative cut value).
    fn enter_edge<O>(&self, g: &Graph<O>, leave: EdgeId) -> EdgeId {
        assert!(g.edge(leave).tree_edge, "leave edge is not a tree edge");

        let mut best: Option<(i32, EdgeId)> = None;
        for &e in &self.edges {
            let edge = g.edge(e);
            if self.is_in_head(g, edge.source(), leave) && !self.is_in_head(g, edge.target(), leave)
            {
                let slack = g.slack(e);
                match best {
                    Some((best_slack, _)) if slack >= best_slack => {}
                    _ => best = Some((slack, e)),
                }
            }
        }
        best.map(|(_, e)| e)
            .expect("a negative cut value implies an edge crossing head to tail")
    }

    /// Replaces `leave` by `enter` in the spanning tree, shifts the layers of
    /// the component that keeps `enter` tight, and recomputes postorder
    /// numbers and cut values.
    ///
    /// Panics if `leave` is not a tree edge or `enter` already is one.
    fn exchange<O>(&mut self, g: &mut Graph<O>, leave: EdgeId, enter: EdgeId) {
        assert!(g.edge(leave).tree_edge, "leave edge is not a tree edge");
        assert!(!g.edge(enter).tree_edge, "enter edge is a tree edge already");

        g.edge_mut(leave).tree_edge = false;
        if let Some(pos) = self.tree_edges.iter().position(|&e| e == leave) {
            self.tree_edges.remove(pos);
        }
        g.edge_mut(enter).tree_edge = true;
        self.tree_edges.push(enter);

        let mut delta = g.slack(enter);
        let enter_target = g.edge(enter).target();
        if !self.is_in_head(g, enter_target, leave) {
            delta = -delta;
        }
        for i in 0..self.active.len() {
            let n = self.active[i];
            if !self.is_in_head(g, n, leave) {
                g.node_mut(n).layer += delta;
            }
        }

        // The tree shape changed; renumber and recompute cut values from
        // scratch. Linear cost, and pivot counts stay small in practice.
        self.post_order = 1;
        self.edge_visited.fill(false);
        let start = self.active[0];
        self.postorder_traversal(g, start);
        self.cutvalues(g);
    }
}

/// Network simplex layer assignment.
///
/// Configured fluently, executed once:
///
/// ```
/// # use beluga::{Edge, Graph, NetworkSimplex};
/// # let mut g: Graph = Graph::new();
/// # let a = g.add_node();
/// # let b = g.add_node();
/// # Edge::builder().source(a).target(b).add_to(&mut g).unwrap();
/// NetworkSimplex::for_graph(&mut g)
///     .with_balancing(true)
///     .with_iteration_limit(10_000)
///     .execute();
/// ```
pub struct NetworkSimplex<'g, O = ()> {
    graph: &'g mut Graph<O>,
    balance: bool,
    previous_layering: Option<Vec<usize>>,
    iteration_limit: usize,
}

impl<'g, O> NetworkSimplex<'g, O> {
    pub fn for_graph(graph: &'g mut Graph<O>) -> Self {
        Self {
            graph,
            balance: false,
            previous_layering: None,
            iteration_limit: usize::MAX,
        }
    }

    /// Whether to widen the layering after optimization: nodes with equal
    /// in- and out-degree move to the least populated layer their incident
    /// edges allow. A single greedy pass, not a re-optimization.
    pub fn with_balancing(mut self, balance: bool) -> Self {
        self.balance = balance;
        self
    }

    /// Per-layer node counts of a previously computed layering, merged into
    /// the histogram that balancing consults. Lets balancing account for
    /// externally placed nodes.
    pub fn with_previous_layering(mut self, node_counts: Vec<usize>) -> Self {
        self.previous_layering = Some(node_counts);
        self
    }

    /// Caps the number of pivot iterations. The method provably terminates,
    /// but the cap guards against pathological floating-point behavior.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Runs the layer assignment, writing each node's `layer` (0-based after
    /// normalization).
    pub fn execute(self) {
        self.execute_with(&mut BasicProgressMonitor::default());
    }

    /// Like [`execute`](Self::execute), bracketed by the given monitor.
    pub fn execute_with(self, monitor: &mut dyn ProgressMonitor) {
        monitor.begin("network simplex", 1);
        let Self {
            graph,
            balance: do_balance,
            previous_layering,
            iteration_limit,
        } = self;

        if graph.node_count() == 0 {
            monitor.done();
            return;
        }

        for i in 0..graph.node_count() {
            graph.node_mut(NodeId(i)).layer = 0;
        }

        let mut state = RunState::new(graph.node_ids().collect());

        let peel = state.active.len() >= PEEL_LEAVES_THRESHOLD;
        if peel {
            peeling::peel_leaves(graph, &mut state.active, &mut state.peeled);
        }

        let peeled = state.peeled.len();

        state.initialize(graph);
        state.feasible_tree(graph);

        let mut pivots = 0usize;
        while pivots < iteration_limit {
            let Some(leave) = state.leave_edge(graph) else {
                break;
            };
            let enter = state.enter_edge(graph, leave);
            state.exchange(graph, leave, enter);
            pivots += 1;
        }

        if peel {
            peeling::reattach_leaves(graph, &mut state.active, &mut state.peeled);
        }

        let mut filling = normalize(graph, previous_layering.as_deref());
        if do_balance {
            balance(graph, &mut filling);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pivots,
            peeled,
            "network simplex finished"
        );
        monitor.done();
    }
}

/// Shifts all layers so the minimum becomes 0 and returns the per-layer node
/// counts over the resulting range, with any previous layering merged in.
fn normalize<O>(g: &mut Graph<O>, previous_layering: Option<&[usize]>) -> Vec<usize> {
    let mut lowest = i32::MAX;
    let mut highest = i32::MIN;
    for i in 0..g.node_count() {
        let layer = g.node(NodeId(i)).layer;
        lowest = lowest.min(layer);
        highest = highest.max(layer);
    }

    let mut filling = vec![0usize; (highest - lowest + 1) as usize];
    for i in 0..g.node_count() {
        let node = g.node_mut(NodeId(i));
        node.layer -= lowest;
        filling[node.layer as usize] += 1;
    }

    if let Some(previous) = previous_layering {
        for (slot, count) in filling.iter_mut().zip(previous) {
            *slot += count;
        }
    }
    filling
}

/// Greedy widening pass: every node with equal in- and out-degree may move
/// within the layer range its incident edges' slacks allow; it moves to the
/// first layer in that range holding strictly fewer nodes than its current
/// one. A single pass, not iterated to a fixpoint.
fn balance<O>(g: &mut Graph<O>, filling: &mut [usize]) {
    let last = (filling.len() - 1) as i32;
    for i in 0..g.node_count() {
        let id = NodeId(i);
        let (layer, lo, hi) = {
            let node = g.node(id);
            if node.incoming().len() != node.outgoing().len() {
                continue;
            }
            let layer = node.layer;
            let min_in_slack = node.incoming().iter().map(|&e| g.slack(e)).min();
            let min_out_slack = node.outgoing().iter().map(|&e| g.slack(e)).min();
            let lo = min_in_slack.map_or(0, |s| (layer - s).max(0));
            let hi = min_out_slack.map_or(last, |s| (layer + s).min(last));
            (layer, lo, hi)
        };

        let mut new_layer = layer;
        for candidate in lo..=hi {
            if filling[candidate as usize] < filling[new_layer as usize] {
                new_layer = candidate;
            }
        }
        if filling[new_layer as usize] < filling[layer as usize] {
            filling[layer as usize] -= 1;
            filling[new_layer as usize] += 1;
            g.node_mut(id).layer = new_layer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn edge(g: &mut Graph, a: NodeId, b: NodeId, weight: f64, delta: i32) -> EdgeId {
        Edge::builder()
            .source(a)
            .target(b)
            .weight(weight)
            .delta(delta)
            .add_to(g)
            .unwrap()
    }

    /// a -> b (w1, d1), a -> c (w1, d3), b -> c (w2, d1): the tight tree over
    /// the seed layering carries a negative cut value, forcing a pivot.
    fn pivot_graph() -> Graph {
        let mut g: Graph = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        edge(&mut g, a, b, 1.0, 1);
        edge(&mut g, a, c, 1.0, 3);
        edge(&mut g, b, c, 2.0, 1);
        g
    }

    fn gansner_graph() -> Graph {
        let mut g: Graph = Graph::new();
        let ids: Vec<NodeId> = (0..8).map(|_| g.add_node()).collect();
        let (a, b, c, d, e, f, gg, h) = (
            ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7],
        );
        for (v, w) in [
            (a, b),
            (b, c),
            (c, d),
            (d, h),
            (a, e),
            (e, gg),
            (gg, h),
            (a, f),
            (f, gg),
        ] {
            edge(&mut g, v, w, 1.0, 1);
        }
        g
    }

    fn feasible_state(g: &mut Graph) -> RunState {
        let mut state = RunState::new(g.node_ids().collect());
        state.initialize(g);
        state.feasible_tree(g);
        state
    }

    /// Recomputes a tree edge's cut value from the head/tail partition that
    /// `is_in_head` induces.
    fn partition_cut_value(state: &RunState, g: &Graph, tree_edge: EdgeId) -> f64 {
        let mut cut = 0.0;
        for &e in &state.edges {
            let source_in_head = state.is_in_head(g, g.edge(e).source(), tree_edge);
            let target_in_head = state.is_in_head(g, g.edge(e).target(), tree_edge);
            if !source_in_head && target_in_head {
                cut += g.edge(e).weight;
            } else if source_in_head && !target_in_head {
                cut -= g.edge(e).weight;
            }
        }
        cut
    }

    fn assert_cut_values_consistent(state: &RunState, g: &Graph) {
        for &e in &state.tree_edges {
            let stored = state.cutvalue[g.edge(e).internal_id];
            let recomputed = partition_cut_value(state, g, e);
            assert!(
                (stored - recomputed).abs() < 1e-9,
                "cut value mismatch for edge {e:?}: stored {stored}, partition {recomputed}"
            );
        }
    }

    #[test]
    fn tree_edge_endpoints_split_into_tail_and_head() {
        let mut g = pivot_graph();
        let state = feasible_state(&mut g);
        for &e in &state.tree_edges {
            assert!(state.is_in_head(&g, g.edge(e).target(), e));
            assert!(!state.is_in_head(&g, g.edge(e).source(), e));
        }
    }

    #[test]
    fn cut_values_match_the_partition_they_summarize() {
        let mut g = pivot_graph();
        let state = feasible_state(&mut g);
        assert!(!state.tree_edges.is_empty());
        assert_cut_values_consistent(&state, &g);

        let mut g = gansner_graph();
        let state = feasible_state(&mut g);
        assert_eq!(state.tree_edges.len(), g.node_count() - 1);
        assert_cut_values_consistent(&state, &g);
    }

    #[test]
    fn pivoting_clears_negative_cut_values() {
        let mut g = pivot_graph();
        let mut state = feasible_state(&mut g);
        assert!(state.leave_edge(&g).is_some(), "seed tree should not be optimal");

        let mut pivots = 0;
        while let Some(leave) = state.leave_edge(&g) {
            let enter = state.enter_edge(&g, leave);
            state.exchange(&mut g, leave, enter);
            pivots += 1;
            assert!(pivots <= 16, "pivot loop failed to converge");
        }

        assert!(pivots >= 1);
        assert_cut_values_consistent(&state, &g);
        for &e in &state.tree_edges {
            assert!(state.cutvalue[g.edge(e).internal_id] >= FUZZY_NEGATIVE_ZERO);
        }

        // All constraints hold and the total weighted length is the optimum.
        let mut total = 0.0;
        for e in g.edge_ids() {
            assert!(g.slack(e) >= 0);
            total += g.edge(e).weight * f64::from(g.edge_length(e));
        }
        assert_eq!(total, 7.0);
    }
}
