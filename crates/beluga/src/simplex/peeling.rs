//! Removal and reattachment of degree-1 nodes.
//!
//! A node with a single incident edge can always be placed next to its
//! neighbor with zero slack, so it contributes nothing to the optimization
//! and only slows the pivot loop down. Leaves are detached before the run
//! and placed after it; since detaching a chain exposes new leaves whose
//! placement depends on their already-placed neighbor, reattachment must
//! happen in exact reverse order of removal.

use std::collections::VecDeque;

use crate::graph::{EdgeId, Graph, NodeId};

/// Detaches leaves from the active node set until none are left.
///
/// The detached node keeps its own adjacency lists (they are needed to place
/// it later); only the neighbor's opposite list is unlinked. Every removal is
/// pushed onto `stack` in order.
pub(crate) fn peel_leaves<O>(
    g: &mut Graph<O>,
    active: &mut Vec<NodeId>,
    stack: &mut Vec<(NodeId, EdgeId)>,
) {
    let mut leafs: VecDeque<NodeId> = active
        .iter()
        .copied()
        .filter(|&n| g.node(n).connected_edge_count() == 1)
        .collect();
    let mut detached = vec![false; g.node_count()];

    while let Some(n) = leafs.pop_front() {
        // The last edge may already have been detached from the other side.
        if g.node(n).connected_edge_count() == 0 {
            continue;
        }
        let e = g
            .node(n)
            .connected_edge_at(0)
            .expect("leaf has exactly one connected edge");
        let is_out_edge = !g.node(n).outgoing().is_empty();

        let other = g.edge(e).opposite_of(n);
        if is_out_edge {
            g.node_mut(other).incoming.retain(|&x| x != e);
        } else {
            g.node_mut(other).outgoing.retain(|&x| x != e);
        }

        if g.node(other).connected_edge_count() == 1 {
            leafs.push_back(other);
        }

        stack.push((n, e));
        detached[n.0] = true;
    }

    active.retain(|&n| !detached[n.0]);
}

/// Reattaches previously peeled nodes in reverse order of removal, placing
/// each at zero slack relative to its already-placed neighbor.
pub(crate) fn reattach_leaves<O>(
    g: &mut Graph<O>,
    active: &mut Vec<NodeId>,
    stack: &mut Vec<(NodeId, EdgeId)>,
) {
    while let Some((n, e)) = stack.pop() {
        let edge = g.edge(e);
        let (source, target, delta) = (edge.source(), edge.target(), edge.delta);

        if target == n {
            g.node_mut(source).outgoing.push(e);
            g.node_mut(n).layer = g.node(source).layer + delta;
        } else {
            g.node_mut(target).incoming.push(e);
            g.node_mut(n).layer = g.node(target).layer - delta;
        }

        active.push(n);
    }
}
