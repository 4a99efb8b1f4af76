//! Tree size metric used as an inlining cost heuristic

use inliner_core::ast::{Graph, NodeId};

/// Number of nodes in the subtree rooted at `node_id`, the root included.
///
/// A child id referenced from several places counts once per reference, so
/// the size agrees with that of a structurally equal tree without sharing.
/// The graph must be acyclic. Ids missing from the graph count 0.
pub fn tree_size(graph: &Graph, node_id: NodeId) -> usize {
    let mut size = 0;
    let mut stack = vec![node_id];
    while let Some(id) = stack.pop() {
        if let Some(node) = graph.get_node(id) {
            size += 1;
            node.for_each_child(|child| stack.push(child));
        }
    }
    size
}
