//! Structural equality over syntax trees
//!
//! Two subtrees are equal when they have the same node kinds, the same scalar
//! payloads, and pairwise equal children in the same order. Spans and other
//! metadata live in the graph's side-table and never take part.

use crate::ast::{Graph, Node, NodeId};
use std::num::NonZeroU32;

const PLACEHOLDER: NodeId = NodeId(NonZeroU32::MIN);

/// Compare the subtree at `a` in `left` with the subtree at `b` in `right`.
///
/// The graphs may be the same. A dangling id on either side compares unequal.
pub fn structurally_equal(left: &Graph, a: NodeId, right: &Graph, b: NodeId) -> bool {
    let mut work = vec![(a, b)];

    while let Some((a, b)) = work.pop() {
        let (node_a, node_b) = match (left.get_node(a), right.get_node(b)) {
            (Some(x), Some(y)) => (x, y),
            _ => return false,
        };

        if std::mem::discriminant(node_a) != std::mem::discriminant(node_b) {
            return false;
        }
        if erase_children(node_a) != erase_children(node_b) {
            return false;
        }

        let children_a = left.children(a);
        let children_b = right.children(b);
        if children_a.len() != children_b.len() {
            return false;
        }
        work.extend(children_a.into_iter().zip(children_b));
    }

    true
}

/// Payload of a node with every child reference collapsed to one value, so
/// that `==` compares only the kind and the scalar fields (including the
/// number and presence of children).
fn erase_children(node: &Node) -> Node {
    node.map_children(|_| PLACEHOLDER)
}

impl Graph {
    /// Structural equality of two subtrees of this graph
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        structurally_equal(self, a, self, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Literal, Position, Span};

    fn binop(graph: &mut Graph, l: i64, r: i64) -> NodeId {
        let left = graph.add_node(Node::Literal(Literal::Int(l))).unwrap();
        let right = graph.add_node(Node::Literal(Literal::Int(r))).unwrap();
        graph
            .add_node(Node::BinOp {
                left,
                op: BinaryOperator::Add,
                right,
            })
            .unwrap()
    }

    #[test]
    fn test_reflexive() {
        let mut graph = Graph::new();
        let expr = binop(&mut graph, 1, 2);
        assert!(graph.structurally_equal(expr, expr));
    }

    #[test]
    fn test_separate_copies_are_equal() {
        let mut graph = Graph::new();
        let a = binop(&mut graph, 1, 2);
        let b = binop(&mut graph, 1, 2);
        assert_ne!(a, b);
        assert!(graph.structurally_equal(a, b));
        assert!(graph.structurally_equal(b, a));
    }

    #[test]
    fn test_scalar_difference() {
        let mut graph = Graph::new();
        let a = binop(&mut graph, 1, 2);
        let b = binop(&mut graph, 1, 3);
        assert!(!graph.structurally_equal(a, b));
    }

    #[test]
    fn test_kind_mismatch() {
        let mut graph = Graph::new();
        let name = graph.add_node(Node::Name { id: "x".into() }).unwrap();
        let lit = graph
            .add_node(Node::Literal(Literal::Str("x".into())))
            .unwrap();
        assert!(!graph.structurally_equal(name, lit));
    }

    #[test]
    fn test_sequence_length_mismatch() {
        let mut graph = Graph::new();
        let one = graph.add_node(Node::Literal(Literal::Int(1))).unwrap();
        let short = graph.add_node(Node::List { elts: vec![one] }).unwrap();
        let long = graph
            .add_node(Node::List {
                elts: vec![one, one],
            })
            .unwrap();
        assert!(!graph.structurally_equal(short, long));
    }

    #[test]
    fn test_spans_are_ignored() {
        let mut graph = Graph::new();
        let a = graph.name_path("utils.to_utf8").unwrap();
        let b = graph.name_path("utils.to_utf8").unwrap();
        graph.set_span(a, Span::new(Position::new(1, 0), Position::new(1, 13)));
        graph.set_span(b, Span::new(Position::new(40, 8), Position::new(40, 21)));
        assert!(graph.structurally_equal(a, b));
    }

    #[test]
    fn test_across_graphs() {
        let mut left = Graph::new();
        let mut right = Graph::new();
        // Pad the right graph so ids differ
        right.add_node(Node::Pass).unwrap();
        let a = left.name_path("str").unwrap();
        let b = right.name_path("str").unwrap();
        assert!(structurally_equal(&left, a, &right, b));
    }

    #[test]
    fn test_missing_node_is_unequal() {
        let graph = Graph::new();
        let ghost = NodeId::new(3).unwrap();
        assert!(!graph.structurally_equal(ghost, ghost));
    }
}
