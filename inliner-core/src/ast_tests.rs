use super::*;

// ===== NodeId Tests =====

#[test]
fn test_node_id_creation() {
    let id = NodeId::new(1).unwrap();
    assert_eq!(id.get(), 1);
    assert!(NodeId::new(0).is_none());
}

#[test]
fn test_node_id_display() {
    let id = NodeId::new(42).unwrap();
    assert_eq!(format!("{}", id), "n42");
}

// ===== Graph Tests =====

#[test]
fn test_graph_creation() {
    let graph = Graph::new();
    assert!(graph.nodes.is_empty());
    assert!(graph.root_id.is_none());
    assert!(graph.metadata.is_empty());
}

#[test]
fn test_add_node_assigns_increasing_ids() {
    let mut graph = Graph::new();
    let a = graph.add_node(Node::Pass).unwrap();
    let b = graph.add_node(Node::Pass).unwrap();
    assert_eq!(a.get(), 1);
    assert_eq!(b.get(), 2);
    assert_eq!(graph.nodes.len(), 2);
}

#[test]
fn test_span_side_table() {
    let mut graph = Graph::new();
    let id = graph.add_node(Node::Name { id: "x".into() }).unwrap();
    assert_eq!(graph.span(id), None);

    let span = Span::new(Position::new(2, 4), Position::new(2, 5));
    graph.set_span(id, span);
    assert_eq!(graph.span(id), Some(span));
    // The payload itself is untouched
    assert_eq!(graph.get_node(id), Some(&Node::Name { id: "x".into() }));
}

#[test]
fn test_span_contains_is_inclusive() {
    let span = Span::new(Position::new(1, 2), Position::new(3, 8));
    assert!(span.contains(1, 2));
    assert!(span.contains(3, 8));
    assert!(span.contains(2, 5));
    assert!(!span.contains(4, 5));
    assert!(!span.contains(2, 9));
    assert!(!span.contains(2, 1));
}

#[test]
fn test_children_follow_field_order() {
    let mut graph = Graph::new();
    let func = graph.name_path("f").unwrap();
    let arg = graph.add_node(Node::Literal(Literal::Int(1))).unwrap();
    let kw = graph.add_node(Node::Literal(Literal::Int(2))).unwrap();
    let call = graph
        .add_node(Node::Call {
            func,
            args: vec![arg],
            keywords: vec![Keyword {
                arg: "k".into(),
                value: kw,
            }],
        })
        .unwrap();
    assert_eq!(graph.children(call), vec![func, arg, kw]);
}

#[test]
fn test_slice_children_skip_absent_bounds() {
    let mut graph = Graph::new();
    let upper = graph.add_node(Node::Literal(Literal::Int(2))).unwrap();
    let slice = graph
        .add_node(Node::Slice {
            lower: None,
            upper: Some(upper),
            step: None,
        })
        .unwrap();
    assert_eq!(graph.children(slice), vec![upper]);
}

#[test]
fn test_map_children_preserves_payload() {
    let mut graph = Graph::new();
    let a = graph.add_node(Node::Name { id: "a".into() }).unwrap();
    let b = graph.add_node(Node::Name { id: "b".into() }).unwrap();
    let node = Node::Compare {
        left: a,
        ops: vec![CompareOperator::Lt],
        comparators: vec![a],
    };
    let mapped = node.map_children(|_| b);
    assert_eq!(
        mapped,
        Node::Compare {
            left: b,
            ops: vec![CompareOperator::Lt],
            comparators: vec![b],
        }
    );
}

#[test]
fn test_dfs_is_preorder() {
    let mut graph = Graph::new();
    let attr = graph.name_path("a.b").unwrap();
    let arg = graph.add_node(Node::Literal(Literal::None)).unwrap();
    let call = graph
        .add_node(Node::Call {
            func: attr,
            args: vec![arg],
            keywords: vec![],
        })
        .unwrap();

    let mut kinds = Vec::new();
    graph.dfs_from(call, |_, node| kinds.push(node.kind()));
    assert_eq!(kinds, vec!["Call", "Attribute", "Name", "Literal"]);
}

#[test]
fn test_name_path() {
    let mut graph = Graph::new();
    let id = graph.name_path("utils.to_utf8").unwrap();
    let Some(Node::Attribute { value, attr }) = graph.get_node(id) else {
        panic!("expected attribute");
    };
    assert_eq!(attr, "to_utf8");
    assert_eq!(graph.get_node(*value), Some(&Node::Name { id: "utils".into() }));
}

#[test]
fn test_import_subtree() {
    let mut source = Graph::new();
    let expr = source.name_path("x.y.z").unwrap();
    source.set_span(expr, Span::new(Position::new(1, 0), Position::new(1, 5)));

    let mut target = Graph::new();
    target.add_node(Node::Pass).unwrap();
    let copy = target.import_subtree(&source, expr).unwrap();

    assert!(crate::equality::structurally_equal(&source, expr, &target, copy));
    assert_eq!(target.span(copy), None);
}

#[test]
fn test_literal_display() {
    assert_eq!(Literal::Int(-3).to_string(), "-3");
    assert_eq!(Literal::Float(2.0).to_string(), "2.0");
    assert_eq!(Literal::Str("it's".into()).to_string(), "'it\\'s'");
    assert_eq!(Literal::Bytes(vec![b'a', 0]).to_string(), "b'a\\x00'");
    assert_eq!(Literal::Bool(false).to_string(), "False");
    assert_eq!(Literal::None.to_string(), "None");
}
