use crate::error::ParseError;
use crate::{parse_expr, parse_module, parse_stmt, Parser};
use inliner_core::ast::{
    BinaryOperator, CompareOperator, Graph, Literal, Node, NodeId, Position, UnaryOperator,
};

fn node(graph: &Graph, id: NodeId) -> &Node {
    graph.get_node(id).unwrap()
}

fn name_of(graph: &Graph, id: NodeId) -> &str {
    match node(graph, id) {
        Node::Name { id } => id,
        other => panic!("expected name, got {other:?}"),
    }
}

fn int_of(graph: &Graph, id: NodeId) -> i64 {
    match node(graph, id) {
        Node::Literal(Literal::Int(i)) => *i,
        other => panic!("expected int, got {other:?}"),
    }
}

// ===== Expressions =====

#[test]
fn test_multiplication_binds_tighter() {
    let (graph, root) = parse_expr("1 + 2 * 3").unwrap();
    let Node::BinOp { left, op, right } = node(&graph, root) else {
        panic!("expected binop");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert_eq!(int_of(&graph, *left), 1);
    assert!(matches!(
        node(&graph, *right),
        Node::BinOp {
            op: BinaryOperator::Mult,
            ..
        }
    ));
}

#[test]
fn test_subtraction_is_left_associative() {
    let (graph, root) = parse_expr("a - b - c").unwrap();
    let Node::BinOp { left, right, .. } = node(&graph, root) else {
        panic!("expected binop");
    };
    assert_eq!(name_of(&graph, *right), "c");
    assert!(matches!(node(&graph, *left), Node::BinOp { .. }));
}

#[test]
fn test_unary_minus_applies_after_power() {
    let (graph, root) = parse_expr("-2 ** 2").unwrap();
    let Node::UnaryOp { op, operand } = node(&graph, root) else {
        panic!("expected unary op");
    };
    assert_eq!(*op, UnaryOperator::USub);
    assert!(matches!(
        node(&graph, *operand),
        Node::BinOp {
            op: BinaryOperator::Pow,
            ..
        }
    ));
}

#[test]
fn test_comparison_chain() {
    let (graph, root) = parse_expr("a < b is not c not in d").unwrap();
    let Node::Compare {
        left,
        ops,
        comparators,
    } = node(&graph, root)
    else {
        panic!("expected compare");
    };
    assert_eq!(name_of(&graph, *left), "a");
    assert_eq!(
        ops,
        &[
            CompareOperator::Lt,
            CompareOperator::IsNot,
            CompareOperator::NotIn
        ]
    );
    assert_eq!(comparators.len(), 3);
}

#[test]
fn test_boolean_operators() {
    let (graph, root) = parse_expr("not a or b and c").unwrap();
    let Node::BoolOp { values, .. } = node(&graph, root) else {
        panic!("expected bool op");
    };
    assert_eq!(values.len(), 2);
    assert!(matches!(
        node(&graph, values[0]),
        Node::UnaryOp {
            op: UnaryOperator::Not,
            ..
        }
    ));
}

#[test]
fn test_call_with_keywords() {
    let (graph, root) = parse_expr("obj.method(1, key=x)").unwrap();
    let Node::Call {
        func,
        args,
        keywords,
    } = node(&graph, root)
    else {
        panic!("expected call");
    };
    assert!(matches!(node(&graph, *func), Node::Attribute { attr, .. } if attr == "method"));
    assert_eq!(args.len(), 1);
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].arg, "key");
    assert_eq!(name_of(&graph, keywords[0].value), "x");
}

#[test]
fn test_subscript_with_slices() {
    let (graph, root) = parse_expr("x[1:2, ::3]").unwrap();
    let Node::Subscript { slice, .. } = node(&graph, root) else {
        panic!("expected subscript");
    };
    let Node::Tuple { elts } = node(&graph, *slice) else {
        panic!("expected tuple of slices");
    };
    assert!(matches!(
        node(&graph, elts[0]),
        Node::Slice {
            lower: Some(_),
            upper: Some(_),
            step: None
        }
    ));
    assert!(matches!(
        node(&graph, elts[1]),
        Node::Slice {
            lower: None,
            upper: None,
            step: Some(_)
        }
    ));
}

#[test]
fn test_displays() {
    let (graph, root) = parse_expr("({}, {1, 2}, {'a': [1,]}, (), (1,))").unwrap();
    let Node::Tuple { elts } = node(&graph, root) else {
        panic!("expected tuple");
    };
    assert!(matches!(node(&graph, elts[0]), Node::Dict { keys, .. } if keys.is_empty()));
    assert!(matches!(node(&graph, elts[1]), Node::Set { elts } if elts.len() == 2));
    assert!(matches!(node(&graph, elts[2]), Node::Dict { keys, .. } if keys.len() == 1));
    assert!(matches!(node(&graph, elts[3]), Node::Tuple { elts } if elts.is_empty()));
    assert!(matches!(node(&graph, elts[4]), Node::Tuple { elts } if elts.len() == 1));
}

#[test]
fn test_adjacent_strings_concatenate() {
    let (graph, root) = parse_expr("'ab' \"cd\"").unwrap();
    assert_eq!(node(&graph, root), &Node::Literal(Literal::Str("abcd".into())));
}

#[test]
fn test_parenthesized_expression_is_not_a_tuple() {
    let (graph, root) = parse_expr("(x)").unwrap();
    assert_eq!(name_of(&graph, root), "x");
}

// ===== Statements =====

#[test]
fn test_function_definition() {
    let graph = parse_module("def f(a, b):\n    c = a + b\n    return c\n").unwrap();
    let Some(Node::Module { body }) = graph.root_id.map(|id| node(&graph, id)) else {
        panic!("expected module");
    };
    let Node::FunctionDef { name, params, body } = node(&graph, body[0]) else {
        panic!("expected def");
    };
    assert_eq!(name, "f");
    assert_eq!(params, &["a".to_string(), "b".to_string()]);
    assert_eq!(body.len(), 2);
    assert!(matches!(node(&graph, body[1]), Node::Return { value: Some(_) }));
}

#[test]
fn test_class_definition() {
    let (graph, root) = parse_stmt("class C(Base):\n    def m(self):\n        pass\n").unwrap();
    let Node::ClassDef { name, bases, body } = node(&graph, root) else {
        panic!("expected class");
    };
    assert_eq!(name, "C");
    assert_eq!(name_of(&graph, bases[0]), "Base");
    assert!(matches!(node(&graph, body[0]), Node::FunctionDef { .. }));
}

#[test]
fn test_elif_nests_in_orelse() {
    let source = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n";
    let (graph, root) = parse_stmt(source).unwrap();
    let Node::If { orelse, .. } = node(&graph, root) else {
        panic!("expected if");
    };
    assert_eq!(orelse.len(), 1);
    let Node::If { test, orelse, .. } = node(&graph, orelse[0]) else {
        panic!("expected nested if");
    };
    assert_eq!(name_of(&graph, *test), "b");
    assert_eq!(orelse.len(), 1);
}

#[test]
fn test_for_with_tuple_target() {
    let (graph, root) = parse_stmt("for k, v in items:\n    total += v\n").unwrap();
    let Node::For { target, iter, body } = node(&graph, root) else {
        panic!("expected for");
    };
    assert!(matches!(node(&graph, *target), Node::Tuple { elts } if elts.len() == 2));
    assert_eq!(name_of(&graph, *iter), "items");
    assert!(matches!(
        node(&graph, body[0]),
        Node::AugAssign {
            op: BinaryOperator::Add,
            ..
        }
    ));
}

#[test]
fn test_chained_assignment() {
    let (graph, root) = parse_stmt("a = b = 1").unwrap();
    let Node::Assign { targets, value } = node(&graph, root) else {
        panic!("expected assign");
    };
    assert_eq!(targets.len(), 2);
    assert_eq!(name_of(&graph, targets[1]), "b");
    assert_eq!(int_of(&graph, *value), 1);
}

#[test]
fn test_single_line_suite_and_comments() {
    let source = "# header\nwhile x: x -= 1  # trailing\n\nassert x == 0, 'done'\n";
    let graph = parse_module(source).unwrap();
    let Some(Node::Module { body }) = graph.root_id.map(|id| node(&graph, id)) else {
        panic!("expected module");
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(node(&graph, body[0]), Node::While { body, .. } if body.len() == 1));
    assert!(matches!(node(&graph, body[1]), Node::Assert { msg: Some(_), .. }));
}

// ===== Spans =====

#[test]
fn test_call_span() {
    let graph = parse_module("x = foo(1)\n").unwrap();
    let Some(Node::Module { body }) = graph.root_id.map(|id| node(&graph, id)) else {
        panic!("expected module");
    };
    let Node::Assign { value, .. } = node(&graph, body[0]) else {
        panic!("expected assign");
    };
    let span = graph.span(*value).unwrap();
    assert_eq!(span.start, Position::new(1, 4));
    assert_eq!(span.end, Position::new(1, 10));
}

#[test]
fn test_block_span_ends_at_last_statement() {
    let (graph, root) = parse_stmt("def f():\n    return 1\n").unwrap();
    let span = graph.span(root).unwrap();
    assert_eq!(span.start, Position::new(1, 0));
    assert_eq!(span.end, Position::new(2, 12));
}

// ===== Errors =====

#[test]
fn test_positional_after_keyword() {
    assert!(matches!(
        parse_expr("f(x=1, 2)"),
        Err(ParseError::InvalidSyntax(_))
    ));
}

#[test]
fn test_missing_value() {
    let err = parse_module("x = \n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { line: 1, .. }
    ));
}

#[test]
fn test_unterminated_block() {
    assert!(matches!(
        parse_module("def f():"),
        Err(ParseError::UnexpectedEof)
    ));
}

#[test]
fn test_parse_stmt_rejects_several_statements() {
    assert!(parse_stmt("a = 1\nb = 2\n").is_err());
    assert!(parse_stmt("").is_err());
}

// ===== Integer limits =====

#[test]
fn test_most_negative_int_is_one_literal() {
    let (graph, root) = parse_expr("-9223372036854775808").unwrap();
    assert_eq!(int_of(&graph, root), i64::MIN);

    let (graph, root) = parse_expr("(-9223372036854775808, 1)").unwrap();
    let Node::Tuple { elts } = node(&graph, root) else {
        panic!("expected tuple");
    };
    assert_eq!(int_of(&graph, elts[0]), i64::MIN);
}

#[test]
fn test_int_past_i64_is_rejected() {
    for source in ["9223372036854775808", "-9223372036854775808 ** 2", "-9223372036854775809"] {
        assert!(
            matches!(parse_expr(source), Err(ParseError::InvalidSyntax(_))),
            "{source}"
        );
    }
}

// ===== Nesting depth =====

fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_depth_limit_prevents_stack_overflow() {
    let result = parse_expr(&nested_parens(20_000));
    match result {
        Err(ParseError::MaxDepthExceeded { depth, max_depth }) => {
            assert_eq!(max_depth, Parser::DEFAULT_MAX_DEPTH);
            assert!(depth > max_depth);
        }
        other => panic!("expected MaxDepthExceeded, got {other:?}"),
    }

    let unary = format!("{}x", "-".repeat(20_000));
    assert!(matches!(
        parse_expr(&unary),
        Err(ParseError::MaxDepthExceeded { .. })
    ));

    let nots = format!("{}x", "not ".repeat(20_000));
    assert!(matches!(
        parse_expr(&nots),
        Err(ParseError::MaxDepthExceeded { .. })
    ));
}

#[test]
fn test_nested_blocks_hit_depth_limit() {
    let mut source = String::new();
    for level in 0..500 {
        source.push_str(&" ".repeat(level));
        source.push_str("if x:\n");
    }
    source.push_str(&" ".repeat(500));
    source.push_str("pass\n");
    assert!(matches!(
        parse_module(&source),
        Err(ParseError::MaxDepthExceeded { .. })
    ));
}

#[test]
fn test_moderate_nesting_parses() {
    let (graph, root) = parse_expr(&nested_parens(50)).unwrap();
    assert_eq!(int_of(&graph, root), 1);
}

#[test]
fn test_custom_depth_limit() {
    let source = nested_parens(10);
    let result = Parser::new(&source)
        .unwrap()
        .with_max_depth(5)
        .parse_single_expression();
    assert!(matches!(
        result,
        Err(ParseError::MaxDepthExceeded { max_depth: 5, .. })
    ));

    let result = Parser::new(&source)
        .unwrap()
        .with_max_depth(20)
        .parse_single_expression();
    assert!(result.is_ok());
}

#[test]
fn test_long_elif_chain_is_not_nesting() {
    let mut source = String::from("if x == 0:\n    pass\n");
    for i in 1..1_000 {
        source.push_str(&format!("elif x == {i}:\n    pass\n"));
    }
    source.push_str("else:\n    y = 1\n");

    let graph = parse_module(&source).unwrap();
    let root = graph.root_id.unwrap();
    let Node::Module { body } = node(&graph, root) else {
        panic!("expected module");
    };
    assert_eq!(body.len(), 1);

    let mut branches = 0;
    let mut current = body[0];
    while let Node::If { orelse, .. } = node(&graph, current) {
        branches += 1;
        match orelse.as_slice() {
            [next] if matches!(node(&graph, *next), Node::If { .. }) => current = *next,
            _ => break,
        }
    }
    assert_eq!(branches, 1_000);
}
