use super::*;
use inliner_parser::{parse_expr, parse_stmt};

fn expr_is_pure(source: &str) -> bool {
    let (graph, root) = parse_expr(source).unwrap();
    is_effect_free(&graph, root)
}

#[test]
fn test_operators_and_displays_are_pure() {
    for source in [
        "1",
        "x",
        "-x + 2 * y[0]",
        "a.b.c[1:2]",
        "(1, [2], {3: 4}, {5}, b'raw', 'text', None)",
        "not x",
        "x ** 2 // 3 % 4",
    ] {
        assert!(expr_is_pure(source), "{source}");
    }
}

#[test]
fn test_whitelisted_calls_are_pure() {
    for source in [
        "str(x)",
        "int('3') + float('inf')",
        "utils.to_utf8(s)",
        "LooseVersion(v) ",
        "tuple(list(xs))",
    ] {
        assert!(expr_is_pure(source), "{source}");
    }
}

#[test]
fn test_other_calls_are_impure() {
    for source in [
        "f(x)",
        "x.append(1)",
        "str(f(x))",
        "utils.other(s)",
        "[1, print(x)]",
        "to_utf8(s)",
    ] {
        assert!(!expr_is_pure(source), "{source}");
    }
}

#[test]
fn test_keyword_arguments_are_impure() {
    assert!(expr_is_pure("int('3')"));
    assert!(!expr_is_pure("int('3', base=2)"));
    assert!(!expr_is_pure("[str(x, errors='strict')]"));
}

#[test]
fn test_unlisted_kinds_are_impure() {
    assert!(!expr_is_pure("a < b"));
    assert!(!expr_is_pure("a and b"));

    let (graph, root) = parse_stmt("x = 1").unwrap();
    assert!(!is_effect_free(&graph, root));
}

#[test]
fn test_function_definitions_are_not_entered() {
    let (graph, root) = parse_stmt("def f():\n    print('hi')\n").unwrap();
    assert!(is_effect_free(&graph, root));
}

#[test]
fn test_extended_whitelist() {
    let classifier = EffectFreeClassifier::new()
        .unwrap()
        .with_pure_callables(["len", "math.floor"])
        .unwrap();
    let (graph, root) = parse_expr("len(xs) + math.floor(y)").unwrap();
    assert!(classifier.is_effect_free(&graph, root));
    assert!(!is_effect_free(&graph, root));
}

#[test]
fn test_missing_node_is_impure() {
    let mut graph = Graph::new();
    let dangling = graph.add_node(Node::Pass).unwrap();
    let list = graph
        .add_node(Node::List {
            elts: vec![dangling],
        })
        .unwrap();
    graph.nodes.remove(&dangling);
    assert!(!is_effect_free(&graph, list));
}
