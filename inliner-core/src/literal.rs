//! Conversion between runtime values and literal tree nodes

use crate::ast::{Graph, Literal, Node, NodeId, UnaryOperator};
use crate::error::{Error, Result};
use crate::value::Value;

/// Builds a literal expression in `graph` that evaluates to `value`.
///
/// Containers are checked before scalars. Infinite floats become a call to
/// `float("inf")` / `float("-inf")` since there is no infinite literal.
/// Parameterized type annotations fall back to `None`; that conversion is
/// lossy. Every other shape fails with [`Error::UnconvertibleValue`], and
/// `graph` is left untouched.
pub fn to_literal(graph: &mut Graph, value: &Value) -> Result<NodeId> {
    let mut scratch = Graph::new();
    let root = build(&mut scratch, value)?;
    graph.import_subtree(&scratch, root)
}

fn build(graph: &mut Graph, value: &Value) -> Result<NodeId> {
    match value {
        Value::Tuple(items) => {
            let elts = convert_all(graph, items)?;
            graph.add_node(Node::Tuple { elts })
        }
        Value::Dict(pairs) => {
            let mut keys = Vec::with_capacity(pairs.len());
            let mut values = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                keys.push(build(graph, k)?);
                values.push(build(graph, v)?);
            }
            graph.add_node(Node::Dict { keys, values })
        }
        Value::List(items) => {
            let elts = convert_all(graph, items)?;
            graph.add_node(Node::List { elts })
        }
        Value::Type(class) => graph.add_node(Node::Name {
            id: class.name.clone(),
        }),
        Value::Int(i) => graph.add_node(Node::Literal(Literal::Int(*i))),
        Value::Bool(b) => graph.add_node(Node::Literal(Literal::Bool(*b))),
        Value::Str(s) => graph.add_node(Node::Literal(Literal::Str(s.clone()))),
        Value::None => graph.add_node(Node::Literal(Literal::None)),
        // TODO: render parameterized annotations once annotation nodes exist
        Value::GenericAlias(_) => graph.add_node(Node::Literal(Literal::None)),
        Value::Float(x) if x.is_infinite() => {
            let func = graph.name_path("float")?;
            let text = if *x > 0.0 { "inf" } else { "-inf" };
            let arg = graph.add_node(Node::Literal(Literal::Str(text.to_string())))?;
            graph.add_node(Node::Call {
                func,
                args: vec![arg],
                keywords: Vec::new(),
            })
        }
        Value::Bytes(b) => graph.add_node(Node::Literal(Literal::Bytes(b.clone()))),
        other => Err(Error::UnconvertibleValue(other.to_string())),
    }
}

fn convert_all(graph: &mut Graph, items: &[Value]) -> Result<Vec<NodeId>> {
    items.iter().map(|item| build(graph, item)).collect()
}

/// Whether `value` has a literal form.
///
/// Only the "no representation" failure maps to `false`; any other error
/// from the conversion is returned as is.
pub fn can_convert(value: &Value) -> Result<bool> {
    let mut scratch = Graph::new();
    match build(&mut scratch, value) {
        Ok(_) => Ok(true),
        Err(Error::UnconvertibleValue(_)) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Evaluates a literal expression back into a value.
///
/// Accepts what [`to_literal`] produces for plain data: numbers (including
/// unary minus), strings, bytes, booleans, `None`, tuples, lists, dicts and the
/// `float("inf")` form. Names are rejected since they need a scope.
pub fn from_literal(graph: &Graph, node_id: NodeId) -> Result<Value> {
    let node = graph.node(node_id)?;
    let unconvertible = || Error::UnconvertibleValue(node.kind().to_string());

    match node {
        Node::Literal(lit) => Ok(match lit {
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Bytes(b) => Value::Bytes(b.clone()),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::None => Value::None,
        }),
        Node::UnaryOp {
            op: UnaryOperator::USub,
            operand,
        } => match from_literal(graph, *operand)? {
            Value::Int(i) => i.checked_neg().map(Value::Int).ok_or_else(unconvertible),
            Value::Float(x) => Ok(Value::Float(-x)),
            _ => Err(unconvertible()),
        },
        Node::Tuple { elts } => Ok(Value::Tuple(eval_all(graph, elts)?)),
        Node::List { elts } => Ok(Value::List(eval_all(graph, elts)?)),
        Node::Set { elts } => Ok(Value::Set(eval_all(graph, elts)?)),
        Node::Dict { keys, values } => {
            let keys = eval_all(graph, keys)?;
            let values = eval_all(graph, values)?;
            Ok(Value::Dict(keys.into_iter().zip(values).collect()))
        }
        Node::Call {
            func,
            args,
            keywords,
        } if keywords.is_empty() && args.len() == 1 => {
            let is_float = matches!(graph.get_node(*func), Some(Node::Name { id }) if id == "float");
            match (is_float, graph.get_node(args[0])) {
                (true, Some(Node::Literal(Literal::Str(text)))) => match text.as_str() {
                    "inf" => Ok(Value::Float(f64::INFINITY)),
                    "-inf" => Ok(Value::Float(f64::NEG_INFINITY)),
                    _ => Err(unconvertible()),
                },
                _ => Err(unconvertible()),
            }
        }
        _ => Err(unconvertible()),
    }
}

fn eval_all(graph: &Graph, ids: &[NodeId]) -> Result<Vec<Value>> {
    ids.iter().map(|id| from_literal(graph, *id)).collect()
}

#[cfg(test)]
#[path = "literal_tests.rs"]
mod tests;
