//! Inline targets and the call-site matching predicate
//!
//! Matching is total: anything the evaluation collaborator cannot resolve
//! makes that call shape a non-match rather than an error.

use crate::context::EvalContext;
use inliner_core::ast::{Graph, Node, NodeId};
use inliner_core::value::{ClassInfo, FunctionInfo, ModuleInfo};
use inliner_core::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What a rewrite pass wants inlined
#[derive(Debug, Clone)]
pub enum InlineTarget {
    /// Everything defined in the module or one of its submodules
    Module(Arc<ModuleInfo>),
    /// Exactly this function, also when reached as a bound method
    Function(Arc<FunctionInfo>),
    /// The class, its subclasses, and every method called on their instances
    Class(Arc<ClassInfo>),
    /// Whatever call sits under the cursor
    Cursor { line: usize, column: usize },
}

impl InlineTarget {
    /// Whether the call whose callee expression is `callee`, and whose callee
    /// evaluated to `value`, invokes something this target designates.
    pub fn should_inline(
        &self,
        graph: &Graph,
        callee: NodeId,
        value: &Value,
        ctx: &dyn EvalContext,
    ) -> bool {
        match self {
            InlineTarget::Module(module) => defined_in(value, &module.name),
            InlineTarget::Function(function) => match value {
                Value::Function(f) | Value::BoundMethod { function: f, .. } => {
                    Arc::ptr_eq(f, function)
                }
                _ => false,
            },
            InlineTarget::Class(class) => class_matches(class, graph, callee, value, ctx),
            InlineTarget::Cursor { line, column } => ctx
                .span(graph, callee)
                .is_some_and(|span| span.contains(*line, *column)),
        }
    }

    /// Evaluates the callee of `call` and applies [`InlineTarget::should_inline`].
    /// Returns false for anything that is not a call or whose callee cannot be
    /// evaluated.
    pub fn matches_call(&self, graph: &Graph, call: NodeId, ctx: &dyn EvalContext) -> bool {
        let Some(Node::Call { func, .. }) = graph.get_node(call) else {
            return false;
        };
        let value = match ctx.eval(graph, *func) {
            Ok(value) => value,
            Err(err) => {
                trace!("skipping call {call}: {err}");
                return false;
            }
        };
        let matched = self.should_inline(graph, *func, &value, ctx);
        if matched {
            debug!("call {call} to {value} matches target {self}");
        }
        matched
    }
}

/// Every call under `root` that `target` matches, in depth-first pre-order
pub fn find_call_sites(
    graph: &Graph,
    root: NodeId,
    target: &InlineTarget,
    ctx: &dyn EvalContext,
) -> Vec<NodeId> {
    let mut sites = Vec::new();
    graph.dfs_from(root, |node_id, node| {
        if matches!(node, Node::Call { .. }) && target.matches_call(graph, node_id, ctx) {
            sites.push(node_id);
        }
    });
    sites
}

/// Component-wise prefix test on dotted module paths
fn defined_in(value: &Value, module: &str) -> bool {
    let Some(defining) = value.defining_module() else {
        return false;
    };
    let target_parts: Vec<&str> = module.split('.').collect();
    let parts: Vec<&str> = defining.split('.').collect();
    parts.len() >= target_parts.len() && parts[..target_parts.len()] == target_parts[..]
}

fn class_matches(
    class: &ClassInfo,
    graph: &Graph,
    callee: NodeId,
    value: &Value,
    ctx: &dyn EvalContext,
) -> bool {
    match value {
        // Target()
        Value::Type(cls) => cls.is_subclass_of(class),
        // obj = Target(); obj.method()
        Value::BoundMethod { receiver, .. } => receiver
            .class()
            .is_some_and(|cls| cls.is_subclass_of(class)),
        // obj = Target(); Target.method(obj)
        Value::Function(function) => unbound_method_of(class, graph, callee, function, ctx),
        // obj = Target(); obj()
        Value::Instance(instance) => {
            instance.class.is_subclass_of(class) && instance.class.is_call_capable()
        }
        _ => false,
    }
}

/// A plain function is a method of the target when it is read off the class
/// (or an instance) in the call itself, or when its qualified name places it
/// directly inside the class. Only one level of nesting is resolved.
fn unbound_method_of(
    class: &ClassInfo,
    graph: &Graph,
    callee: NodeId,
    function: &FunctionInfo,
    ctx: &dyn EvalContext,
) -> bool {
    let owner = match graph.get_node(callee) {
        Some(Node::Attribute { value, .. }) => ctx.eval(graph, *value),
        _ => match function.qualname.rsplit_once('.') {
            Some((scope, _)) => ctx.eval_path(scope),
            None => return false,
        },
    };

    match owner {
        Ok(Value::Type(cls)) => cls.is_subclass_of(class),
        Ok(Value::Instance(instance)) => instance.class.is_subclass_of(class),
        Ok(_) => false,
        Err(err) => {
            trace!("could not resolve owner of {}: {err}", function.full_name());
            false
        }
    }
}

impl fmt::Display for InlineTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineTarget::Module(module) => write!(f, "\"{}\"", module.name),
            InlineTarget::Function(function) => write!(f, "\"{}\"", function.full_name()),
            InlineTarget::Class(class) => write!(f, "\"{}\"", class.full_name()),
            InlineTarget::Cursor { line, column } => write!(f, "CursorTarget(({line}, {column}))"),
        }
    }
}

/// Targets wrapping entities are equal when they wrap the same entity
impl PartialEq for InlineTarget {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (InlineTarget::Module(a), InlineTarget::Module(b)) => Arc::ptr_eq(a, b),
            (InlineTarget::Function(a), InlineTarget::Function(b)) => Arc::ptr_eq(a, b),
            (InlineTarget::Class(a), InlineTarget::Class(b)) => Arc::ptr_eq(a, b),
            (
                InlineTarget::Cursor { line, column },
                InlineTarget::Cursor {
                    line: other_line,
                    column: other_column,
                },
            ) => line == other_line && column == other_column,
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
