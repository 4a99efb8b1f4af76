//! Reference implementations of the evaluation and module collaborators

use crate::context::{EvalContext, ModuleResolver};
use crate::error::EvalError;
use inliner_core::ast::{Graph, Node, NodeId};
use inliner_core::value::ModuleInfo;
use inliner_core::{from_literal, Value};
use inliner_parser::parse_expr;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Name bindings that expressions are evaluated against.
///
/// Evaluation covers names, attribute chains, tuples and lists of those, and
/// the literal forms [`from_literal`] understands. Nothing is ever called.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bind(name, value);
        self
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

impl EvalContext for Scope {
    fn eval(&self, graph: &Graph, node: NodeId) -> Result<Value, EvalError> {
        match graph.node(node)? {
            Node::Name { id } => self
                .lookup(id)
                .cloned()
                .ok_or_else(|| EvalError::UnboundName(id.clone())),
            Node::Attribute { value, attr } => {
                let base = self.eval(graph, *value)?;
                base.get_attr(attr)
                    .ok_or_else(|| EvalError::MissingAttribute {
                        type_name: base.type_name().to_string(),
                        attr: attr.clone(),
                    })
            }
            Node::Tuple { elts } => Ok(Value::Tuple(self.eval_all(graph, elts)?)),
            Node::List { elts } => Ok(Value::List(self.eval_all(graph, elts)?)),
            other => from_literal(graph, node).map_err(|_| EvalError::Unsupported(other.kind())),
        }
    }

    fn eval_path(&self, source: &str) -> Result<Value, EvalError> {
        let (graph, root) = parse_expr(source)?;
        self.eval(&graph, root)
    }
}

impl Scope {
    fn eval_all(&self, graph: &Graph, ids: &[NodeId]) -> Result<Vec<Value>, EvalError> {
        ids.iter().map(|id| self.eval(graph, *id)).collect()
    }
}

/// Modules known by dotted name
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<String, Arc<ModuleInfo>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under its own name, replacing any earlier entry
    pub fn register(&mut self, module: Arc<ModuleInfo>) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn with_module(mut self, module: Arc<ModuleInfo>) -> Self {
        self.register(module);
        self
    }
}

impl ModuleResolver for ModuleRegistry {
    fn import_module(&self, name: &str) -> Option<Arc<ModuleInfo>> {
        self.modules.get(name).cloned()
    }
}
