//! Collaborators that target matching and construction depend on

use crate::error::EvalError;
use inliner_core::ast::{Graph, NodeId, Span};
use inliner_core::value::ModuleInfo;
use inliner_core::Value;
use std::sync::Arc;

/// Resolves expressions to the runtime values they would produce
pub trait EvalContext {
    /// Evaluates the expression rooted at `node`
    fn eval(&self, graph: &Graph, node: NodeId) -> Result<Value, EvalError>;

    /// Evaluates expression source text such as a dotted path
    fn eval_path(&self, source: &str) -> Result<Value, EvalError>;

    /// Source span of `node`. Defaults to the graph's metadata side-table.
    fn span(&self, graph: &Graph, node: NodeId) -> Option<Span> {
        graph.span(node)
    }
}

/// Looks up importable modules by dotted name
pub trait ModuleResolver {
    fn import_module(&self, name: &str) -> Option<Arc<ModuleInfo>>;
}
