//! Conservative effect-free classification
//!
//! A fragment is effect-free only if every node in it is one of a small set
//! of side-effect-free kinds and every call in it targets a known pure
//! callable with positional arguments only. Pure code may be reported as
//! impure; the reverse never happens.

use inliner_core::ast::{Graph, Node, NodeId};
use inliner_core::{structurally_equal, Result};
use rustc_hash::FxHashSet;
use std::sync::OnceLock;
use tracing::trace;

/// Callables whose invocation is assumed to have no side effects
pub const PURE_CALLABLES: &[&str] = &[
    "str",
    "tuple",
    "list",
    "int",
    "float",
    "utils.to_utf8",
    "LooseVersion",
];

/// Effect-free classifier with a configurable pure-callable whitelist
#[derive(Debug, Clone)]
pub struct EffectFreeClassifier {
    /// Holds one reference expression per whitelisted callable
    callables: Graph,
    roots: Vec<NodeId>,
}

impl EffectFreeClassifier {
    /// Classifier that knows the default [`PURE_CALLABLES`]
    pub fn new() -> Result<Self> {
        Self {
            callables: Graph::new(),
            roots: Vec::new(),
        }
        .with_pure_callables(PURE_CALLABLES.iter().copied())
    }

    /// Adds dotted paths (e.g. `os.path.join`) to the pure-callable whitelist
    pub fn with_pure_callables<'p>(
        mut self,
        paths: impl IntoIterator<Item = &'p str>,
    ) -> Result<Self> {
        for path in paths {
            let root = self.callables.name_path(path)?;
            self.roots.push(root);
        }
        Ok(self)
    }

    /// Whether evaluating the fragment rooted at `node` is free of side effects.
    ///
    /// Nested function definitions are not entered. A dangling child id makes
    /// the fragment impure.
    pub fn is_effect_free(&self, graph: &Graph, node: NodeId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![node];

        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            let Some(node) = graph.get_node(node_id) else {
                trace!("{node_id} is missing, treating fragment as impure");
                return false;
            };

            match node {
                Node::FunctionDef { .. } => continue,
                // keyword arguments are not an effect-free kind
                Node::Call { keywords, .. } if !keywords.is_empty() => {
                    trace!("call at {node_id} passes keyword arguments");
                    return false;
                }
                Node::Call { func, .. } if !self.is_pure_callable(graph, *func) => {
                    trace!("call at {node_id} is not to a known pure callable");
                    return false;
                }
                Node::Call { .. }
                | Node::Literal(_)
                | Node::Name { .. }
                | Node::Attribute { .. }
                | Node::BinOp { .. }
                | Node::UnaryOp { .. }
                | Node::List { .. }
                | Node::Tuple { .. }
                | Node::Set { .. }
                | Node::Dict { .. }
                | Node::Subscript { .. }
                | Node::Slice { .. } => {}
                other => {
                    trace!("{} node at {node_id} may have effects", other.kind());
                    return false;
                }
            }

            node.for_each_child(|child| stack.push(child));
        }

        true
    }

    /// Whether `func` is structurally one of the whitelisted callables
    pub fn is_pure_callable(&self, graph: &Graph, func: NodeId) -> bool {
        self.roots
            .iter()
            .any(|root| structurally_equal(graph, func, &self.callables, *root))
    }
}

/// [`EffectFreeClassifier::is_effect_free`] with the default whitelist
pub fn is_effect_free(graph: &Graph, node: NodeId) -> bool {
    static DEFAULT: OnceLock<Option<EffectFreeClassifier>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| EffectFreeClassifier::new().ok())
        .as_ref()
        .is_some_and(|classifier| classifier.is_effect_free(graph, node))
}

#[cfg(test)]
#[path = "purity_tests.rs"]
mod tests;
