//! AST representation using an arena graph with a metadata side-table
//!
//! Nodes reference their children by [`NodeId`]. Anything that is not part of
//! the program's structure (source positions, for instance) lives in
//! [`Graph::metadata`], so comparing two node payloads never has to skip
//! position fields.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Type alias for the HashMap implementation used in the AST
pub type AstHashMap<K, V> = FxHashMap<K, V>;

/// Type alias for the HashSet implementation used in the AST
pub type AstHashSet<T> = FxHashSet<T>;

/// Node identifier in the AST graph
///
/// Uses NonZeroU32 internally to enable null pointer optimization for Option<NodeId>.
/// NodeId(0) is reserved as an invalid/null node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub NonZeroU32);

impl NodeId {
    /// Creates a new NodeId from a u32.
    /// Returns None if the value is 0.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(NodeId)
    }

    /// Gets the inner u32 value
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A point in source text. Lines are 1-based, columns are 0-based byte
/// offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Source span of a node, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether `(line, column)` falls inside the span on both axes.
    pub fn contains(&self, line: usize, column: usize) -> bool {
        self.start.line <= line
            && line <= self.end.line
            && self.start.column <= column
            && column <= self.end.column
    }
}

/// Node metadata kept outside of the node payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Source location information
    pub span: Option<Span>,
}

/// AST graph representation
///
/// # Invariants
/// - `next_id` monotonically increases and is never reused
/// - NodeIds are unique within a graph
/// - All NodeId references in nodes must point to valid nodes in the graph
/// - The root_id, if present, must point to a valid node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: AstHashMap<NodeId, Node>,
    pub root_id: Option<NodeId>,
    /// Next ID to assign. Starts at 1 and monotonically increases.
    next_id: u32,
    /// Optional metadata for nodes
    pub metadata: AstHashMap<NodeId, NodeMetadata>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: AstHashMap::default(),
            root_id: None,
            next_id: 1, // Start at 1 since 0 is reserved for null
            metadata: AstHashMap::default(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> crate::error::Result<NodeId> {
        // Check for overflow before incrementing
        if self.next_id == u32::MAX {
            return Err(crate::error::Error::GraphNodeIdOverflow);
        }
        let id = NodeId::new(self.next_id).ok_or(crate::error::Error::GraphNodeIdOverflow)?;
        self.next_id += 1;
        self.nodes.insert(id, node);
        Ok(id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Like [`Graph::get_node`] but reports a dangling id as an error
    pub fn node(&self, id: NodeId) -> crate::error::Result<&Node> {
        self.get_node(id).ok_or(crate::error::Error::MissingNode(id))
    }

    /// Gets or creates metadata for a node
    pub fn metadata_mut(&mut self, id: NodeId) -> &mut NodeMetadata {
        self.metadata.entry(id).or_default()
    }

    /// Records the source span of a node
    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.metadata_mut(id).span = Some(span);
    }

    /// Source span of a node, if the parser recorded one
    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.metadata.get(&id)?.span
    }

    /// Collects all child node IDs of a given node, in field order
    pub fn children(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut children = Vec::new();
        if let Some(node) = self.get_node(node_id) {
            node.for_each_child(|child| children.push(child));
        }
        children
    }

    /// Performs a pre-order depth-first traversal starting from the given node.
    /// Uses an explicit stack so deep trees cannot overflow.
    pub fn dfs_from(&self, start: NodeId, mut visitor: impl FnMut(NodeId, &Node)) {
        let mut visited = AstHashSet::default();
        let mut stack = vec![start];

        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            if let Some(node) = self.get_node(node_id) {
                visitor(node_id, node);
                // Push in reverse order so they're visited in field order
                for child in self.children(node_id).into_iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    /// Builds a `Name` / `Attribute` chain for a dotted path such as
    /// `utils.to_utf8` and returns the outermost node.
    pub fn name_path(&mut self, dotted: &str) -> crate::error::Result<NodeId> {
        let mut parts = dotted.split('.');
        let head = parts.next().unwrap_or_default();
        let mut current = self.add_node(Node::Name {
            id: head.to_string(),
        })?;
        for attr in parts {
            current = self.add_node(Node::Attribute {
                value: current,
                attr: attr.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Copies the subtree rooted at `root` in `other` into this graph.
    /// Metadata is not carried over.
    pub fn import_subtree(&mut self, other: &Graph, root: NodeId) -> crate::error::Result<NodeId> {
        let node = other.node(root)?;
        let mut mapped = Vec::new();
        for child in other.children(root) {
            mapped.push(self.import_subtree(other, child)?);
        }
        let mut mapped = mapped.into_iter();
        let copy = node.map_children(|old| mapped.next().unwrap_or(old));
        self.add_node(copy)
    }
}

/// Keyword argument of a call, `name=value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub arg: String,
    pub value: NodeId,
}

/// AST node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Module {
        body: Vec<NodeId>,
    },

    // Statements
    Expr {
        value: NodeId,
    },
    Assign {
        targets: Vec<NodeId>,
        value: NodeId,
    },
    AugAssign {
        target: NodeId,
        op: BinaryOperator,
        value: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    Pass,
    Assert {
        test: NodeId,
        msg: Option<NodeId>,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<NodeId>,
    },
    ClassDef {
        name: String,
        bases: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    If {
        test: NodeId,
        body: Vec<NodeId>,
        orelse: Vec<NodeId>,
    },
    While {
        test: NodeId,
        body: Vec<NodeId>,
    },
    For {
        target: NodeId,
        iter: NodeId,
        body: Vec<NodeId>,
    },

    // Expressions
    Literal(Literal),
    Name {
        id: String,
    },
    Attribute {
        value: NodeId,
        attr: String,
    },
    Call {
        func: NodeId,
        args: Vec<NodeId>,
        keywords: Vec<Keyword>,
    },
    BinOp {
        left: NodeId,
        op: BinaryOperator,
        right: NodeId,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: NodeId,
    },
    BoolOp {
        op: BoolOperator,
        values: Vec<NodeId>,
    },
    Compare {
        left: NodeId,
        ops: Vec<CompareOperator>,
        comparators: Vec<NodeId>,
    },
    List {
        elts: Vec<NodeId>,
    },
    Tuple {
        elts: Vec<NodeId>,
    },
    Set {
        elts: Vec<NodeId>,
    },
    Dict {
        keys: Vec<NodeId>,
        values: Vec<NodeId>,
    },
    Subscript {
        value: NodeId,
        slice: NodeId,
    },
    Slice {
        lower: Option<NodeId>,
        upper: Option<NodeId>,
        step: Option<NodeId>,
    },
}

impl Node {
    /// Calls `f` on every child id, in field order
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        match self {
            Node::Module { body } => body.iter().copied().for_each(f),
            Node::Expr { value } => f(*value),
            Node::Assign { targets, value } => {
                targets.iter().copied().for_each(&mut f);
                f(*value);
            }
            Node::AugAssign { target, value, .. } => {
                f(*target);
                f(*value);
            }
            Node::Return { value } => value.iter().copied().for_each(f),
            Node::Pass | Node::Literal(_) | Node::Name { .. } => {}
            Node::Assert { test, msg } => {
                f(*test);
                msg.iter().copied().for_each(f);
            }
            Node::FunctionDef { body, .. } => body.iter().copied().for_each(f),
            Node::ClassDef { bases, body, .. } => {
                bases.iter().copied().for_each(&mut f);
                body.iter().copied().for_each(f);
            }
            Node::If { test, body, orelse } => {
                f(*test);
                body.iter().copied().for_each(&mut f);
                orelse.iter().copied().for_each(f);
            }
            Node::While { test, body } => {
                f(*test);
                body.iter().copied().for_each(f);
            }
            Node::For { target, iter, body } => {
                f(*target);
                f(*iter);
                body.iter().copied().for_each(f);
            }
            Node::Attribute { value, .. } => f(*value),
            Node::Call {
                func,
                args,
                keywords,
            } => {
                f(*func);
                args.iter().copied().for_each(&mut f);
                keywords.iter().for_each(|kw| f(kw.value));
            }
            Node::BinOp { left, right, .. } => {
                f(*left);
                f(*right);
            }
            Node::UnaryOp { operand, .. } => f(*operand),
            Node::BoolOp { values, .. } => values.iter().copied().for_each(f),
            Node::Compare {
                left, comparators, ..
            } => {
                f(*left);
                comparators.iter().copied().for_each(f);
            }
            Node::List { elts } | Node::Tuple { elts } | Node::Set { elts } => {
                elts.iter().copied().for_each(f)
            }
            Node::Dict { keys, values } => {
                keys.iter().copied().for_each(&mut f);
                values.iter().copied().for_each(f);
            }
            Node::Subscript { value, slice } => {
                f(*value);
                f(*slice);
            }
            Node::Slice { lower, upper, step } => {
                lower.iter().copied().for_each(&mut f);
                upper.iter().copied().for_each(&mut f);
                step.iter().copied().for_each(f);
            }
        }
    }

    /// Returns a copy of this node with every child id replaced by `f(id)`.
    /// Children are visited in the same order as [`Node::for_each_child`].
    pub fn map_children(&self, mut f: impl FnMut(NodeId) -> NodeId) -> Node {
        fn map_all(ids: &[NodeId], f: &mut impl FnMut(NodeId) -> NodeId) -> Vec<NodeId> {
            ids.iter().map(|id| f(*id)).collect()
        }

        match self {
            Node::Module { body } => Node::Module {
                body: map_all(body, &mut f),
            },
            Node::Expr { value } => Node::Expr { value: f(*value) },
            Node::Assign { targets, value } => {
                let targets = map_all(targets, &mut f);
                Node::Assign {
                    targets,
                    value: f(*value),
                }
            }
            Node::AugAssign { target, op, value } => {
                let target = f(*target);
                Node::AugAssign {
                    target,
                    op: *op,
                    value: f(*value),
                }
            }
            Node::Return { value } => Node::Return {
                value: value.map(&mut f),
            },
            Node::Pass => Node::Pass,
            Node::Assert { test, msg } => {
                let test = f(*test);
                Node::Assert {
                    test,
                    msg: msg.map(&mut f),
                }
            }
            Node::FunctionDef { name, params, body } => Node::FunctionDef {
                name: name.clone(),
                params: params.clone(),
                body: map_all(body, &mut f),
            },
            Node::ClassDef { name, bases, body } => {
                let bases = map_all(bases, &mut f);
                Node::ClassDef {
                    name: name.clone(),
                    bases,
                    body: map_all(body, &mut f),
                }
            }
            Node::If { test, body, orelse } => {
                let test = f(*test);
                let body = map_all(body, &mut f);
                Node::If {
                    test,
                    body,
                    orelse: map_all(orelse, &mut f),
                }
            }
            Node::While { test, body } => {
                let test = f(*test);
                Node::While {
                    test,
                    body: map_all(body, &mut f),
                }
            }
            Node::For { target, iter, body } => {
                let target = f(*target);
                let iter = f(*iter);
                Node::For {
                    target,
                    iter,
                    body: map_all(body, &mut f),
                }
            }
            Node::Literal(lit) => Node::Literal(lit.clone()),
            Node::Name { id } => Node::Name { id: id.clone() },
            Node::Attribute { value, attr } => Node::Attribute {
                value: f(*value),
                attr: attr.clone(),
            },
            Node::Call {
                func,
                args,
                keywords,
            } => {
                let func = f(*func);
                let args = map_all(args, &mut f);
                let keywords = keywords
                    .iter()
                    .map(|kw| Keyword {
                        arg: kw.arg.clone(),
                        value: f(kw.value),
                    })
                    .collect();
                Node::Call {
                    func,
                    args,
                    keywords,
                }
            }
            Node::BinOp { left, op, right } => {
                let left = f(*left);
                Node::BinOp {
                    left,
                    op: *op,
                    right: f(*right),
                }
            }
            Node::UnaryOp { op, operand } => Node::UnaryOp {
                op: *op,
                operand: f(*operand),
            },
            Node::BoolOp { op, values } => Node::BoolOp {
                op: *op,
                values: map_all(values, &mut f),
            },
            Node::Compare {
                left,
                ops,
                comparators,
            } => {
                let left = f(*left);
                Node::Compare {
                    left,
                    ops: ops.clone(),
                    comparators: map_all(comparators, &mut f),
                }
            }
            Node::List { elts } => Node::List {
                elts: map_all(elts, &mut f),
            },
            Node::Tuple { elts } => Node::Tuple {
                elts: map_all(elts, &mut f),
            },
            Node::Set { elts } => Node::Set {
                elts: map_all(elts, &mut f),
            },
            Node::Dict { keys, values } => {
                let keys = map_all(keys, &mut f);
                Node::Dict {
                    keys,
                    values: map_all(values, &mut f),
                }
            }
            Node::Subscript { value, slice } => {
                let value = f(*value);
                Node::Subscript {
                    value,
                    slice: f(*slice),
                }
            }
            Node::Slice { lower, upper, step } => {
                let lower = lower.map(&mut f);
                let upper = upper.map(&mut f);
                Node::Slice {
                    lower,
                    upper,
                    step: step.map(&mut f),
                }
            }
        }
    }

    /// Short name of the node kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Module { .. } => "Module",
            Node::Expr { .. } => "Expr",
            Node::Assign { .. } => "Assign",
            Node::AugAssign { .. } => "AugAssign",
            Node::Return { .. } => "Return",
            Node::Pass => "Pass",
            Node::Assert { .. } => "Assert",
            Node::FunctionDef { .. } => "FunctionDef",
            Node::ClassDef { .. } => "ClassDef",
            Node::If { .. } => "If",
            Node::While { .. } => "While",
            Node::For { .. } => "For",
            Node::Literal(_) => "Literal",
            Node::Name { .. } => "Name",
            Node::Attribute { .. } => "Attribute",
            Node::Call { .. } => "Call",
            Node::BinOp { .. } => "BinOp",
            Node::UnaryOp { .. } => "UnaryOp",
            Node::BoolOp { .. } => "BoolOp",
            Node::Compare { .. } => "Compare",
            Node::List { .. } => "List",
            Node::Tuple { .. } => "Tuple",
            Node::Set { .. } => "Set",
            Node::Dict { .. } => "Dict",
            Node::Subscript { .. } => "Subscript",
            Node::Slice { .. } => "Slice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Bool(bool),
    None,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` that marks a float
            Literal::Float(fl) => write!(f, "{fl:?}"),
            Literal::Str(s) => write!(f, "{}", quote_str(s)),
            Literal::Bytes(b) => write!(f, "{}", quote_bytes(b)),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::None => write!(f, "None"),
        }
    }
}

fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out.push('\'');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::MatMult => "@",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::LShift => "<<",
            BinaryOperator::RShift => ">>",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Invert,
    UAdd,
    USub,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not ",
            UnaryOperator::Invert => "~",
            UnaryOperator::UAdd => "+",
            UnaryOperator::USub => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CompareOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOperator::Eq => "==",
            CompareOperator::NotEq => "!=",
            CompareOperator::Lt => "<",
            CompareOperator::LtE => "<=",
            CompareOperator::Gt => ">",
            CompareOperator::GtE => ">=",
            CompareOperator::Is => "is",
            CompareOperator::IsNot => "is not",
            CompareOperator::In => "in",
            CompareOperator::NotIn => "not in",
        }
    }
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;
