//! Provenance comments
//!
//! Passes leave machine-readable notes in the tree as string-literal
//! statements. The literal text is [`COMMENT_MARKER`] followed by the base64
//! encoding of the record's JSON form, so ordinary string statements in user
//! code are never mistaken for a note.

use crate::ast::{Graph, Literal, Node, NodeId};
use crate::error::Result;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Prefix that marks a string literal as a provenance comment
pub const COMMENT_MARKER: &str = "__inliner: ";

/// Serializes `record` into the marked string payload
pub fn encode_str<T: Serialize>(record: &T) -> Result<String> {
    let json = serde_json::to_vec(record)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(json);
    Ok(format!("{COMMENT_MARKER}{payload}"))
}

/// Inverse of [`encode_str`]. Unmarked or corrupt text yields `None`.
pub fn decode_str<T: DeserializeOwned>(text: &str) -> Option<T> {
    let payload = text.strip_prefix(COMMENT_MARKER)?;
    let bytes = match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(err) => {
            trace!("discarding provenance comment with bad payload: {err}");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => Some(record),
        Err(err) => {
            trace!("discarding provenance comment with unreadable record: {err}");
            None
        }
    }
}

/// Adds an expression statement carrying `record` to `graph` and returns it
pub fn encode<T: Serialize>(graph: &mut Graph, record: &T) -> Result<NodeId> {
    let text = encode_str(record)?;
    let value = graph.add_node(Node::Literal(Literal::Str(text)))?;
    graph.add_node(Node::Expr { value })
}

/// Reads a record back from an expression statement or a bare string literal
pub fn decode<T: DeserializeOwned>(graph: &Graph, node_id: NodeId) -> Option<T> {
    match graph.get_node(node_id)? {
        Node::Expr { value } => match graph.get_node(*value)? {
            Node::Literal(Literal::Str(text)) => decode_str(text),
            _ => None,
        },
        Node::Literal(Literal::Str(text)) => decode_str(text),
        _ => None,
    }
}

/// Whether `node_id` carries a well-formed provenance record of any shape
pub fn is_marked(graph: &Graph, node_id: NodeId) -> bool {
    decode::<serde_json::Value>(graph, node_id).is_some()
}

/// Note left where a function body was spliced in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionComment {
    /// Source of the call that was replaced
    pub code: String,
    /// Whether the note opens (rather than closes) the spliced region
    pub is_header: bool,
}

impl FunctionComment {
    pub fn new(code: impl Into<String>, is_header: bool) -> Self {
        Self {
            code: code.into(),
            is_header,
        }
    }
}

/// The provenance records the printer knows how to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comment {
    Function(FunctionComment),
    /// A note attributed to a named rewrite pass
    Pass { pass: String, body: FunctionComment },
}

impl Comment {
    /// Text shown to a reader, one comment line per text line. A leading
    /// empty line separates the note from the code above it.
    pub fn render(&self) -> String {
        match self {
            Comment::Function(comment) => format!("\n{}", comment.code),
            Comment::Pass { pass, body } => format!("\n{pass}: {}", body.code),
        }
    }

    pub fn to_stmt(&self, graph: &mut Graph) -> Result<NodeId> {
        encode(graph, self)
    }

    /// Reads a tagged [`Comment`], or a bare [`FunctionComment`] as written
    /// by [`encode`] directly
    pub fn from_stmt(graph: &Graph, node_id: NodeId) -> Option<Self> {
        decode(graph, node_id).or_else(|| decode(graph, node_id).map(Comment::Function))
    }
}
