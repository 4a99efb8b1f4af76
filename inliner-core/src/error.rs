//! Error types for the inliner core

use crate::ast::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The value has no literal representation in the tree
    #[error("No converter for {0}")]
    UnconvertibleValue(String),

    #[error("Graph node ID overflow: maximum number of nodes reached")]
    GraphNodeIdOverflow,

    #[error("Node {0} does not exist in graph")]
    MissingNode(NodeId),

    #[error("{0} node cannot appear in expression position")]
    NotAnExpression(&'static str),

    #[error("Failed to encode provenance comment: {0}")]
    CommentEncoding(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether this is the literalizer's "no representation" failure
    pub fn is_unconvertible(&self) -> bool {
        matches!(self, Error::UnconvertibleValue(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
