//! Parser error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character at line {line}, column {column}")]
    UnexpectedCharacter { line: usize, column: usize },

    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Unindent does not match any outer indentation level at line {line}")]
    InconsistentIndent { line: usize },

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("Maximum parsing depth exceeded: depth {depth} exceeds limit of {max_depth}")]
    MaxDepthExceeded { depth: usize, max_depth: usize },
}

impl From<inliner_core::Error> for ParseError {
    fn from(err: inliner_core::Error) -> Self {
        ParseError::InvalidSyntax(format!("Core error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
