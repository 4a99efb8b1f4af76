//! Parser and printer for the Python subset the inliner rewrites
//!
//! Parsing produces an [`inliner_core::ast::Graph`] with a span recorded for
//! every node; printing turns a graph back into source text.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use error::{ParseError, Result};
pub use parser::Parser;
pub use printer::{render, to_source, RenderOptions};

use inliner_core::ast::{Graph, NodeId};

/// Parse source code into a graph rooted at a `Module` node.
///
/// The source is passed through [`dedent`] first, so spans are relative to
/// the dedented text.
pub fn parse_module(source: &str) -> Result<Graph> {
    let source = dedent(source);
    Parser::new(&source)?.parse_module()
}

/// Parse a single statement. The statement is also the graph's root.
pub fn parse_stmt(source: &str) -> Result<(Graph, NodeId)> {
    let source = dedent(source);
    Parser::new(&source)?.parse_single_statement()
}

/// Parse a single expression. The expression is also the graph's root.
pub fn parse_expr(source: &str) -> Result<(Graph, NodeId)> {
    let source = dedent(source);
    Parser::new(&source)?.parse_single_expression()
}

/// Normalizes an indented snippet so it parses at top level.
///
/// Explicit line joins are removed, and leading and trailing blank lines
/// dropped. Lines indented less than the first line are raised to its
/// indentation, then the common indentation is stripped.
pub fn dedent(source: &str) -> String {
    let joined = source.replace("\\\n", "");
    let trimmed = joined.trim_matches('\n');
    let lines: Vec<&str> = trimmed.split('\n').collect();

    let indent: String = lines
        .first()
        .map(|line| line[..indent_width(line)].to_string())
        .unwrap_or_default();

    let raised: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.starts_with(&indent) {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect();

    let margin = raised
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    raised
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte length of the leading run of spaces and tabs
fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches(|c: char| c == ' ' || c == '\t').len()
}
