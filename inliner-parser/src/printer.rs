//! Renders trees back to source text
//!
//! Parentheses are inserted only where operator precedence requires them.
//! Provenance statements are either shown as `#` comment lines or dropped,
//! depending on [`RenderOptions::comments`].

use inliner_core::ast::{BinaryOperator, BoolOperator, Graph, Literal, Node, NodeId, UnaryOperator};
use inliner_core::{comment, Comment, Error, Result};
use tracing::trace;

const INDENT: &str = "    ";

// Binding strength, loosest first
const TUPLE: u8 = 0;
const OR: u8 = 1;
const AND: u8 = 2;
const NOT: u8 = 3;
const COMPARE: u8 = 4;
const BIT_OR: u8 = 5;
const BIT_XOR: u8 = 6;
const BIT_AND: u8 = 7;
const SHIFT: u8 = 8;
const ARITH: u8 = 9;
const TERM: u8 = 10;
const FACTOR: u8 = 11;
const POWER: u8 = 12;
const ATOM: u8 = 13;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show provenance statements as comment lines instead of dropping them
    pub comments: bool,
}

impl RenderOptions {
    pub fn with_comments() -> Self {
        Self { comments: true }
    }
}

/// Renders the statement, block or expression rooted at `node`
pub fn render(graph: &Graph, node: NodeId, options: RenderOptions) -> Result<String> {
    let mut printer = Printer {
        graph,
        options,
        out: String::new(),
        indent: 0,
        code_lines: 0,
    };
    printer.statement(node)?;
    Ok(printer.out.trim_end().to_string())
}

/// Plain rendering without provenance comments
pub fn to_source(graph: &Graph, node: NodeId) -> Result<String> {
    render(graph, node, RenderOptions::default())
}

struct Printer<'g> {
    graph: &'g Graph,
    options: RenderOptions,
    out: String,
    indent: usize,
    /// Lines of code written so far, comment lines excluded
    code_lines: usize,
}

impl<'g> Printer<'g> {
    fn statement(&mut self, id: NodeId) -> Result<()> {
        let graph = self.graph;
        match graph.node(id)? {
            Node::Module { body } => {
                for stmt in body {
                    self.statement(*stmt)?;
                }
            }
            Node::Expr { value } => {
                if let Some(comment) = Comment::from_stmt(graph, id) {
                    if self.options.comments {
                        self.comment(&comment);
                    }
                    return Ok(());
                }
                if comment::is_marked(graph, id) {
                    trace!("dropping provenance record {id} with no comment form");
                    return Ok(());
                }
                let text = self.expr(*value, TUPLE)?;
                self.line(&text);
            }
            Node::Assign { targets, value } => {
                let mut parts = Vec::with_capacity(targets.len() + 1);
                for target in targets {
                    parts.push(self.bare(*target)?);
                }
                parts.push(self.bare(*value)?);
                self.line(&parts.join(" = "));
            }
            Node::AugAssign { target, op, value } => {
                let text = format!(
                    "{} {}= {}",
                    self.expr(*target, TUPLE)?,
                    op.symbol(),
                    self.expr(*value, TUPLE)?
                );
                self.line(&text);
            }
            Node::Return { value: None } => self.line("return"),
            Node::Return { value: Some(value) } => {
                let text = format!("return {}", self.bare(*value)?);
                self.line(&text);
            }
            Node::Pass => self.line("pass"),
            Node::Assert { test, msg } => {
                let mut text = format!("assert {}", self.expr(*test, OR)?);
                if let Some(msg) = msg {
                    text.push_str(", ");
                    text.push_str(&self.expr(*msg, OR)?);
                }
                self.line(&text);
            }
            Node::FunctionDef { name, params, body } => {
                self.line(&format!("def {name}({}):", params.join(", ")));
                self.block(body)?;
            }
            Node::ClassDef { name, bases, body } => {
                let header = if bases.is_empty() {
                    format!("class {name}:")
                } else {
                    format!("class {name}({}):", self.expr_list(bases)?)
                };
                self.line(&header);
                self.block(body)?;
            }
            Node::If { test, body, orelse } => self.if_statement("if", *test, body, orelse)?,
            Node::While { test, body } => {
                let text = format!("while {}:", self.expr(*test, OR)?);
                self.line(&text);
                self.block(body)?;
            }
            Node::For { target, iter, body } => {
                let text = format!(
                    "for {} in {}:",
                    self.bare(*target)?,
                    self.bare(*iter)?
                );
                self.line(&text);
                self.block(body)?;
            }
            _ => {
                let text = self.expr(id, TUPLE)?;
                self.line(&text);
            }
        }
        Ok(())
    }

    fn if_statement(
        &mut self,
        keyword: &str,
        test: NodeId,
        body: &'g [NodeId],
        orelse: &'g [NodeId],
    ) -> Result<()> {
        let header = format!("{keyword} {}:", self.expr(test, OR)?);
        self.line(&header);
        self.block(body)?;

        match orelse {
            [] => Ok(()),
            [single] => match self.graph.node(*single)? {
                Node::If { test, body, orelse } => self.if_statement("elif", *test, body, orelse),
                _ => {
                    self.line("else:");
                    self.block(orelse)
                }
            },
            _ => {
                self.line("else:");
                self.block(orelse)
            }
        }
    }

    /// An indented block; renders `pass` if nothing but comments came out
    fn block(&mut self, body: &[NodeId]) -> Result<()> {
        self.indent += 1;
        let before = self.code_lines;
        for stmt in body {
            self.statement(*stmt)?;
        }
        if self.code_lines == before {
            self.line("pass");
        }
        self.indent -= 1;
        Ok(())
    }

    fn line(&mut self, text: &str) {
        self.write_indent();
        self.out.push_str(text);
        self.out.push('\n');
        self.code_lines += 1;
    }

    fn comment(&mut self, comment: &Comment) {
        for text in comment.render().split('\n') {
            if text.is_empty() {
                if !self.out.is_empty() {
                    self.out.push('\n');
                }
                continue;
            }
            self.write_indent();
            self.out.push_str("# ");
            self.out.push_str(text);
            self.out.push('\n');
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    // Expressions

    /// Renders `id`, parenthesized if it binds looser than `min`
    fn expr(&self, id: NodeId, min: u8) -> Result<String> {
        let (text, prec) = self.expr_with_precedence(id)?;
        Ok(if prec < min { format!("({text})") } else { text })
    }

    /// Tuples of two or more items lose their parentheses where the grammar
    /// allows a bare expression list
    fn bare(&self, id: NodeId) -> Result<String> {
        match self.graph.node(id)? {
            Node::Tuple { elts } if elts.len() > 1 => self.expr_list(elts),
            _ => self.expr(id, TUPLE),
        }
    }

    fn expr_list(&self, ids: &[NodeId]) -> Result<String> {
        let parts = ids
            .iter()
            .map(|id| self.expr(*id, OR))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(", "))
    }

    fn expr_with_precedence(&self, id: NodeId) -> Result<(String, u8)> {
        let node = self.graph.node(id)?;
        let rendered = match node {
            Node::Literal(lit) => {
                let negative = match lit {
                    Literal::Int(i) => *i < 0,
                    Literal::Float(x) => x.is_sign_negative(),
                    _ => false,
                };
                (lit.to_string(), if negative { FACTOR } else { ATOM })
            }
            Node::Name { id } => (id.clone(), ATOM),
            Node::Attribute { value, attr } => (format!("{}.{attr}", self.expr(*value, ATOM)?), ATOM),
            Node::Call {
                func,
                args,
                keywords,
            } => {
                let mut parts = Vec::with_capacity(args.len() + keywords.len());
                for arg in args {
                    parts.push(self.expr(*arg, OR)?);
                }
                for kw in keywords {
                    parts.push(format!("{}={}", kw.arg, self.expr(kw.value, OR)?));
                }
                (
                    format!("{}({})", self.expr(*func, ATOM)?, parts.join(", ")),
                    ATOM,
                )
            }
            Node::BinOp { left, op, right } => {
                let prec = binary_precedence(*op);
                let (left_min, right_min) = if *op == BinaryOperator::Pow {
                    (ATOM, FACTOR)
                } else {
                    (prec, prec + 1)
                };
                let text = format!(
                    "{} {} {}",
                    self.expr(*left, left_min)?,
                    op.symbol(),
                    self.expr(*right, right_min)?
                );
                (text, prec)
            }
            Node::UnaryOp { op, operand } => match op {
                UnaryOperator::Not => (format!("not {}", self.expr(*operand, NOT)?), NOT),
                _ => (
                    format!("{}{}", op.symbol(), self.expr(*operand, FACTOR)?),
                    FACTOR,
                ),
            },
            Node::BoolOp { op, values } => {
                let prec = match op {
                    BoolOperator::Or => OR,
                    BoolOperator::And => AND,
                };
                let parts = values
                    .iter()
                    .map(|v| self.expr(*v, prec + 1))
                    .collect::<Result<Vec<_>>>()?;
                (parts.join(&format!(" {} ", op.keyword())), prec)
            }
            Node::Compare {
                left,
                ops,
                comparators,
            } => {
                let mut text = self.expr(*left, BIT_OR)?;
                for (op, comparator) in ops.iter().zip(comparators) {
                    text.push_str(&format!(" {} {}", op.symbol(), self.expr(*comparator, BIT_OR)?));
                }
                (text, COMPARE)
            }
            Node::List { elts } => (format!("[{}]", self.expr_list(elts)?), ATOM),
            Node::Tuple { elts } => match elts.as_slice() {
                [single] => (format!("({},)", self.expr(*single, OR)?), ATOM),
                _ => (format!("({})", self.expr_list(elts)?), ATOM),
            },
            Node::Set { elts } if elts.is_empty() => ("set()".to_string(), ATOM),
            Node::Set { elts } => (format!("{{{}}}", self.expr_list(elts)?), ATOM),
            Node::Dict { keys, values } => {
                let mut parts = Vec::with_capacity(keys.len());
                for (k, v) in keys.iter().zip(values) {
                    parts.push(format!("{}: {}", self.expr(*k, OR)?, self.expr(*v, OR)?));
                }
                (format!("{{{}}}", parts.join(", ")), ATOM)
            }
            Node::Subscript { value, slice } => {
                let index = match self.graph.node(*slice)? {
                    Node::Tuple { elts } if !elts.is_empty() => {
                        let parts = elts
                            .iter()
                            .map(|e| self.slice_item(*e))
                            .collect::<Result<Vec<_>>>()?;
                        if parts.len() == 1 {
                            format!("{},", parts[0])
                        } else {
                            parts.join(", ")
                        }
                    }
                    _ => self.slice_item(*slice)?,
                };
                (format!("{}[{index}]", self.expr(*value, ATOM)?), ATOM)
            }
            Node::Slice { .. } => (self.slice_item(id)?, ATOM),
            other => return Err(Error::NotAnExpression(other.kind())),
        };
        Ok(rendered)
    }

    fn slice_item(&self, id: NodeId) -> Result<String> {
        let Node::Slice { lower, upper, step } = self.graph.node(id)? else {
            return self.expr(id, OR);
        };
        let part = |bound: &Option<NodeId>| -> Result<String> {
            match bound {
                Some(id) => self.expr(*id, OR),
                None => Ok(String::new()),
            }
        };
        let mut text = format!("{}:{}", part(lower)?, part(upper)?);
        if step.is_some() {
            text.push(':');
            text.push_str(&part(step)?);
        }
        Ok(text)
    }
}

fn binary_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::BitOr => BIT_OR,
        BinaryOperator::BitXor => BIT_XOR,
        BinaryOperator::BitAnd => BIT_AND,
        BinaryOperator::LShift | BinaryOperator::RShift => SHIFT,
        BinaryOperator::Add | BinaryOperator::Sub => ARITH,
        BinaryOperator::Mult
        | BinaryOperator::MatMult
        | BinaryOperator::Div
        | BinaryOperator::FloorDiv
        | BinaryOperator::Mod => TERM,
        BinaryOperator::Pow => POWER,
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
