//! Recursive descent parser for the Python subset
//!
//! Every node the parser creates gets a span in the graph's metadata
//! side-table. A span runs from the node's first character to the position
//! just past its last one.

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, Lexeme, LineIndex, Spanned, Token};
use inliner_core::ast::{
    BinaryOperator, BoolOperator, CompareOperator, Graph, Keyword, Literal, Node, NodeId, Span,
    UnaryOperator,
};
use tracing::trace;

/// Number of binary-operator precedence levels between `|` and `*`
const BINARY_LEVELS: usize = 6;

pub struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    index: LineIndex,
    graph: Graph,
    pos: usize,
    /// End offset of the last significant token consumed
    position: usize,
    /// Current nesting of statements, expressions and unary operators
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Default nesting limit, well below what the call stack can take
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn new(source: &'a str) -> Result<Self> {
        let index = LineIndex::new(source);
        let tokens = tokenize(source, &index)?;
        Ok(Self {
            tokens,
            index,
            graph: Graph::new(),
            pos: 0,
            position: 0,
            depth: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        })
    }

    /// Set a custom nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole input as a module
    pub fn parse_module(mut self) -> Result<Graph> {
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_statement()?);
        }
        trace!("parsed module with {} top-level statements", body.len());

        let module = self.finish(Node::Module { body }, 0)?;
        self.graph.root_id = Some(module);
        Ok(self.graph)
    }

    /// Parses exactly one statement
    pub fn parse_single_statement(mut self) -> Result<(Graph, NodeId)> {
        if self.at_end() {
            return Err(ParseError::UnexpectedEof);
        }
        let stmt = self.parse_statement()?;
        if !self.at_end() {
            return Err(self.error("end of input after a single statement"));
        }
        self.graph.root_id = Some(stmt);
        Ok((self.graph, stmt))
    }

    /// Parses a single expression (a bare tuple is allowed)
    pub fn parse_single_expression(mut self) -> Result<(Graph, NodeId)> {
        let expr = self.parse_testlist()?;
        self.eat(&Token::Newline);
        if !self.at_end() {
            return Err(self.error("end of input after expression"));
        }
        self.graph.root_id = Some(expr);
        Ok((self.graph, expr))
    }

    // Statements

    fn parse_statement(&mut self) -> Result<NodeId> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<NodeId> {
        match self.token() {
            Some(Token::Def) => self.parse_function_def(),
            Some(Token::Class) => self.parse_class_def(),
            Some(Token::If) => self.parse_if(),
            Some(Token::While) => self.parse_while(),
            Some(Token::For) => self.parse_for(),
            _ => {
                let stmt = self.parse_simple_statement()?;
                self.consume(Token::Newline)?;
                Ok(stmt)
            }
        }
    }

    fn parse_function_def(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::Def)?;
        let name = self.parse_ident()?;

        self.consume(Token::LParen)?;
        let mut params = Vec::new();
        while !self.check(&Token::RParen) {
            params.push(self.parse_ident()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.consume(Token::RParen)?;
        self.consume(Token::Colon)?;

        let body = self.parse_suite()?;
        self.finish(Node::FunctionDef { name, params, body }, start)
    }

    fn parse_class_def(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::Class)?;
        let name = self.parse_ident()?;

        let bases = if self.eat(&Token::LParen) {
            self.parse_elements(Token::RParen)?
        } else {
            Vec::new()
        };
        self.consume(Token::Colon)?;

        let body = self.parse_suite()?;
        self.finish(Node::ClassDef { name, bases, body }, start)
    }

    /// Each `elif` becomes a nested `If` in the `orelse` branch of the one
    /// before it. The chain is collected first so its length costs no stack.
    fn parse_if(&mut self) -> Result<NodeId> {
        let mut branches = Vec::new();
        loop {
            let start = self.start();
            self.advance(); // consume `if` / `elif`
            let test = self.parse_test()?;
            self.consume(Token::Colon)?;
            let body = self.parse_suite()?;
            branches.push((start, test, body));
            if !self.check(&Token::Elif) {
                break;
            }
        }

        let mut orelse = if self.eat(&Token::Else) {
            self.consume(Token::Colon)?;
            self.parse_suite()?
        } else {
            Vec::new()
        };

        let mut node = None;
        for (start, test, body) in branches.into_iter().rev() {
            let id = self.finish(Node::If { test, body, orelse }, start)?;
            orelse = vec![id];
            node = Some(id);
        }
        node.ok_or_else(|| self.error("if statement"))
    }

    fn parse_while(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::While)?;
        let test = self.parse_test()?;
        self.consume(Token::Colon)?;
        let body = self.parse_suite()?;
        self.finish(Node::While { test, body }, start)
    }

    fn parse_for(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::For)?;
        let target = self.parse_target_list()?;
        self.consume(Token::In)?;
        let iter = self.parse_testlist()?;
        self.consume(Token::Colon)?;
        let body = self.parse_suite()?;
        self.finish(Node::For { target, iter, body }, start)
    }

    /// Either an indented block or a simple statement on the same line
    fn parse_suite(&mut self) -> Result<Vec<NodeId>> {
        if !self.eat(&Token::Newline) {
            let stmt = self.parse_simple_statement()?;
            self.consume(Token::Newline)?;
            return Ok(vec![stmt]);
        }

        if !matches!(self.current(), Lexeme::Indent) {
            return Err(self.error("an indented block"));
        }
        self.advance();

        let mut body = Vec::new();
        while !matches!(self.current(), Lexeme::Dedent | Lexeme::End) {
            body.push(self.parse_statement()?);
        }
        if matches!(self.current(), Lexeme::Dedent) {
            self.advance();
        }
        Ok(body)
    }

    fn parse_simple_statement(&mut self) -> Result<NodeId> {
        let start = self.start();
        match self.token() {
            Some(Token::Return) => {
                self.advance();
                let value = if self.at_expression_start() {
                    Some(self.parse_testlist()?)
                } else {
                    None
                };
                self.finish(Node::Return { value }, start)
            }
            Some(Token::Pass) => {
                self.advance();
                self.finish(Node::Pass, start)
            }
            Some(Token::Assert) => {
                self.advance();
                let test = self.parse_test()?;
                let msg = if self.eat(&Token::Comma) {
                    Some(self.parse_test()?)
                } else {
                    None
                };
                self.finish(Node::Assert { test, msg }, start)
            }
            _ => {
                let first = self.parse_testlist()?;

                if let Some(Token::AugAssign(op)) = self.token() {
                    let op = *op;
                    self.advance();
                    let value = self.parse_testlist()?;
                    return self.finish(
                        Node::AugAssign {
                            target: first,
                            op,
                            value,
                        },
                        start,
                    );
                }

                if self.check(&Token::Assign) {
                    // a = b = value
                    let mut targets = vec![first];
                    self.advance();
                    let mut value = self.parse_testlist()?;
                    while self.eat(&Token::Assign) {
                        targets.push(value);
                        value = self.parse_testlist()?;
                    }
                    return self.finish(Node::Assign { targets, value }, start);
                }

                self.finish(Node::Expr { value: first }, start)
            }
        }
    }

    /// Loop targets stop before `in`, so they are parsed below comparisons
    fn parse_target_list(&mut self) -> Result<NodeId> {
        let start = self.start();
        let first = self.parse_binary(0)?;
        if !self.check(&Token::Comma) {
            return Ok(first);
        }

        let mut elts = vec![first];
        while self.eat(&Token::Comma) {
            if self.check(&Token::In) {
                break;
            }
            elts.push(self.parse_binary(0)?);
        }
        self.finish(Node::Tuple { elts }, start)
    }

    // Expressions

    fn parse_testlist(&mut self) -> Result<NodeId> {
        let start = self.start();
        let first = self.parse_test()?;
        if !self.check(&Token::Comma) {
            return Ok(first);
        }

        let mut elts = vec![first];
        while self.eat(&Token::Comma) {
            if !self.at_expression_start() {
                break;
            }
            elts.push(self.parse_test()?);
        }
        self.finish(Node::Tuple { elts }, start)
    }

    fn parse_test(&mut self) -> Result<NodeId> {
        self.nested(Self::parse_or)
    }

    fn parse_or(&mut self) -> Result<NodeId> {
        let start = self.start();
        let first = self.parse_and()?;
        if !self.check(&Token::Or) {
            return Ok(first);
        }

        let mut values = vec![first];
        while self.eat(&Token::Or) {
            values.push(self.parse_and()?);
        }
        self.finish(
            Node::BoolOp {
                op: BoolOperator::Or,
                values,
            },
            start,
        )
    }

    fn parse_and(&mut self) -> Result<NodeId> {
        let start = self.start();
        let first = self.parse_not()?;
        if !self.check(&Token::And) {
            return Ok(first);
        }

        let mut values = vec![first];
        while self.eat(&Token::And) {
            values.push(self.parse_not()?);
        }
        self.finish(
            Node::BoolOp {
                op: BoolOperator::And,
                values,
            },
            start,
        )
    }

    fn parse_not(&mut self) -> Result<NodeId> {
        if !self.check(&Token::Not) {
            return self.parse_comparison();
        }
        let start = self.start();
        self.advance();
        let operand = self.nested(Self::parse_not)?;
        self.finish(
            Node::UnaryOp {
                op: UnaryOperator::Not,
                operand,
            },
            start,
        )
    }

    fn parse_comparison(&mut self) -> Result<NodeId> {
        let start = self.start();
        let left = self.parse_binary(0)?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();

        loop {
            let op = match self.token() {
                Some(Token::EqEq) => CompareOperator::Eq,
                Some(Token::NotEq) => CompareOperator::NotEq,
                Some(Token::Lt) => CompareOperator::Lt,
                Some(Token::LtE) => CompareOperator::LtE,
                Some(Token::Gt) => CompareOperator::Gt,
                Some(Token::GtE) => CompareOperator::GtE,
                Some(Token::In) => CompareOperator::In,
                Some(Token::Not) => {
                    // only `not in` can follow an operand
                    self.advance();
                    if !self.check(&Token::In) {
                        return Err(self.error("'in' after 'not'"));
                    }
                    CompareOperator::NotIn
                }
                Some(Token::Is) => {
                    self.advance();
                    if self.check(&Token::Not) {
                        CompareOperator::IsNot
                    } else {
                        ops.push(CompareOperator::Is);
                        comparators.push(self.parse_binary(0)?);
                        continue;
                    }
                }
                _ => break,
            };
            self.advance();
            ops.push(op);
            comparators.push(self.parse_binary(0)?);
        }

        if ops.is_empty() {
            return Ok(left);
        }
        self.finish(
            Node::Compare {
                left,
                ops,
                comparators,
            },
            start,
        )
    }

    /// Left-associative binary operators from `|` (level 0) down to the
    /// multiplicative operators; below that come unary operators.
    fn parse_binary(&mut self, level: usize) -> Result<NodeId> {
        if level == BINARY_LEVELS {
            return self.parse_factor();
        }

        let start = self.start();
        let mut left = self.parse_binary(level + 1)?;
        while let Some(op) = self.token().and_then(|t| binary_operator(t, level)) {
            self.advance();
            let right = self.parse_binary(level + 1)?;
            left = self.finish(Node::BinOp { left, op, right }, start)?;
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<NodeId> {
        let op = match self.token() {
            Some(Token::Minus) => UnaryOperator::USub,
            Some(Token::Plus) => UnaryOperator::UAdd,
            Some(Token::Tilde) => UnaryOperator::Invert,
            _ => return self.parse_power(),
        };
        let start = self.start();
        self.advance();

        // i64::MIN only exists as a negated literal
        if let (UnaryOperator::USub, Lexeme::Token(Token::Int(magnitude))) = (op, self.current()) {
            let folds = !matches!(
                self.lookahead(1),
                Lexeme::Token(
                    Token::DoubleStar | Token::LParen | Token::LBracket | Token::Dot
                )
            );
            if *magnitude == i64::MIN.unsigned_abs() && folds {
                self.advance();
                return self.finish(Node::Literal(Literal::Int(i64::MIN)), start);
            }
        }

        let operand = self.nested(Self::parse_factor)?;
        self.finish(Node::UnaryOp { op, operand }, start)
    }

    fn parse_power(&mut self) -> Result<NodeId> {
        let start = self.start();
        let base = self.parse_primary()?;
        if !self.eat(&Token::DoubleStar) {
            return Ok(base);
        }
        // right-associative, and binds looser than a unary on its right
        let exponent = self.parse_factor()?;
        self.finish(
            Node::BinOp {
                left: base,
                op: BinaryOperator::Pow,
                right: exponent,
            },
            start,
        )
    }

    /// An atom followed by any number of call, attribute and subscript trailers
    fn parse_primary(&mut self) -> Result<NodeId> {
        let start = self.start();
        let mut expr = self.parse_atom()?;

        loop {
            match self.token() {
                Some(Token::LParen) => {
                    self.advance();
                    let (args, keywords) = self.parse_arguments()?;
                    expr = self.finish(
                        Node::Call {
                            func: expr,
                            args,
                            keywords,
                        },
                        start,
                    )?;
                }
                Some(Token::Dot) => {
                    self.advance();
                    let attr = self.parse_ident()?;
                    expr = self.finish(Node::Attribute { value: expr, attr }, start)?;
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let slice = self.parse_subscript()?;
                    self.consume(Token::RBracket)?;
                    expr = self.finish(Node::Subscript { value: expr, slice }, start)?;
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Call arguments after the opening parenthesis, through the closing one
    fn parse_arguments(&mut self) -> Result<(Vec<NodeId>, Vec<Keyword>)> {
        let mut args = Vec::new();
        let mut keywords = Vec::new();

        while !self.check(&Token::RParen) {
            let keyword = match (self.token(), self.lookahead(1)) {
                (Some(Token::Ident(name)), Lexeme::Token(Token::Assign)) => Some(name.to_string()),
                _ => None,
            };

            if let Some(arg) = keyword {
                self.advance(); // name
                self.advance(); // =
                let value = self.parse_test()?;
                keywords.push(Keyword { arg, value });
            } else {
                if !keywords.is_empty() {
                    return Err(ParseError::InvalidSyntax(
                        "positional argument follows keyword argument".to_string(),
                    ));
                }
                args.push(self.parse_test()?);
            }

            if !self.eat(&Token::Comma) {
                break;
            }
        }

        self.consume(Token::RParen)?;
        Ok((args, keywords))
    }

    fn parse_subscript(&mut self) -> Result<NodeId> {
        let start = self.start();
        let first = self.parse_slice_item()?;
        if !self.check(&Token::Comma) {
            return Ok(first);
        }

        let mut elts = vec![first];
        while self.eat(&Token::Comma) {
            if self.check(&Token::RBracket) {
                break;
            }
            elts.push(self.parse_slice_item()?);
        }
        self.finish(Node::Tuple { elts }, start)
    }

    fn parse_slice_item(&mut self) -> Result<NodeId> {
        let start = self.start();
        let lower = if self.check(&Token::Colon) {
            None
        } else {
            Some(self.parse_test()?)
        };
        match lower {
            Some(expr) if !self.check(&Token::Colon) => return Ok(expr),
            _ => {}
        }
        self.consume(Token::Colon)?;

        let upper = if self.at_expression_start() {
            Some(self.parse_test()?)
        } else {
            None
        };
        let step = if self.eat(&Token::Colon) && self.at_expression_start() {
            Some(self.parse_test()?)
        } else {
            None
        };
        self.finish(Node::Slice { lower, upper, step }, start)
    }

    fn parse_atom(&mut self) -> Result<NodeId> {
        let start = self.start();
        let node = match self.token() {
            Some(Token::Ident(name)) => {
                let id = name.to_string();
                self.advance();
                Node::Name { id }
            }
            Some(Token::Int(magnitude)) => {
                let i = i64::try_from(*magnitude).map_err(|_| {
                    ParseError::InvalidSyntax(format!("integer literal {magnitude} is too large"))
                })?;
                self.advance();
                Node::Literal(Literal::Int(i))
            }
            Some(Token::Float(x)) => {
                let x = *x;
                self.advance();
                Node::Literal(Literal::Float(x))
            }
            Some(Token::Str(_)) => {
                // adjacent string literals concatenate
                let mut text = String::new();
                while let Some(Token::Str(part)) = self.token() {
                    text.push_str(part);
                    self.advance();
                }
                Node::Literal(Literal::Str(text))
            }
            Some(Token::Bytes(_)) => {
                let mut bytes = Vec::new();
                while let Some(Token::Bytes(part)) = self.token() {
                    bytes.extend_from_slice(part);
                    self.advance();
                }
                Node::Literal(Literal::Bytes(bytes))
            }
            Some(Token::True) => {
                self.advance();
                Node::Literal(Literal::Bool(true))
            }
            Some(Token::False) => {
                self.advance();
                Node::Literal(Literal::Bool(false))
            }
            Some(Token::NoneKw) => {
                self.advance();
                Node::Literal(Literal::None)
            }
            Some(Token::LParen) => return self.parse_paren(),
            Some(Token::LBracket) => {
                self.advance();
                let elts = self.parse_elements(Token::RBracket)?;
                Node::List { elts }
            }
            Some(Token::LBrace) => return self.parse_brace(),
            _ => return Err(self.error("expression")),
        };
        self.finish(node, start)
    }

    /// `()`, `(x)` or a parenthesized tuple
    fn parse_paren(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::LParen)?;
        if self.eat(&Token::RParen) {
            return self.finish(Node::Tuple { elts: Vec::new() }, start);
        }

        let first = self.parse_test()?;
        if !self.check(&Token::Comma) {
            self.consume(Token::RParen)?;
            return Ok(first);
        }

        let mut elts = vec![first];
        while self.eat(&Token::Comma) {
            if self.check(&Token::RParen) {
                break;
            }
            elts.push(self.parse_test()?);
        }
        self.consume(Token::RParen)?;
        self.finish(Node::Tuple { elts }, start)
    }

    /// Dict or set display
    fn parse_brace(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.consume(Token::LBrace)?;
        if self.eat(&Token::RBrace) {
            return self.finish(
                Node::Dict {
                    keys: Vec::new(),
                    values: Vec::new(),
                },
                start,
            );
        }

        let first = self.parse_test()?;
        if !self.eat(&Token::Colon) {
            let mut elts = vec![first];
            while self.eat(&Token::Comma) {
                if self.check(&Token::RBrace) {
                    break;
                }
                elts.push(self.parse_test()?);
            }
            self.consume(Token::RBrace)?;
            return self.finish(Node::Set { elts }, start);
        }

        let mut keys = vec![first];
        let mut values = vec![self.parse_test()?];
        while self.eat(&Token::Comma) {
            if self.check(&Token::RBrace) {
                break;
            }
            keys.push(self.parse_test()?);
            self.consume(Token::Colon)?;
            values.push(self.parse_test()?);
        }
        self.consume(Token::RBrace)?;
        self.finish(Node::Dict { keys, values }, start)
    }

    /// Comma-separated expressions up to and including `close`
    fn parse_elements(&mut self, close: Token<'a>) -> Result<Vec<NodeId>> {
        let mut elts = Vec::new();
        while !self.check(&close) {
            elts.push(self.parse_test()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.consume(close)?;
        Ok(elts)
    }

    fn parse_ident(&mut self) -> Result<String> {
        match self.token() {
            Some(Token::Ident(name)) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    // Helper methods

    /// Runs `parse` one nesting level deeper, failing past the depth limit
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                depth: self.depth + 1,
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Lexeme<'a> {
        self.lookahead(0)
    }

    fn lookahead(&self, n: usize) -> &Lexeme<'a> {
        // the stream always ends with `End`, so clamping stays on it
        let i = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        &self.tokens[i].lexeme
    }

    fn token(&self) -> Option<&Token<'a>> {
        match self.current() {
            Lexeme::Token(token) => Some(token),
            _ => None,
        }
    }

    fn at_end(&self) -> bool {
        matches!(self.current(), Lexeme::End)
    }

    fn at_expression_start(&self) -> bool {
        matches!(
            self.token(),
            Some(
                Token::Ident(_)
                    | Token::Int(_)
                    | Token::Float(_)
                    | Token::Str(_)
                    | Token::Bytes(_)
                    | Token::True
                    | Token::False
                    | Token::NoneKw
                    | Token::LParen
                    | Token::LBracket
                    | Token::LBrace
                    | Token::Minus
                    | Token::Plus
                    | Token::Tilde
                    | Token::Not
            )
        )
    }

    fn check(&self, expected: &Token<'a>) -> bool {
        self.token().map(std::mem::discriminant) == Some(std::mem::discriminant(expected))
    }

    fn eat(&mut self, expected: &Token<'a>) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if let Some(spanned) = self.tokens.get(self.pos) {
            if matches!(&spanned.lexeme, Lexeme::Token(t) if !matches!(t, Token::Newline)) {
                self.position = spanned.span.end;
            }
            if self.pos + 1 < self.tokens.len() {
                self.pos += 1;
            }
        }
    }

    fn consume(&mut self, expected: Token<'a>) -> Result<()> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("{expected:?}")))
        }
    }

    /// Byte offset where the current token starts
    fn start(&self) -> usize {
        let i = self.pos.min(self.tokens.len().saturating_sub(1));
        self.tokens.get(i).map(|s| s.span.start).unwrap_or(0)
    }

    fn finish(&mut self, node: Node, start: usize) -> Result<NodeId> {
        let id = self.graph.add_node(node)?;
        let end = self.position.max(start);
        self.graph.set_span(
            id,
            Span::new(self.index.position(start), self.index.position(end)),
        );
        Ok(id)
    }

    fn error(&self, expected: &str) -> ParseError {
        let i = self.pos.min(self.tokens.len().saturating_sub(1));
        let Some(spanned) = self.tokens.get(i) else {
            return ParseError::UnexpectedEof;
        };
        let found = match &spanned.lexeme {
            Lexeme::End => return ParseError::UnexpectedEof,
            Lexeme::Indent => "indent".to_string(),
            Lexeme::Dedent => "dedent".to_string(),
            Lexeme::Token(token) => format!("{token:?}"),
        };
        let pos = self.index.position(spanned.span.start);
        ParseError::UnexpectedToken {
            line: pos.line,
            column: pos.column,
            expected: expected.to_string(),
            found,
        }
    }
}

fn binary_operator(token: &Token<'_>, level: usize) -> Option<BinaryOperator> {
    let op = match (level, token) {
        (0, Token::Pipe) => BinaryOperator::BitOr,
        (1, Token::Caret) => BinaryOperator::BitXor,
        (2, Token::Amp) => BinaryOperator::BitAnd,
        (3, Token::LShift) => BinaryOperator::LShift,
        (3, Token::RShift) => BinaryOperator::RShift,
        (4, Token::Plus) => BinaryOperator::Add,
        (4, Token::Minus) => BinaryOperator::Sub,
        (5, Token::Star) => BinaryOperator::Mult,
        (5, Token::At) => BinaryOperator::MatMult,
        (5, Token::Slash) => BinaryOperator::Div,
        (5, Token::DoubleSlash) => BinaryOperator::FloorDiv,
        (5, Token::Percent) => BinaryOperator::Mod,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
