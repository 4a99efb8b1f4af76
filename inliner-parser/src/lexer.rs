//! Lexer for the Python subset using logos, plus the indentation layout pass

use crate::error::{ParseError, Result};
use inliner_core::ast::{BinaryOperator, Position};
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token<'a> {
    // Keywords
    #[token("def", priority = 10)]
    Def,
    #[token("class", priority = 10)]
    Class,
    #[token("return", priority = 10)]
    Return,
    #[token("pass", priority = 10)]
    Pass,
    #[token("assert", priority = 10)]
    Assert,
    #[token("if", priority = 10)]
    If,
    #[token("elif", priority = 10)]
    Elif,
    #[token("else", priority = 10)]
    Else,
    #[token("while", priority = 10)]
    While,
    #[token("for", priority = 10)]
    For,
    #[token("in", priority = 10)]
    In,
    #[token("not", priority = 10)]
    Not,
    #[token("and", priority = 10)]
    And,
    #[token("or", priority = 10)]
    Or,
    #[token("is", priority = 10)]
    Is,
    #[token("True", priority = 10)]
    True,
    #[token("False", priority = 10)]
    False,
    #[token("None", priority = 10)]
    NoneKw,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Assignment
    #[token("=")]
    Assign,
    #[token("+=", |_| BinaryOperator::Add)]
    #[token("-=", |_| BinaryOperator::Sub)]
    #[token("*=", |_| BinaryOperator::Mult)]
    #[token("@=", |_| BinaryOperator::MatMult)]
    #[token("/=", |_| BinaryOperator::Div)]
    #[token("//=", |_| BinaryOperator::FloorDiv)]
    #[token("%=", |_| BinaryOperator::Mod)]
    #[token("**=", |_| BinaryOperator::Pow)]
    #[token("<<=", |_| BinaryOperator::LShift)]
    #[token(">>=", |_| BinaryOperator::RShift)]
    #[token("|=", |_| BinaryOperator::BitOr)]
    #[token("^=", |_| BinaryOperator::BitXor)]
    #[token("&=", |_| BinaryOperator::BitAnd)]
    AugAssign(BinaryOperator),

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtE,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtE,

    // Arithmetic and bitwise
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    DoubleStar,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("@")]
    At,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,

    // Literals
    /// Magnitude only; a leading minus is a separate token
    #[regex(r"[0-9]+", priority = 5, callback = |lex| lex.slice().parse::<u64>().ok())]
    Int(u64),

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", priority = 5, callback = |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", priority = 5, callback = |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#, priority = 5, callback = |lex| unescape(strip_quotes(lex.slice())))]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, priority = 5, callback = |lex| unescape(strip_quotes(lex.slice())))]
    Str(String),

    #[regex(r#"[bB]"([^"\\\n]|\\.)*""#, priority = 6, callback = |lex| unescape_bytes(strip_quotes(&lex.slice()[1..])))]
    #[regex(r#"[bB]'([^'\\\n]|\\.)*'"#, priority = 6, callback = |lex| unescape_bytes(strip_quotes(&lex.slice()[1..])))]
    Bytes(Vec<u8>),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 3, callback = |lex| lex.slice())]
    Ident(&'a str),

    #[regex(r"\r?\n")]
    Newline,

    // Comments, blanks and explicit line joins (automatically skipped)
    #[regex(r"#[^\n]*", logos::skip)]
    #[regex(r"[ \t\f]+", logos::skip)]
    #[regex(r"\\\r?\n", logos::skip)]
    Error,
}

fn strip_quotes(s: &str) -> &str {
    &s[1..s.len() - 1]
}

/// Process escape sequences in string literals
#[doc(hidden)]
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('\'') => result.push('\''),
            Some('"') => result.push('"'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            Some(c) => {
                result.push('\\');
                result.push(c);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Process escape sequences in bytes literals
#[doc(hidden)]
pub fn unescape_bytes(s: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            result.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => result.push(b'\n'),
            Some('t') => result.push(b'\t'),
            Some('r') => result.push(b'\r'),
            Some('0') => result.push(0),
            Some('\\') => result.push(b'\\'),
            Some('\'') => result.push(b'\''),
            Some('"') => result.push(b'"'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(b) => result.push(b),
                    Err(_) => {
                        result.extend_from_slice(b"\\x");
                        result.extend_from_slice(hex.as_bytes());
                    }
                }
            }
            Some(c) => {
                result.push(b'\\');
                let mut buf = [0u8; 4];
                result.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            None => result.push(b'\\'),
        }
    }

    result
}

/// Maps byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line.saturating_sub(1)];
        Position::new(line, offset - line_start)
    }
}

/// A token after layout: real tokens plus the synthetic block markers
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme<'a> {
    Token(Token<'a>),
    Indent,
    Dedent,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<'a> {
    pub lexeme: Lexeme<'a>,
    pub span: Range<usize>,
}

impl<'a> Spanned<'a> {
    fn new(lexeme: Lexeme<'a>, span: Range<usize>) -> Self {
        Self { lexeme, span }
    }
}

/// Tokenizes `source` and turns leading whitespace into `Indent` / `Dedent`
/// markers. Line breaks inside brackets are dropped, as are blank and
/// comment-only lines. The stream always ends with `End`.
pub fn tokenize<'a>(source: &'a str, index: &LineIndex) -> Result<Vec<Spanned<'a>>> {
    let mut out = Vec::new();
    let mut indents = vec![0usize];
    let mut depth = 0usize;
    let mut line_start = true;
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(token) => token,
            Err(_) => {
                let pos = index.position(span.start);
                return Err(ParseError::UnexpectedCharacter {
                    line: pos.line,
                    column: pos.column,
                });
            }
        };

        if matches!(token, Token::Newline) {
            if depth == 0 && !line_start {
                out.push(Spanned::new(Lexeme::Token(Token::Newline), span));
                line_start = true;
            }
            continue;
        }

        if line_start {
            let pos = index.position(span.start);
            let current = indents.last().copied().unwrap_or(0);
            if pos.column > current {
                indents.push(pos.column);
                out.push(Spanned::new(Lexeme::Indent, span.start..span.start));
            } else if pos.column < current {
                while indents.last().is_some_and(|&level| pos.column < level) {
                    indents.pop();
                    out.push(Spanned::new(Lexeme::Dedent, span.start..span.start));
                }
                if indents.last().copied().unwrap_or(0) != pos.column {
                    return Err(ParseError::InconsistentIndent { line: pos.line });
                }
            }
            line_start = false;
        }

        match token {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push(Spanned::new(Lexeme::Token(token), span));
    }

    let end = source.len();
    if !line_start {
        out.push(Spanned::new(Lexeme::Token(Token::Newline), end..end));
    }
    while indents.len() > 1 {
        indents.pop();
        out.push(Spanned::new(Lexeme::Dedent, end..end));
    }
    out.push(Spanned::new(Lexeme::End, end..end));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Lexeme<'_>> {
        let index = LineIndex::new(source);
        tokenize(source, &index)
            .unwrap()
            .into_iter()
            .map(|s| s.lexeme)
            .collect()
    }

    fn tok(token: Token<'_>) -> Lexeme<'_> {
        Lexeme::Token(token)
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let mut lexer = Token::lexer("def define None nonlocal");
        assert_eq!(lexer.next(), Some(Ok(Token::Def)));
        assert_eq!(lexer.next(), Some(Ok(Token::Ident("define"))));
        assert_eq!(lexer.next(), Some(Ok(Token::NoneKw)));
        assert_eq!(lexer.next(), Some(Ok(Token::Ident("nonlocal"))));
    }

    #[test]
    fn test_literals() {
        let mut lexer = Token::lexer(r#"42 3.5 1e3 'it\'s' "a\nb" b'\x00z'"#);
        assert_eq!(lexer.next(), Some(Ok(Token::Int(42))));
        assert_eq!(lexer.next(), Some(Ok(Token::Float(3.5))));
        assert_eq!(lexer.next(), Some(Ok(Token::Float(1000.0))));
        assert_eq!(lexer.next(), Some(Ok(Token::Str("it's".into()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Str("a\nb".into()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Bytes(vec![0, b'z']))));
    }

    #[test]
    fn test_int_magnitude_past_i64() {
        let mut lexer = Token::lexer("-9223372036854775808");
        assert_eq!(lexer.next(), Some(Ok(Token::Minus)));
        assert_eq!(lexer.next(), Some(Ok(Token::Int(1 << 63))));
    }

    #[test]
    fn test_operators() {
        let mut lexer = Token::lexer("** // += == != <= >>");
        assert_eq!(lexer.next(), Some(Ok(Token::DoubleStar)));
        assert_eq!(lexer.next(), Some(Ok(Token::DoubleSlash)));
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::AugAssign(BinaryOperator::Add)))
        );
        assert_eq!(lexer.next(), Some(Ok(Token::EqEq)));
        assert_eq!(lexer.next(), Some(Ok(Token::NotEq)));
        assert_eq!(lexer.next(), Some(Ok(Token::LtE)));
        assert_eq!(lexer.next(), Some(Ok(Token::RShift)));
    }

    #[test]
    fn test_layout_blocks() {
        let source = "if x:\n    y = 1\n\n    # note\nz\n";
        assert_eq!(
            tokens(source),
            vec![
                tok(Token::If),
                tok(Token::Ident("x")),
                tok(Token::Colon),
                tok(Token::Newline),
                Lexeme::Indent,
                tok(Token::Ident("y")),
                tok(Token::Assign),
                tok(Token::Int(1)),
                tok(Token::Newline),
                Lexeme::Dedent,
                tok(Token::Ident("z")),
                tok(Token::Newline),
                Lexeme::End,
            ]
        );
    }

    #[test]
    fn test_newlines_inside_brackets_are_dropped() {
        let source = "f(1,\n  2)";
        assert!(!tokens(source)[..6].contains(&tok(Token::Newline)));
    }

    #[test]
    fn test_open_blocks_close_at_end() {
        let source = "def f():\n    pass";
        let lexemes = tokens(source);
        assert_eq!(
            &lexemes[lexemes.len() - 3..],
            &[tok(Token::Newline), Lexeme::Dedent, Lexeme::End]
        );
    }

    #[test]
    fn test_inconsistent_indent() {
        let source = "if x:\n    y\n  z\n";
        let index = LineIndex::new(source);
        assert_eq!(
            tokenize(source, &index),
            Err(ParseError::InconsistentIndent { line: 3 })
        );
    }

    #[test]
    fn test_unexpected_character() {
        let source = "x = $";
        let index = LineIndex::new(source);
        assert_eq!(
            tokenize(source, &index),
            Err(ParseError::UnexpectedCharacter { line: 1, column: 4 })
        );
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.position(0), Position::new(1, 0));
        assert_eq!(index.position(4), Position::new(2, 1));
        assert_eq!(index.position(6), Position::new(3, 0));
    }
}
