//! Tokenizer.
//!
//! Words are lexed one at a time and natural-language phrases
//! (`is greater than`, `equals`, `not in`, ...) are then folded into the
//! [`BinaryOp`] they stand for, so the parser only sees canonical operators.

use std::borrow::Cow;
use std::ops::Range;

use logos::Logos;
use tracing::trace;

use crate::parser::{BinaryOp, SyntaxError, SyntaxErrorKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[token("==", |_| BinaryOp::Eq)]
    #[token("!=", |_| BinaryOp::NotEq)]
    #[token(">", |_| BinaryOp::Gt)]
    #[token(">=", |_| BinaryOp::GtEq)]
    #[token("<", |_| BinaryOp::Lt)]
    #[token("<=", |_| BinaryOp::LtEq)]
    #[token("and", |_| BinaryOp::And)]
    #[token("or", |_| BinaryOp::Or)]
    #[token("in", |_| BinaryOp::In)]
    #[token("+", |_| BinaryOp::Add)]
    #[token("-", |_| BinaryOp::Sub)]
    #[token("*", |_| BinaryOp::Mul)]
    #[token("/", |_| BinaryOp::Div)]
    Op(BinaryOp),

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Str,

    #[regex(r"[0-9]+(\.[0-9]*)?", priority = 3)]
    Number,

    /// Identifier, `Parent.Member`, or a longer dotted path the parser
    /// rejects.
    #[regex(r"\w+(\.\w+)*")]
    Path,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,
}

/// A classified slice of the source. Only the slice is kept; errors point at
/// tokens by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str) -> Self {
        Self { kind, text }
    }

    pub fn op(&self) -> Option<BinaryOp> {
        match self.kind {
            TokenKind::Op(op) => Some(op),
            _ => None,
        }
    }
}

/// Word sequences read as operators, longest first.
const PHRASES: &[(&[&str], BinaryOp)] = &[
    (&["is", "greater", "than", "or", "equal", "to"], BinaryOp::GtEq),
    (&["is", "less", "than", "or", "equal", "to"], BinaryOp::LtEq),
    (&["greater", "than", "or", "equal", "to"], BinaryOp::GtEq),
    (&["less", "than", "or", "equal", "to"], BinaryOp::LtEq),
    (&["is", "greater", "or", "equal", "to"], BinaryOp::GtEq),
    (&["is", "less", "or", "equal", "to"], BinaryOp::LtEq),
    (&["greater", "or", "equal", "to"], BinaryOp::GtEq),
    (&["less", "or", "equal", "to"], BinaryOp::LtEq),
    (&["is", "not", "equal", "to"], BinaryOp::NotEq),
    (&["not", "equal", "to"], BinaryOp::NotEq),
    (&["is", "equal", "to"], BinaryOp::Eq),
    (&["is", "greater", "than"], BinaryOp::Gt),
    (&["is", "less", "than"], BinaryOp::Lt),
    (&["is", "not", "in"], BinaryOp::NotIn),
    (&["equal", "to"], BinaryOp::Eq),
    (&["greater", "than"], BinaryOp::Gt),
    (&["less", "than"], BinaryOp::Lt),
    (&["is", "not"], BinaryOp::NotEq),
    (&["is", "in"], BinaryOp::In),
    (&["not", "in"], BinaryOp::NotIn),
    (&["equals"], BinaryOp::Eq),
];

/// Replaces typographic quotes with their ASCII forms.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.contains(['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}']) {
        return Cow::Borrowed(text);
    }
    let replaced = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect();
    Cow::Owned(replaced)
}

/// Tokenizes `source`, dropping anything unrecognized.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut raw = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => raw.push((kind, lexer.span())),
            Err(()) => trace!(skipped = lexer.slice(), "Dropped unrecognized input"),
        }
    }
    fold_phrases(source, &raw)
}

/// Tokenizes `source`, failing on the first unrecognized input.
pub fn tokenize_strict(source: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let mut raw = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => raw.push((kind, lexer.span())),
            Err(()) => {
                let tokens_before = fold_phrases(source, &raw).len();
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnrecognizedInput {
                        found: lexer.slice().into(),
                    },
                    tokens_before,
                ));
            }
        }
    }
    Ok(fold_phrases(source, &raw))
}

fn fold_phrases<'src>(source: &'src str, raw: &[(TokenKind, Range<usize>)]) -> Vec<Token<'src>> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut index = 0;
    while index < raw.len() {
        let window = &raw[index..];
        match match_phrase(source, window) {
            Some((op, len)) => {
                let span = window[0].1.start..window[len - 1].1.end;
                tokens.push(Token::new(TokenKind::Op(op), &source[span]));
                index += len;
            }
            None => {
                let (kind, span) = &window[0];
                tokens.push(Token::new(*kind, &source[span.clone()]));
                index += 1;
            }
        }
    }
    tokens
}

fn match_phrase(source: &str, window: &[(TokenKind, Range<usize>)]) -> Option<(BinaryOp, usize)> {
    PHRASES.iter().find_map(|(words, op)| {
        let matched = words.len() <= window.len()
            && words
                .iter()
                .zip(window)
                .all(|(word, (kind, span))| is_word(*kind) && &source[span.clone()] == *word);
        matched.then_some((*op, words.len()))
    })
}

/// Plain words can take part in a phrase; `or` and `in` are operators on
/// their own but also appear inside phrases.
fn is_word(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Path | TokenKind::Op(BinaryOp::Or) | TokenKind::Op(BinaryOp::In)
    )
}

#[cfg(test)]
mod lexer_test;
