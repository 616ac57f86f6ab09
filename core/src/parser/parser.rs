//! Precedence-climbing parser over lexer tokens.

use tracing::trace;

use crate::lexer::{Token, TokenKind};
use crate::parser::{BinaryOp, Expr, Literal, SyntaxError, SyntaxErrorKind};
use crate::values::{ItemKind, TypedList};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parses a complete token stream into an expression.
pub fn parse(tokens: &[Token<'_>]) -> Result<Expr, SyntaxError> {
    parse_with_max_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], failing once nesting goes deeper than `max_depth`.
///
/// Both the parser's own recursion and the height of the resulting tree are
/// bounded, so every accepted tree evaluates within the same `max_depth`.
pub fn parse_with_max_depth(tokens: &[Token<'_>], max_depth: usize) -> Result<Expr, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::new(SyntaxErrorKind::EmptyExpression, 0));
    }
    let mut parser = Parser::new(tokens, 0, 0, max_depth);
    let (expr, height) = parser.parse_expression()?;
    parser.expect_end()?;
    if height >= max_depth {
        return Err(SyntaxError::new(
            SyntaxErrorKind::MaxDepthExceeded { max_depth },
            0,
        ));
    }
    trace!(tokens = tokens.len(), height, "Parsed expression");
    Ok(expr)
}

/// A parsed subtree and its height; leaves have height 0.
type Subtree = (Expr, usize);

struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    /// Index of `tokens[0]` in the full stream, for error positions.
    offset: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token<'src>], offset: usize, depth: usize, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            offset,
            depth,
            max_depth,
        }
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.offset + self.pos)
    }

    fn error_at(&self, kind: SyntaxErrorKind, pos: usize) -> SyntaxError {
        SyntaxError::new(kind, self.offset + pos)
    }

    fn unexpected(&self) -> SyntaxError {
        match self.peek() {
            Some(token) if token.kind == TokenKind::RParen => {
                self.error(SyntaxErrorKind::MismatchedParenthesis)
            }
            Some(token) => self.error(SyntaxErrorKind::UnexpectedToken {
                found: token.text.into(),
            }),
            None => self.error(SyntaxErrorKind::UnexpectedEnd),
        }
    }

    fn expect_end(&self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>) -> Result<T, SyntaxError> {
        if self.depth >= self.max_depth {
            return Err(self.error(SyntaxErrorKind::MaxDepthExceeded {
                max_depth: self.max_depth,
            }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Height of a node over children whose tallest is `child_height`.
    fn grow(&self, child_height: usize) -> Result<usize, SyntaxError> {
        let height = child_height + 1;
        if height >= self.max_depth {
            return Err(self.error(SyntaxErrorKind::MaxDepthExceeded {
                max_depth: self.max_depth,
            }));
        }
        Ok(height)
    }

    /// `binary ('if' condition 'else' expression)?`
    fn parse_expression(&mut self) -> Result<Subtree, SyntaxError> {
        let truthy = self.parse_binary(1)?;
        if self.peek_kind() != Some(TokenKind::If) {
            return Ok(truthy);
        }
        let if_pos = self.pos;
        self.pos += 1;

        // The condition is everything up to the first `else`.
        let else_pos = self.tokens[self.pos..]
            .iter()
            .position(|t| t.kind == TokenKind::Else)
            .map(|i| self.pos + i)
            .ok_or_else(|| self.error_at(SyntaxErrorKind::MissingElse, if_pos))?;
        if else_pos == self.pos {
            return Err(self.error(SyntaxErrorKind::UnexpectedToken {
                found: "else".into(),
            }));
        }

        let condition_tokens = &self.tokens[self.pos..else_pos];
        let mut condition_parser = Parser::new(
            condition_tokens,
            self.offset + self.pos,
            self.depth,
            self.max_depth,
        );
        let (condition, condition_height) = condition_parser.nested(Parser::parse_expression)?;
        condition_parser.expect_end()?;

        self.pos = else_pos + 1;
        let (falsy, falsy_height) = self.nested(Self::parse_expression)?;
        let (truthy, truthy_height) = truthy;
        let height = self.grow(condition_height.max(truthy_height).max(falsy_height))?;
        Ok((Expr::ternary(condition, truthy, falsy), height))
    }

    /// Left-associative precedence climbing from `min_precedence`.
    ///
    /// Folding does not recurse, but every fold adds a level to the tree.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Subtree, SyntaxError> {
        let (mut left, mut height) = self.parse_primary()?;
        while let Some(op) = self.peek().and_then(Token::op) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let (right, right_height) = self.nested(|p| p.parse_binary(precedence + 1))?;
            height = self.grow(height.max(right_height))?;
            left = Expr::binary(op, left, right);
        }
        Ok((left, height))
    }

    fn parse_primary(&mut self) -> Result<Subtree, SyntaxError> {
        let start = self.pos;
        let Some(token) = self.advance() else {
            return Err(self.error(SyntaxErrorKind::UnexpectedEnd));
        };
        match token.kind {
            TokenKind::LParen => {
                let inner = self.nested(Self::parse_expression)?;
                match self.advance() {
                    Some(t) if t.kind == TokenKind::RParen => Ok(inner),
                    _ => Err(self.error_at(SyntaxErrorKind::MismatchedParenthesis, start)),
                }
            }
            TokenKind::Str => Ok((Expr::Literal(Literal::Str(unquote(token.text).into())), 0)),
            TokenKind::Number => Ok((Expr::Literal(self.number(token.text, false, start)?), 0)),
            TokenKind::Op(BinaryOp::Sub) => Ok((Expr::Literal(self.parse_negative_number()?), 0)),
            TokenKind::LBracket => Ok((self.parse_list(start)?, 0)),
            TokenKind::Path if self.peek_kind() == Some(TokenKind::LParen) => {
                self.parse_call(token.text, start)
            }
            // `if(` where a value belongs is reported when evaluated.
            TokenKind::If if self.peek_kind() == Some(TokenKind::LParen) => {
                self.parse_call(token.text, start)
            }
            TokenKind::Path => Ok((self.parse_path(token.text, start)?, 0)),
            TokenKind::RParen => Err(self.error_at(SyntaxErrorKind::MismatchedParenthesis, start)),
            _ => Err(self.error_at(
                SyntaxErrorKind::UnexpectedToken {
                    found: token.text.into(),
                },
                start,
            )),
        }
    }

    fn number(&self, text: &str, negative: bool, pos: usize) -> Result<Literal, SyntaxError> {
        parse_number(text, negative)
            .ok_or_else(|| self.error_at(SyntaxErrorKind::InvalidNumber { text: text.into() }, pos))
    }

    /// A number after a leading `-`.
    fn parse_negative_number(&mut self) -> Result<Literal, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Number => {
                let literal = self.number(token.text, true, self.pos)?;
                self.pos += 1;
                Ok(literal)
            }
            _ => Err(self.error(SyntaxErrorKind::ExpectedNumber)),
        }
    }

    fn parse_path(&mut self, text: &str, start: usize) -> Result<Expr, SyntaxError> {
        if text.eq_ignore_ascii_case("true") {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if text.eq_ignore_ascii_case("false") {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        match split_member(text) {
            Some((None, name)) => Ok(Expr::Ident(name.into())),
            Some((Some(parent), name)) => Ok(Expr::Member {
                parent: parent.into(),
                name: name.into(),
            }),
            None => Err(self.error_at(SyntaxErrorKind::NestedMember { path: text.into() }, start)),
        }
    }

    /// `name(args)` or `parent.name(args)`; the `(` is next.
    fn parse_call(&mut self, text: &str, start: usize) -> Result<Subtree, SyntaxError> {
        let (parent, name) = split_member(text).ok_or_else(|| {
            self.error_at(SyntaxErrorKind::NestedMember { path: text.into() }, start)
        })?;
        self.pos += 1;

        let mut args = Vec::new();
        let mut args_height = 0;
        if self.peek_kind() == Some(TokenKind::RParen) {
            self.pos += 1;
        } else {
            loop {
                let (arg, arg_height) = self.nested(Self::parse_expression)?;
                args.push(arg);
                args_height = args_height.max(arg_height);
                match self.advance().map(|t| t.kind) {
                    Some(TokenKind::Comma) => continue,
                    Some(TokenKind::RParen) => break,
                    Some(_) => {
                        self.pos -= 1;
                        return Err(self.unexpected());
                    }
                    None => return Err(self.error_at(SyntaxErrorKind::MismatchedParenthesis, start)),
                }
            }
        }

        let height = if args.is_empty() {
            0
        } else {
            self.grow(args_height)?
        };
        let call = Expr::Call {
            parent: parent.map(String::from),
            name: name.into(),
            args,
        };
        Ok((call, height))
    }

    /// Literal list; the `[` is consumed.
    fn parse_list(&mut self, start: usize) -> Result<Expr, SyntaxError> {
        let mut list: Option<TypedList> = None;
        loop {
            let element_pos = self.pos;
            let Some(token) = self.advance() else {
                return Err(self.error_at(SyntaxErrorKind::UnclosedList, start));
            };
            let element = match token.kind {
                TokenKind::RBracket if list.is_none() => {
                    return Err(self.error_at(SyntaxErrorKind::EmptyList, start));
                }
                TokenKind::Str => Literal::Str(unquote(token.text).into()),
                TokenKind::Number => self.number(token.text, false, element_pos)?,
                TokenKind::Op(BinaryOp::Sub) => self.parse_negative_number()?,
                _ => {
                    return Err(self.error_at(
                        SyntaxErrorKind::InvalidListElement {
                            found: token.text.into(),
                        },
                        element_pos,
                    ));
                }
            };
            push_element(&mut list, element).map_err(|kind| self.error_at(kind, element_pos))?;

            match self.advance().map(|t| t.kind) {
                Some(TokenKind::Comma) => continue,
                Some(TokenKind::RBracket) => break,
                Some(_) => {
                    self.pos -= 1;
                    return Err(self.unexpected());
                }
                None => return Err(self.error_at(SyntaxErrorKind::UnclosedList, start)),
            }
        }
        list.map(Expr::list)
            .ok_or_else(|| self.error_at(SyntaxErrorKind::EmptyList, start))
    }
}

/// Adds `element` to the list, fixing the element kind on first use.
fn push_element(list: &mut Option<TypedList>, element: Literal) -> Result<(), SyntaxErrorKind> {
    let list = list.get_or_insert_with(|| match item_kind(&element) {
        ItemKind::Str => TypedList::Str(Vec::new()),
        ItemKind::Double => TypedList::Double(Vec::new()),
        ItemKind::Int => TypedList::Int(Vec::new()),
    });
    if list.item_kind() == ItemKind::Int && item_kind(&element) == ItemKind::Double {
        list.promote_to_double();
    }
    match (list, element) {
        (TypedList::Int(items), Literal::Int(i)) => items.push(i),
        (TypedList::Double(items), Literal::Double(d)) => items.push(d),
        (TypedList::Double(items), Literal::Int(i)) => items.push(i as f64),
        (TypedList::Str(items), Literal::Str(s)) => items.push(s),
        (list, element) => {
            return Err(SyntaxErrorKind::MixedList {
                expected: list.item_kind(),
                found: item_kind(&element),
            });
        }
    }
    Ok(())
}

fn item_kind(literal: &Literal) -> ItemKind {
    match literal {
        Literal::Str(_) => ItemKind::Str,
        Literal::Double(_) => ItemKind::Double,
        Literal::Int(_) | Literal::Bool(_) => ItemKind::Int,
    }
}

/// `Int` unless the text has a `.`; integers too large for `i64` become
/// doubles.
fn parse_number(text: &str, negative: bool) -> Option<Literal> {
    if text.contains('.') {
        let d: f64 = text.parse().ok()?;
        return Some(Literal::Double(if negative { -d } else { d }));
    }
    let signed = if negative { format!("-{text}") } else { text.to_string() };
    match signed.parse::<i64>() {
        Ok(i) => Some(Literal::Int(i)),
        Err(_) => signed.parse().ok().map(Literal::Double),
    }
}

fn unquote(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or("")
}

/// Splits `a` or `a.b`; deeper paths are rejected.
fn split_member(text: &str) -> Option<(Option<&str>, &str)> {
    let mut parts = text.split('.');
    let first = parts.next()?;
    match (parts.next(), parts.next()) {
        (None, _) => Some((None, first)),
        (Some(second), None) => Some((Some(first), second)),
        (Some(_), Some(_)) => None,
    }
}
