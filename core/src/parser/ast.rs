//! Expression tree.

use core::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::values::{TypedList, format_double};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    In,
    NotIn,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Binding power, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::In | BinaryOp::NotIn => 3,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div => 6,
        }
    }

    /// Canonical spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn is_membership(self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::NotIn)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Literal(Literal),
    /// Shared with the values it evaluates to.
    List(Arc<TypedList>),
    /// A bare variable name.
    Ident(String),
    /// `parent.name`, a field or property of a bound variable.
    Member { parent: String, name: String },
    /// `name(args)` for native functions, `parent.name(args)` for methods.
    Call {
        parent: Option<String>,
        name: String,
        args: Vec<Expr>,
    },
    /// `truthy if (condition) else falsy`
    Ternary {
        condition: Box<Expr>,
        truthy: Box<Expr>,
        falsy: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn list(list: impl Into<TypedList>) -> Self {
        Expr::List(Arc::new(list.into()))
    }

    pub fn ternary(condition: Expr, truthy: Expr, falsy: Expr) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            truthy: Box::new(truthy),
            falsy: Box::new(falsy),
        }
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Call { args, .. } => args.iter().collect(),
            Expr::Ternary {
                condition,
                truthy,
                falsy,
            } => vec![condition.as_ref(), truthy.as_ref(), falsy.as_ref()],
            Expr::Literal(_) | Expr::List(_) | Expr::Ident(_) | Expr::Member { .. } => Vec::new(),
        }
    }

    /// This node and every node below it, pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order walk over an expression tree.
pub struct Descendants<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Double(d) => f.write_str(&format_double(*d)),
            Literal::Str(s) if s.contains('"') => write!(f, "'{s}'"),
            Literal::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Canonical text form. Parenthesizes binary operands only where
/// precedence requires it, so the output parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { op, left, right } => {
                write_operand(f, left, *op, false)?;
                write!(f, " {op} ")?;
                write_operand(f, right, *op, true)
            }
            Expr::Literal(literal) => write!(f, "{literal}"),
            Expr::List(list) => write!(f, "{list}"),
            Expr::Ident(name) => f.write_str(name),
            Expr::Member { parent, name } => write!(f, "{parent}.{name}"),
            Expr::Call { parent, name, args } => {
                if let Some(parent) = parent {
                    write!(f, "{parent}.")?;
                }
                write!(f, "{name}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Ternary {
                condition,
                truthy,
                falsy,
            } => {
                if let Expr::Ternary { .. } = truthy.as_ref() {
                    write!(f, "({truthy})")?;
                } else {
                    write!(f, "{truthy}")?;
                }
                write!(f, " if ({condition}) else {falsy}")
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parent: BinaryOp, right: bool) -> fmt::Result {
    if needs_parens(operand, parent, right) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// Whether `operand` must be wrapped to keep its place under `parent`.
pub(crate) fn needs_parens(operand: &Expr, parent: BinaryOp, right: bool) -> bool {
    match operand {
        Expr::Binary { op, .. } => {
            op.precedence() < parent.precedence() || (right && op.precedence() == parent.precedence())
        }
        Expr::Ternary { .. } => true,
        _ => false,
    }
}
