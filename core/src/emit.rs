//! Renders an expression tree as a Rust expression literal.
//!
//! Purely syntax-directed: nothing is resolved or type-checked, so the output
//! compiles only when the names it mentions exist on the Rust side.
//!
//! ```
//! use verdict_core::{emit::to_source_literal, lexer, parser};
//!
//! let expr = parser::parse(&lexer::tokenize("a > 1 and code not in ['x', 'y']")).unwrap();
//! assert_eq!(
//!     to_source_literal(&expr),
//!     r#"(a > 1) && (!["x", "y"].contains(&code))"#
//! );
//! ```

use core::fmt::{self, Write};

use crate::parser::{BinaryOp, Expr, Literal, needs_parens};
use crate::values::TypedList;

pub fn to_source_literal(expr: &Expr) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Binary { op, left, right } => match op {
            BinaryOp::In | BinaryOp::NotIn => {
                if *op == BinaryOp::NotIn {
                    out.push('!');
                }
                write_receiver(out, right)?;
                out.push_str(".contains(&");
                write_expr(out, left)?;
                out.push(')');
                Ok(())
            }
            BinaryOp::And | BinaryOp::Or => {
                let joiner = if *op == BinaryOp::And { "&&" } else { "||" };
                out.push('(');
                write_expr(out, left)?;
                write!(out, ") {joiner} (")?;
                write_expr(out, right)?;
                out.push(')');
                Ok(())
            }
            _ => {
                write_operand(out, left, *op, false)?;
                write!(out, " {} ", op.symbol())?;
                write_operand(out, right, *op, true)
            }
        },
        Expr::Literal(literal) => write_literal(out, literal),
        Expr::List(list) => write_list(out, list),
        Expr::Ident(name) => write!(out, "{name}"),
        Expr::Member { parent, name } => write!(out, "{parent}.{name}"),
        Expr::Call { parent, name, args } => {
            if let Some(parent) = parent {
                write!(out, "{parent}.")?;
            }
            write!(out, "{name}(")?;
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg)?;
            }
            out.push(')');
            Ok(())
        }
        Expr::Ternary {
            condition,
            truthy,
            falsy,
        } => {
            out.push_str("if ");
            write_expr(out, condition)?;
            out.push_str(" { ");
            write_expr(out, truthy)?;
            out.push_str(" } else { ");
            write_expr(out, falsy)?;
            out.push_str(" }");
            Ok(())
        }
    }
}

fn write_operand(out: &mut String, operand: &Expr, parent: BinaryOp, right: bool) -> fmt::Result {
    if needs_parens(operand, parent, right) {
        out.push('(');
        write_expr(out, operand)?;
        out.push(')');
        Ok(())
    } else {
        write_expr(out, operand)
    }
}

/// Left of `.contains`: anything but a list, path or call needs parentheses.
fn write_receiver(out: &mut String, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::List(_) | Expr::Ident(_) | Expr::Member { .. } | Expr::Call { .. } => write_expr(out, expr),
        _ => {
            out.push('(');
            write_expr(out, expr)?;
            out.push(')');
            Ok(())
        }
    }
}

fn write_literal(out: &mut String, literal: &Literal) -> fmt::Result {
    match literal {
        Literal::Bool(b) => write!(out, "{b}"),
        Literal::Int(i) => write!(out, "{i}"),
        Literal::Double(d) => write!(out, "{d:?}"),
        Literal::Str(s) => write!(out, "{s:?}"),
    }
}

fn write_list(out: &mut String, list: &TypedList) -> fmt::Result {
    out.push('[');
    match list {
        TypedList::Int(items) => write_items(out, items.iter().map(|i| i.to_string()))?,
        TypedList::Double(items) => write_items(out, items.iter().map(|d| format!("{d:?}")))?,
        TypedList::Str(items) => write_items(out, items.iter().map(|s| format!("{s:?}")))?,
    }
    out.push(']');
    Ok(())
}

fn write_items(out: &mut String, items: impl Iterator<Item = String>) -> fmt::Result {
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn emit(source: &str) -> String {
        to_source_literal(&parse(&tokenize(source)).unwrap())
    }

    #[test]
    fn test_literals() {
        assert_eq!(emit("42"), "42");
        assert_eq!(emit("4.0"), "4.0");
        assert_eq!(emit("'say \"hi\"'"), r#""say \"hi\"""#);
        assert_eq!(emit("TRUE"), "true");
    }

    #[test]
    fn test_arithmetic_keeps_grouping() {
        assert_eq!(emit("100 - (10 * 8)"), "100 - 10 * 8");
        assert_eq!(emit("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(emit("10 - (2 - 3)"), "10 - (2 - 3)");
        assert_eq!(emit("x is greater or equal to 3"), "x >= 3");
    }

    #[test]
    fn test_logic_parenthesizes_operands() {
        assert_eq!(emit("a and b or c"), "((a) && (b)) || (c)");
    }

    #[test]
    fn test_membership() {
        assert_eq!(emit("x in [1, 2]"), "[1, 2].contains(&x)");
        assert_eq!(emit("x not in [1.5]"), "![1.5].contains(&x)");
        assert_eq!(emit("s in ['a']"), r#"["a"].contains(&s)"#);
        assert_eq!(emit("x in codes"), "codes.contains(&x)");
    }

    #[test]
    fn test_ternary_and_calls() {
        assert_eq!(
            emit("'a' if (x > 1) else o.Name"),
            r#"if x > 1 { "a" } else { o.Name }"#
        );
        assert_eq!(emit("min(a, o.Get(1))"), "min(a, o.Get(1))");
    }
}
