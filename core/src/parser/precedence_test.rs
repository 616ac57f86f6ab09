use pretty_assertions::assert_eq;

use crate::lexer::tokenize;
use crate::parser::{Expr, parse};

// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast(source: &str) -> Expr {
    parse(&tokenize(source))
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("a + b - c"), ast("(a + b) - c"));
    assert_eq!(ast("a - b + c"), ast("(a - b) + c"));
    assert_eq!(
        ast("a + b - c + d - e + f"),
        ast("((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(ast("a * b / c"), ast("(a * b) / c"));
    assert_eq!(ast("a / b * c"), ast("(a / b) * c"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("a + b * c"), ast("a + (b * c)"));
    assert_eq!(ast("a * b + c"), ast("(a * b) + c"));
    assert_eq!(ast("100 - 10 * 8"), ast("100 - (10 * 8)"));
}

#[test]
fn test_and_vs_or() {
    assert_eq!(ast("a and b or c"), ast("(a and b) or c"));
    assert_eq!(ast("a or b and c"), ast("a or (b and c)"));
}

#[test]
fn test_comparison_vs_logic() {
    assert_eq!(ast("a > 1 and b < 2"), ast("(a > 1) and (b < 2)"));
    assert_eq!(ast("a >= 1 or b <= 2"), ast("(a >= 1) or (b <= 2)"));
    assert_eq!(ast("a == 1 + 2"), ast("a == (1 + 2)"));
}

#[test]
fn test_membership_between_logic_and_comparison() {
    assert_eq!(ast("a in [1, 2] and b"), ast("(a in [1, 2]) and b"));
    assert_eq!(ast("a + 1 in [1, 2]"), ast("(a + 1) in [1, 2]"));
    assert_eq!(ast("a not in [1] or b"), ast("(a not in [1]) or b"));
}

#[test]
fn test_comparisons_are_left_associative() {
    assert_eq!(ast("a == b == c"), ast("(a == b) == c"));
    assert_eq!(ast("a >= b > c"), ast("(a >= b) > c"));
}

#[test]
fn test_natural_operators_share_precedence() {
    assert_eq!(
        ast("a is greater than 1 and b equals 2"),
        ast("(a > 1) and (b == 2)")
    );
    assert_eq!(ast("a is less or equal to b + 1"), ast("a <= (b + 1)"));
}

#[test]
fn test_ternary_binds_loosest() {
    assert_eq!(ast("1 + 2 if (c) else 3"), ast("(1 + 2) if (c) else 3"));
    assert_eq!(
        ast("a or b if (c and d) else e"),
        ast("(a or b) if ((c and d)) else e")
    );
}
