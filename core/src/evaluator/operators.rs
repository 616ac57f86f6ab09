//! Binary operator semantics over runtime values.

use tracing::debug;

use crate::evaluator::{ArithmeticError, EvaluationErrorKind, TypeError};
use crate::parser::BinaryOp;
use crate::values::Value;

/// Applies a non-membership operator.
///
/// bool⊗bool supports `and`/`or`; str⊗str supports `+`, `==` and `!=`;
/// numbers support arithmetic and comparisons, staying `Int` only when both
/// sides are `Int`. Every other combination is `Null`.
pub(super) fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvaluationErrorKind> {
    let result = match (left, right) {
        (Value::Bool(l), Value::Bool(r)) => eval_bool(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_str(op, l, r),
        (Value::Int(l), Value::Int(r)) => eval_int(op, *l, *r)?,
        _ => match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => eval_double(op, l, r),
            _ => Value::Null,
        },
    };
    if result.is_null() {
        debug!(
            op = %op,
            left = %left.type_name(),
            right = %right.type_name(),
            "Operator not defined for operands, result is null"
        );
    }
    Ok(result)
}

fn eval_bool(op: BinaryOp, l: bool, r: bool) -> Value {
    match op {
        BinaryOp::And => Value::Bool(l && r),
        BinaryOp::Or => Value::Bool(l || r),
        _ => Value::Null,
    }
}

fn eval_str(op: BinaryOp, l: &str, r: &str) -> Value {
    match op {
        BinaryOp::Add => Value::Str(format!("{l}{r}")),
        BinaryOp::Eq => Value::Bool(l == r),
        BinaryOp::NotEq => Value::Bool(l != r),
        _ => Value::Null,
    }
}

fn eval_int(op: BinaryOp, l: i64, r: i64) -> Result<Value, EvaluationErrorKind> {
    let value = match op {
        BinaryOp::Add => Value::Int(l.wrapping_add(r)),
        BinaryOp::Sub => Value::Int(l.wrapping_sub(r)),
        BinaryOp::Mul => Value::Int(l.wrapping_mul(r)),
        BinaryOp::Div => {
            if r == 0 {
                return Err(ArithmeticError::DivisionByZero.into());
            }
            Value::Int(l.wrapping_div(r))
        }
        _ => compare(op, l, r),
    };
    Ok(value)
}

fn eval_double(op: BinaryOp, l: f64, r: f64) -> Value {
    match op {
        BinaryOp::Add => Value::Double(l + r),
        BinaryOp::Sub => Value::Double(l - r),
        BinaryOp::Mul => Value::Double(l * r),
        BinaryOp::Div => Value::Double(l / r),
        _ => compare(op, l, r),
    }
}

fn compare<T: PartialOrd>(op: BinaryOp, l: T, r: T) -> Value {
    match op {
        BinaryOp::Eq => Value::Bool(l == r),
        BinaryOp::NotEq => Value::Bool(l != r),
        BinaryOp::Lt => Value::Bool(l < r),
        BinaryOp::LtEq => Value::Bool(l <= r),
        BinaryOp::Gt => Value::Bool(l > r),
        BinaryOp::GtEq => Value::Bool(l >= r),
        _ => Value::Null,
    }
}

/// `in` / `not in`: the right side must be a list whose element kind is
/// exactly the left operand's type. `Null` matches no element kind.
pub(super) fn eval_membership(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvaluationErrorKind> {
    let Value::List(list) = right else {
        return Err(TypeError::NotAList {
            op: op.symbol(),
            found: right.type_name(),
        }
        .into());
    };
    if left.value_type() != Some(list.item_kind().value_type()) {
        return Err(TypeError::ListItemMismatch {
            found: left.type_name(),
            item: list.item_kind(),
        }
        .into());
    }
    let contained = list.contains(left);
    Ok(Value::Bool(if op == BinaryOp::In { contained } else { !contained }))
}
