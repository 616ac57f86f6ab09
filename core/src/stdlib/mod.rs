//! Functions every interpreter starts with.

use core::cmp::Ordering;

use crate::functions::{FunctionTable, NativeFunction};
use crate::members::HostError;
use crate::values::Value;

pub fn register_stdlib(functions: &FunctionTable) {
    functions.register(NativeFunction::new("min", Some(2), |args| {
        pick_pair(args, Ordering::Less)
    }));
    functions.register(NativeFunction::new("max", Some(2), |args| {
        pick_pair(args, Ordering::Greater)
    }));
    functions.register(NativeFunction::from_fn2(
        "startsWith",
        |s: Option<String>, prefix: Option<String>| match (s, prefix) {
            (Some(s), Some(prefix)) => s.starts_with(&prefix),
            _ => false,
        },
    ));
    functions.register(NativeFunction::from_fn2(
        "endsWith",
        |s: Option<String>, suffix: Option<String>| match (s, suffix) {
            (Some(s), Some(suffix)) => s.ends_with(&suffix),
            _ => false,
        },
    ));
}

fn pick_pair(args: &[Value], wanted: Ordering) -> Result<Value, HostError> {
    match args {
        [a, b] => pick(a, b, wanted),
        _ => Err(HostError::Arity {
            expected: 2,
            got: args.len(),
        }),
    }
}

/// Returns `a` unless `b` compares as `wanted` against it. Strings compare by
/// length; a `Null` side yields the other one.
fn pick(a: &Value, b: &Value, wanted: Ordering) -> Result<Value, HostError> {
    let ordering = match (a, b) {
        (Value::Null, other) | (other, Value::Null) => return Ok(other.clone()),
        (Value::Int(x), Value::Int(y)) => y.cmp(x),
        (Value::Str(x), Value::Str(y)) => y.chars().count().cmp(&x.chars().count()),
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => {
                let ordering = y.partial_cmp(&x).unwrap_or(Ordering::Equal);
                let (x, y) = (Value::Double(x), Value::Double(y));
                return Ok(if ordering == wanted { y } else { x });
            }
            _ => {
                return Err(HostError::msg(format!(
                    "cannot compare {} with {}",
                    a.type_name(),
                    b.type_name()
                )));
            }
        },
    };
    Ok(if ordering == wanted { b.clone() } else { a.clone() })
}
