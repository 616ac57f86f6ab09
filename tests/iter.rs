//! Filtering and mapping collections through expressions.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use verdict::{Error, ExpressionIterExt, Value};

use cases::ExpressionTestObject;

#[macro_use]
mod cases;

fn objects() -> Vec<Arc<ExpressionTestObject>> {
    [10, 42, 99]
        .into_iter()
        .map(|my_property| {
            Arc::new(ExpressionTestObject {
                my_property,
                my_field: format!("item{my_property}"),
            })
        })
        .collect()
}

#[test]
fn test_filter_by() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("o.MyProperty is greater than 20").unwrap();

    let kept: Vec<_> = objects()
        .into_iter()
        .filter_by("o", &mut expr)
        .collect::<Result<_, _>>()
        .unwrap();
    let kept: Vec<i64> = kept.iter().map(|o| o.my_property).collect();
    assert_eq!(kept, vec![42, 99]);
}

#[test]
fn test_filter_by_treats_null_as_false() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("n > 1 and 'x'").unwrap();
    let kept: Vec<i64> = [1i64, 2]
        .into_iter()
        .filter_by("n", &mut expr)
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(kept.is_empty());
}

#[test]
fn test_filter_by_rejects_non_boolean_results() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("n + 1").unwrap();
    let result: Result<Vec<i64>, Error> = [1i64].into_iter().filter_by("n", &mut expr).collect();
    assert_eq!(
        result.unwrap_err(),
        Error::Conversion {
            expected: "Bool".into(),
            found: "Int".into(),
        }
    );
}

#[test]
fn test_map_by() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("o.MyField + '!'").unwrap();
    let labels: Vec<String> = objects()
        .into_iter()
        .map_by("o", &mut expr)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(labels, vec!["item10!", "item42!", "item99!"]);
}

#[test]
fn test_map_by_values() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("x * 2 if (x < 3) else x").unwrap();
    let doubled: Vec<Value> = (1i64..=4)
        .map_by("x", &mut expr)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        doubled,
        vec![Value::Int(2), Value::Int(4), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn test_map_by_stops_on_type_change() {
    let interpreter = cases::interpreter();
    let mut expr = interpreter.expression("x").unwrap();
    let results: Vec<Result<i64, Error>> = vec![Value::Int(1), Value::from("two")]
        .into_iter()
        .map_by("x", &mut expr)
        .collect();
    assert_eq!(results[0], Ok(1));
    assert!(matches!(results[1], Err(Error::Scope(_))));
}
