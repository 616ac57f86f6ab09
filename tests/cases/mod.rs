//! Shared fixtures for the integration tests.
#![allow(dead_code, unused_macros)]

use verdict::members::{Method, MemberMapBuilder};
use verdict::{HostObject, Interpreter, Param, Value};

/// Object exposing a property, a field and methods with zero to two
/// arguments.
#[derive(Debug, Clone, HostObject)]
#[host(name = "ExpressionTestObject", methods = test_object_methods)]
pub struct ExpressionTestObject {
    #[host(rename = "MyProperty", property)]
    pub my_property: i64,
    #[host(rename = "MyField")]
    pub my_field: String,
}

impl Default for ExpressionTestObject {
    fn default() -> Self {
        Self {
            my_property: 42,
            my_field: "foo".into(),
        }
    }
}

fn test_object_methods(members: &mut MemberMapBuilder<ExpressionTestObject>) {
    members
        .method0("MyMethod", |_: &ExpressionTestObject| "foo")
        .method1("MyMethod2", |_: &ExpressionTestObject, argument: String| {
            argument.to_uppercase()
        })
        .method2(
            "MyMethod3",
            |_: &ExpressionTestObject, argument: String, argument2: String| {
                argument.to_uppercase() + &argument2.to_lowercase()
            },
        )
        .method1("Scale", |o: &ExpressionTestObject, factor: i64| o.my_property * factor)
        .method1("Scale", |o: &ExpressionTestObject, factor: f64| o.my_property as f64 * factor)
        .generic_method("Echo", 1, |types| {
            Some(Method::new::<ExpressionTestObject, _>(
                "Echo",
                [Param::of(types[0])],
                |_, args| Ok(args.get(0).cloned().unwrap_or(Value::Null)),
            ))
        });
}

pub fn interpreter() -> Interpreter {
    Interpreter::new()
}

pub fn context() -> Value {
    Value::from(ExpressionTestObject::default())
}

/// Generates a test that evaluates `input` on a fresh interpreter.
///
/// `value` compares the result, `formatted` compares the canonical text and
/// `error` matches the error with a pattern.
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $(globals: { $($var:literal => $val:expr),* $(,)? },)?
        $(value: $value:expr,)?
        $(formatted: $formatted:expr,)?
        $(error: $error:pat,)?
    ) => {
        #[test]
        fn $name() {
            let interpreter = cases::interpreter();
            $($(
                interpreter.set_global($var, $val).unwrap();
            )*)?
            let result = interpreter
                .expression($input)
                .map(|expr| (expr.to_string(), expr.evaluate()));
            $(
                let (_, value) = result.as_ref().expect("parse failed");
                pretty_assertions::assert_eq!(
                    value.as_ref().expect("evaluation failed"),
                    &::verdict::Value::from($value)
                );
            )?
            $(
                let (text, _) = result.as_ref().expect("parse failed");
                pretty_assertions::assert_eq!(text.as_str(), $formatted);
            )?
            $(
                let error = match &result {
                    Err(err) => err.clone(),
                    Ok((_, Err(err))) => err.clone(),
                    Ok((_, Ok(value))) => panic!("{} evaluated to {:?}", $input, value),
                };
                assert!(matches!(error, $error), "unexpected error: {error:?}");
            )?
            let _ = result;
        }
    };
}
