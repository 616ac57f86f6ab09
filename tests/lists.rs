//! `in` / `not in` and list literals.

use verdict::evaluator::TypeError;
use verdict::{Error, EvaluationError, EvaluationErrorKind, SyntaxErrorKind, ValueType};

#[macro_use]
mod cases;

test_case! {
    name: int_in_int_list,
    input: "value in [42,5]",
    globals: { "value" => 42 },
    value: true,
    formatted: "value in [42, 5]",
}

test_case! {
    name: string_not_found,
    input: "value in ['foo','bar']",
    globals: { "value" => "test" },
    value: false,
}

test_case! {
    name: string_found,
    input: "value in ['foo','bar']",
    globals: { "value" => "foo" },
    value: true,
}

test_case! {
    name: ints_promote_to_doubles,
    input: "value in [42,50.2]",
    globals: { "value" => 50.2 },
    value: true,
    formatted: "value in [42.0, 50.2]",
}

test_case! {
    name: doubles_list,
    input: "value in [42.1,50.2]",
    globals: { "value" => 50.2 },
    value: true,
}

test_case! {
    name: int_in_doubles_fails,
    input: "value not in [42.1,50.2]",
    globals: { "value" => 60 },
    error: Error::Evaluation(EvaluationError {
        kind: EvaluationErrorKind::Type(TypeError::ListItemMismatch { .. }),
        ..
    }),
}

test_case! {
    name: int_literal_in_doubles_fails,
    input: "5 in [1.5, 5.0]",
    error: Error::Evaluation(EvaluationError {
        kind: EvaluationErrorKind::Type(TypeError::ListItemMismatch { .. }),
        ..
    }),
}

test_case! {
    name: string_in_doubles_fails,
    input: "value not in [42.1,50.2]",
    globals: { "value" => "foo" },
    error: Error::Evaluation(EvaluationError {
        kind: EvaluationErrorKind::Type(TypeError::ListItemMismatch { .. }),
        ..
    }),
}

test_case! {
    name: int_in_strings_fails,
    input: "value in ['foo','bar']",
    globals: { "value" => 42 },
    error: Error::Evaluation(EvaluationError {
        kind: EvaluationErrorKind::Type(TypeError::ListItemMismatch { .. }),
        ..
    }),
}

test_case! {
    name: empty_list_is_a_syntax_error,
    input: "value in []",
    globals: { "value" => 50.2 },
    error: Error::Syntax { error: verdict::SyntaxError { kind: SyntaxErrorKind::EmptyList, .. }, .. },
}

test_case! {
    name: mixed_list_is_a_syntax_error,
    input: "value in [1, 'a']",
    error: Error::Syntax { error: verdict::SyntaxError { kind: SyntaxErrorKind::MixedList { .. }, .. }, .. },
}

test_case! {
    name: membership_binds_looser_than_arithmetic,
    input: "1 + 1 in [2]",
    value: true,
}

test_case! {
    name: list_members,
    input: "codes.Count == 2 and codes.Contains('B')",
    globals: { "codes" => vec!["A".to_string(), "B".to_string()] },
    value: true,
}

#[test]
fn valueless_needle_is_a_type_error() {
    let interpreter = cases::interpreter();
    interpreter.register_global_type("v", ValueType::Str);
    let err = interpreter.evaluate("v in ['a']").unwrap_err();
    assert!(
        matches!(
            &err,
            Error::Evaluation(EvaluationError {
                kind: EvaluationErrorKind::Type(TypeError::ListItemMismatch { found, .. }),
                ..
            }) if found == "Null"
        ),
        "{err:?}"
    );
}
