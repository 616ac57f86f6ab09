//! Error codes, help text and rendering.

use miette::Diagnostic;
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use verdict::evaluator::{EvaluatorOptions, eval_with_options};
use verdict::{Error, Interpreter, InterpreterOptions, render_error};

#[macro_use]
mod cases;

pub struct CodeCase {
    pub expr: &'static str,
    pub code: &'static str,
}

pub static CODE_CASES: Lazy<Vec<CodeCase>> = Lazy::new(|| {
    vec![
        CodeCase { expr: "(1 + 2", code: "V001" },
        CodeCase { expr: "missing", code: "V002" },
        CodeCase { expr: "context.Nope", code: "V003" },
        CodeCase { expr: "min(1)", code: "V004" },
        CodeCase { expr: "1 if (2) else 3", code: "V005" },
        CodeCase { expr: "min('a', 1)", code: "V006" },
        CodeCase { expr: "1 / 0", code: "V007" },
        CodeCase { expr: "nothing_here(1)", code: "V009" },
        CodeCase { expr: "if(true)", code: "V010" },
    ]
});

#[test]
fn test_codes() {
    let interpreter = cases::interpreter();
    interpreter.set_global("context", cases::context()).unwrap();
    for case in CODE_CASES.iter() {
        let err = interpreter.evaluate(case.expr).unwrap_err();
        assert_eq!(
            err.code().map(|code| code.to_string()).as_deref(),
            Some(case.code),
            "{}: {err}",
            case.expr
        );
    }
}

#[test]
fn test_depth_limit_code() {
    // Parsed trees always fit their interpreter's limit, so evaluate one
    // under a tighter limit directly.
    let interpreter = Interpreter::new();
    interpreter.set_global("x", 1).unwrap();
    let expr = interpreter.expression("x + x + x + x + x + x").unwrap();
    let options = EvaluatorOptions {
        max_depth: 4,
        log: false,
        validating: false,
    };
    let err: Error = eval_with_options(expr.tree(), expr.scope(), interpreter.functions(), options)
        .unwrap_err()
        .into();
    assert_eq!(err.code().map(|code| code.to_string()), Some("V008".to_string()));
}

#[test]
fn test_flat_chain_over_the_limit_is_a_syntax_error() {
    let interpreter = Interpreter::with_options(InterpreterOptions {
        max_depth: 4,
        ..Default::default()
    });
    interpreter.set_global("x", 1).unwrap();
    let err = interpreter.evaluate("x + x + x + x + x + x").unwrap_err();
    assert_eq!(err.code().map(|code| code.to_string()), Some("V001".to_string()));
}

#[test]
fn test_render_includes_code_and_help() {
    let interpreter = cases::interpreter();
    let err = interpreter.evaluate("1 if (2) else 3").unwrap_err();
    let rendered = render_error(&err);
    assert!(rendered.contains("V005"), "{rendered}");
    assert!(rendered.contains("if condition must return a boolean value"), "{rendered}");
    assert!(rendered.contains("conditions must be boolean"), "{rendered}");
}
