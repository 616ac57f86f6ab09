//! Tree-walking evaluator.
//!
//! ## Design Principles
//!
//! - **Never panic**: adversarial trees end in an [`EvaluationError`]
//! - **Stack-safe**: depth tracking bounds recursion
//! - **Permissive operators**: operand combinations without a meaning
//!   evaluate to `Null` instead of failing
//!
//! ## Example
//!
//! ```
//! use verdict_core::{evaluator, functions::FunctionTable, lexer, parser, scope::Scope, values::Value};
//!
//! let scope = Scope::new();
//! scope.set_variable("x", Value::Int(4)).unwrap();
//! let expr = parser::parse(&lexer::tokenize("x * 2 + 1")).unwrap();
//! let result = evaluator::eval(&expr, &scope, &FunctionTable::new()).unwrap();
//! assert_eq!(result, Value::Int(9));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{
    ArithmeticError, ArityError, EvaluationError, EvaluationErrorKind, InvocationError,
    MemberError, ResourceExceeded, TypeError,
};
pub use eval::Evaluator;

use crate::functions::FunctionTable;
use crate::parser::Expr;
use crate::scope::Scope;
use crate::values::Value;

/// Options for evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorOptions {
    /// Maximum nesting depth.
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Emit `tracing` events for each evaluation step.
    pub log: bool,

    /// Validation run: variables declared without a value take part in
    /// overload resolution with their declared type, and calls receiving
    /// them yield `Null` instead of running.
    pub validating: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            log: true,
            validating: false,
        }
    }
}

/// Evaluate `expr` with default limits.
pub fn eval(expr: &Expr, scope: &Scope, functions: &FunctionTable) -> Result<Value, EvaluationError> {
    eval_with_options(expr, scope, functions, EvaluatorOptions::default())
}

/// Evaluate `expr` with custom limits.
pub fn eval_with_options(
    expr: &Expr,
    scope: &Scope,
    functions: &FunctionTable,
    options: EvaluatorOptions,
) -> Result<Value, EvaluationError> {
    Evaluator::new(options, scope, functions).eval(expr)
}
