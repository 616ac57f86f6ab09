//! Configuration options for the interpreter.

use crate::evaluator::EvaluatorOptions;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for an [`Interpreter`](super::Interpreter).
///
/// Every expression built by the interpreter inherits these options.
///
/// # Example
///
/// ```
/// use verdict_core::api::{Interpreter, InterpreterOptions};
///
/// let interpreter = Interpreter::with_options(InterpreterOptions {
///     max_depth: 64,
///     strict_lexing: true,
///     ..Default::default()
/// });
/// assert!(interpreter.expression("1 + 2 # 3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Maximum nesting depth, enforced by both the parser and the evaluator.
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Reject characters the lexer does not recognize instead of skipping them.
    ///
    /// Default: false
    pub strict_lexing: bool,

    /// Emit `tracing` events while evaluating.
    ///
    /// Expressions may override this with `Expression::with_debugging`.
    ///
    /// Default: true
    pub log_evaluation: bool,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_lexing: false,
            log_evaluation: true,
        }
    }
}

impl InterpreterOptions {
    pub(crate) fn evaluator_options(&self, log: bool, validating: bool) -> EvaluatorOptions {
        EvaluatorOptions {
            max_depth: self.max_depth,
            log,
            validating,
        }
    }
}
