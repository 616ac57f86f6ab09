//! Runtime evaluation errors.
//!
//! Every failure is reported once, wrapped with the text of the node where
//! it happened. Permissive operator mismatches are not errors; they evaluate
//! to `Null`.

use crate::scope::ScopeError;
use crate::values::ItemKind;

/// A failed evaluation: the failing node's text and the root cause.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("error evaluating `{expression}`: {kind}")]
pub struct EvaluationError {
    pub expression: String,
    pub kind: EvaluationErrorKind,
}

impl EvaluationError {
    pub fn kind(&self) -> &EvaluationErrorKind {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationErrorKind {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Arity(#[from] ArityError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),

    #[error("'{name}' is not a registered function")]
    UnknownFunction { name: String },

    #[error("`if(...)` is not a function: write `value if (condition) else other`")]
    MalformedTernary,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberError {
    #[error("member '{member}' not found in {parent}")]
    NotFound { parent: String, member: String },

    #[error("method '{method}' accepting ({args}) not found in {parent}")]
    MethodNotFound {
        parent: String,
        method: String,
        args: String,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("function '{function}' takes {expected} arguments but {found} were supplied")]
pub struct ArityError {
    pub function: String,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("cannot look for a {found} in a list of {item}")]
    ListItemMismatch { found: String, item: ItemKind },

    #[error("right side of `{op}` must be a list, found {found}")]
    NotAList { op: &'static str, found: String },

    #[error("if condition must return a boolean value, found {found}")]
    NonBooleanCondition { found: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("call to '{target}' failed: {message}")]
pub struct InvocationError {
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("integer division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceExceeded {
    #[error("evaluation depth {depth} exceeds the maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}
