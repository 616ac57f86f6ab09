//! Public error type for the interpreter API.
//!
//! Layer errors (syntax, scope, evaluation) are wrapped here at the API
//! boundary. Each variant maps to a stable diagnostic code.

use std::fmt::Display;

use miette::Diagnostic;

use crate::evaluator::{EvaluationError, EvaluationErrorKind};
use crate::parser::SyntaxError;
use crate::scope::ScopeError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The text could not be lexed or parsed.
    #[error("invalid expression `{expression}`: {error}")]
    Syntax {
        expression: String,
        error: SyntaxError,
    },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Binding a variable failed.
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// `evaluate_as` produced a value of the wrong type.
    #[error("expected the expression to produce {expected}, found {found}")]
    Conversion { expected: String, found: String },
}

impl Error {
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn evaluation_kind(&self) -> Option<&EvaluationErrorKind> {
        match self {
            Error::Evaluation(error) => Some(error.kind()),
            _ => None,
        }
    }

    fn code_str(&self) -> &'static str {
        match self {
            Error::Syntax { .. } => "V001",
            Error::Scope(_) => "V002",
            Error::Conversion { .. } => "V011",
            Error::Evaluation(error) => match error.kind() {
                EvaluationErrorKind::Scope(_) => "V002",
                EvaluationErrorKind::Member(_) => "V003",
                EvaluationErrorKind::Arity(_) => "V004",
                EvaluationErrorKind::Type(_) => "V005",
                EvaluationErrorKind::Invocation(_) => "V006",
                EvaluationErrorKind::Arithmetic(_) => "V007",
                EvaluationErrorKind::ResourceExceeded(_) => "V008",
                EvaluationErrorKind::UnknownFunction { .. } => "V009",
                EvaluationErrorKind::MalformedTernary => "V010",
            },
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        let help = match self {
            Error::Syntax { .. } => "check for unbalanced brackets and unquoted text",
            Error::Scope(ScopeError::NullValue { .. }) => {
                "declare the type with `register_variable_types` instead of binding null"
            }
            Error::Evaluation(error) => match error.kind() {
                EvaluationErrorKind::Scope(_) => "bind the variable or declare its type before evaluating",
                EvaluationErrorKind::Member(_) => "member names are case sensitive",
                EvaluationErrorKind::Type(_) => "conditions must be boolean and list items must match the searched value",
                EvaluationErrorKind::MalformedTernary => "write `value if (condition) else other`",
                EvaluationErrorKind::ResourceExceeded(_) => "raise `InterpreterOptions::max_depth`",
                _ => return None,
            },
            _ => return None,
        };
        Some(help)
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help_str().map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}
