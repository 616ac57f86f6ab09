//! Reference and condition checks that collect every failure instead of
//! stopping at the first.

use tracing::debug;

use super::{Error, Interpreter};
use crate::parser::Expr;
use crate::values::ValueType;

/// Outcome of validating an expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validation {
    errors: Vec<Error>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// `Ok` when valid, otherwise every collected error.
    pub fn into_result(self) -> Result<(), Vec<Error>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub(crate) fn validate(interpreter: &Interpreter, text: &str, types: &[(&str, ValueType)]) -> Validation {
    let tree = match interpreter.parse(text) {
        Ok(tree) => tree,
        Err(error) => {
            return Validation {
                errors: vec![error],
            };
        }
    };

    let mut expression = interpreter.bind(text, tree).for_validation();
    expression.register_variable_types(types);

    let mut errors = expression.validate_references();
    for node in expression.tree().descendants() {
        if let Expr::Ternary { .. } = node {
            if let Err(error) = expression.isolated(node.clone()).evaluate() {
                errors.push(error);
            }
        }
    }

    debug!(expression = text, errors = errors.len(), "Validated expression");
    Validation { errors }
}
