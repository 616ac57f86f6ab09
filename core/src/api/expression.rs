//! Parsed expressions bound to a private scope.

use core::fmt;

use tracing::debug;

use super::{Error, InterpreterOptions};
use crate::emit;
use crate::evaluator::Evaluator;
use crate::functions::FunctionTable;
use crate::parser::Expr;
use crate::scope::Scope;
use crate::values::{FromValue, Value, ValueType};

/// A parsed expression ready for evaluation.
///
/// The expression owns its tree and a private scope whose parent is the
/// interpreter's global scope, so variables set here shadow globals without
/// touching them. The tree never changes after parsing; only bindings do.
///
/// # Example
///
/// ```
/// use verdict_core::api::Interpreter;
/// use verdict_core::values::Value;
///
/// let interpreter = Interpreter::new();
/// let mut expr = interpreter.expression("total is greater than 100")?;
///
/// expr.set_variable("total", 150)?;
/// assert_eq!(expr.evaluate()?, Value::Bool(true));
///
/// expr.set_variable("total", 20)?;
/// assert_eq!(expr.evaluate_as::<bool>()?, false);
/// # Ok::<(), verdict_core::api::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    tree: Expr,
    scope: Scope,
    functions: FunctionTable,
    options: InterpreterOptions,
    debugging: bool,
    validating: bool,
}

impl Expression {
    pub(crate) fn new(
        source: String,
        tree: Expr,
        global: &Scope,
        functions: FunctionTable,
        options: InterpreterOptions,
    ) -> Self {
        Self {
            source,
            tree,
            scope: global.child(),
            functions,
            debugging: options.log_evaluation,
            options,
            validating: false,
        }
    }

    /// Evaluate the tree against the current bindings.
    pub fn evaluate(&self) -> Result<Value, Error> {
        if self.debugging {
            debug!(expression = %self.tree, "evaluating expression");
        }
        let value = self.evaluator().eval(&self.tree)?;
        if self.debugging {
            debug!(result = %value, "expression evaluated");
        }
        Ok(value)
    }

    /// Evaluate and convert the result.
    pub fn evaluate_as<T: FromValue>(&self) -> Result<T, Error> {
        let value = self.evaluate()?;
        T::from_value(&value).ok_or_else(|| Error::Conversion {
            expected: T::expected(),
            found: value.type_name(),
        })
    }

    /// Bind `name` in this expression's scope.
    ///
    /// Rebinding must keep the runtime type of the first binding.
    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        Ok(self.scope.set_variable(name, value.into())?)
    }

    /// Bind several variables at once, stopping at the first failure.
    pub fn set_scope<I, K, V>(&mut self, bindings: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Ok(self.scope.set_variables(bindings)?)
    }

    /// Declare variables by type only, without values.
    pub fn register_variable_types(&mut self, types: &[(&str, ValueType)]) {
        for (name, ty) in types {
            self.scope.register_variable_type(name, *ty);
        }
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// The text this expression was parsed from, before sanitizing.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn to_source_literal(&self) -> String {
        emit::to_source_literal(&self.tree)
    }

    /// Turn evaluation logging on or off for this expression.
    pub fn with_debugging(mut self, debugging: bool) -> Self {
        self.debugging = debugging;
        self
    }

    pub fn is_debugging(&self) -> bool {
        self.debugging
    }

    /// Evaluate every identifier, member and call node on its own and
    /// collect the failures.
    pub fn validate_references(&self) -> Vec<Error> {
        let mut evaluator = Evaluator::new(
            self.options.evaluator_options(false, true),
            &self.scope,
            &self.functions,
        );
        self.tree
            .descendants()
            .filter(|node| matches!(node, Expr::Ident(_) | Expr::Member { .. } | Expr::Call { .. }))
            .filter_map(|node| evaluator.eval(node).err())
            .map(Error::from)
            .collect()
    }

    /// Silent evaluation that treats valueless variables by their declared
    /// types.
    pub(crate) fn for_validation(mut self) -> Self {
        self.debugging = false;
        self.validating = true;
        self
    }

    /// A fresh expression over `tree` that shares this one's bindings.
    pub(crate) fn isolated(&self, tree: Expr) -> Expression {
        Expression {
            source: tree.to_string(),
            tree,
            scope: self.scope.child(),
            functions: self.functions.clone(),
            options: self.options,
            debugging: false,
            validating: self.validating,
        }
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(
            self.options.evaluator_options(self.debugging, self.validating),
            &self.scope,
            &self.functions,
        )
    }
}

/// The canonical text form of the tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}
