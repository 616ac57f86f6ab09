//! The interpreter: global bindings, native functions and options shared by
//! every expression it builds.

use tracing::{debug, warn};

use super::validation::{self, Validation};
use super::{Error, Expression, InterpreterOptions};
use crate::functions::{FunctionTable, NativeFunction};
use crate::lexer::{sanitize, tokenize, tokenize_strict};
use crate::members::{HostError, MemberMap};
use crate::parser::{Expr, parse_with_max_depth};
use crate::scope::Scope;
use crate::stdlib::register_stdlib;
use crate::values::{FromValue, Value, ValueType};

/// Parses expressions and owns what they share.
///
/// Cloning an `Interpreter` is cheap and the clones share the global scope
/// and the function table.
///
/// # Example
///
/// ```
/// use verdict_core::api::Interpreter;
/// use verdict_core::values::Value;
///
/// let interpreter = Interpreter::new();
/// interpreter.register_fn2("clamp", |x: i64, limit: i64| x.min(limit));
/// interpreter.set_global("limit", 10)?;
///
/// let expr = interpreter.expression("clamp(42, limit) * 2")?;
/// assert_eq!(expr.evaluate()?, Value::Int(20));
/// # Ok::<(), verdict_core::api::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Interpreter {
    global_scope: Scope,
    functions: FunctionTable,
    options: InterpreterOptions,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! typed_registrations {
    ($($method:ident => $ctor:ident($($arg:ident),*);)*) => {
        impl Interpreter {
            $(
                /// Register a function over typed arguments, replacing any
                /// function with the same name.
                pub fn $method<$($arg,)* R, F>(&self, name: &str, func: F)
                where
                    $($arg: FromValue,)*
                    R: Into<Value>,
                    F: Fn($($arg),*) -> R + Send + Sync + 'static,
                {
                    self.install(NativeFunction::$ctor(name, func));
                }
            )*
        }
    };
}

typed_registrations! {
    register_fn0 => from_fn0();
    register_fn1 => from_fn1(A);
    register_fn2 => from_fn2(A, B);
    register_fn3 => from_fn3(A, B, C);
    register_fn4 => from_fn4(A, B, C, D);
}

impl Interpreter {
    /// An interpreter with default options and the standard functions.
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        let functions = FunctionTable::new();
        register_stdlib(&functions);
        Self {
            global_scope: Scope::new(),
            functions,
            options,
        }
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    pub fn global_scope(&self) -> &Scope {
        &self.global_scope
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Register a function over raw values. `arity` of `None` accepts any
    /// number of arguments.
    pub fn register_function<F>(&self, name: &str, arity: Option<usize>, func: F)
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        self.install(NativeFunction::new(name, arity, func));
    }

    fn install(&self, function: NativeFunction) {
        if self.functions.contains(function.name()) {
            warn!(function = function.name(), "Replacing registered function");
        }
        self.functions.register(function);
    }

    /// Bind a variable visible to every expression.
    pub fn set_global(&self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        Ok(self.global_scope.set_variable(name, value.into())?)
    }

    pub fn set_globals<I, K, V>(&self, bindings: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Ok(self.global_scope.set_variables(bindings)?)
    }

    /// Declare a global by type only.
    pub fn register_global_type(&self, name: &str, ty: ValueType) {
        self.global_scope.register_variable_type(name, ty);
    }

    /// Replace the member map used for values of `ty`.
    pub fn register_type_members(&self, ty: ValueType, members: MemberMap) {
        self.global_scope.register_type_members(ty, members);
    }

    /// Sanitize, lex and parse `text`.
    pub fn parse(&self, text: &str) -> Result<Expr, Error> {
        let syntax = |error| Error::Syntax {
            expression: text.to_string(),
            error,
        };
        let sanitized = sanitize(text);
        let tokens = if self.options.strict_lexing {
            tokenize_strict(&sanitized).map_err(syntax)?
        } else {
            tokenize(&sanitized)
        };
        let tree = parse_with_max_depth(&tokens, self.options.max_depth).map_err(syntax)?;
        debug!(expression = %tree, tokens = tokens.len(), "Parsed expression");
        Ok(tree)
    }

    /// Parse `text` into an expression bound to a child of the global scope.
    pub fn expression(&self, text: &str) -> Result<Expression, Error> {
        let tree = self.parse(text)?;
        Ok(self.bind(text, tree))
    }

    pub(crate) fn bind(&self, text: &str, tree: Expr) -> Expression {
        Expression::new(
            text.to_string(),
            tree,
            &self.global_scope,
            self.functions.clone(),
            self.options,
        )
    }

    /// Parse and evaluate `text` once.
    pub fn evaluate(&self, text: &str) -> Result<Value, Error> {
        self.expression(text)?.evaluate()
    }

    /// Check `text` against the current global bindings.
    pub fn validate(&self, text: &str) -> Validation {
        validation::validate(self, text, &[])
    }

    /// Check `text` with `types` declared as valueless variables.
    pub fn validate_with_types(&self, text: &str, types: &[(&str, ValueType)]) -> Validation {
        validation::validate(self, text, types)
    }
}
