//! Core evaluation logic.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::evaluator::{
    ArityError, EvaluationError, EvaluationErrorKind, EvaluatorOptions, InvocationError,
    MemberError, ResourceExceeded, TypeError,
    operators::{eval_binary, eval_membership},
};
use crate::functions::FunctionTable;
use crate::parser::{Expr, Literal};
use crate::scope::{Scope, ScopeError};
use crate::values::{Value, ValueType};

/// Tree-walking evaluator over a scope and a native function table.
pub struct Evaluator<'a> {
    options: EvaluatorOptions,
    scope: &'a Scope,
    functions: &'a FunctionTable,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(options: EvaluatorOptions, scope: &'a Scope, functions: &'a FunctionTable) -> Self {
        Self {
            options,
            scope,
            functions,
            depth: 0,
        }
    }

    fn fail(&self, expr: &Expr, kind: impl Into<EvaluationErrorKind>) -> EvaluationError {
        let kind = kind.into();
        if self.options.log {
            debug!(expression = %expr, error = %kind, "Evaluation failed");
        }
        EvaluationError {
            expression: expr.to_string(),
            kind,
        }
    }

    /// Evaluate an expression node.
    pub fn eval(&mut self, expr: &Expr) -> Result<Value, EvaluationError> {
        if self.depth >= self.options.max_depth {
            return Err(self.fail(
                expr,
                ResourceExceeded::StackOverflow {
                    depth: self.depth,
                    max_depth: self.options.max_depth,
                },
            ));
        }

        self.depth += 1;
        let result = self.eval_inner(expr);
        self.depth -= 1;

        if self.options.log {
            if let Ok(value) = &result {
                trace!(expression = %expr, value = ?value, "Evaluated");
            }
        }
        result
    }

    fn eval_inner(&mut self, expr: &Expr) -> Result<Value, EvaluationError> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Int(i) => Value::Int(*i),
                Literal::Double(d) => Value::Double(*d),
                Literal::Str(s) => Value::Str(s.clone()),
            }),
            Expr::List(list) => Ok(Value::List(Arc::clone(list))),
            Expr::Binary { op, left, right } => {
                // Both sides are always evaluated.
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                let result = if op.is_membership() {
                    eval_membership(*op, &left, &right)
                } else {
                    eval_binary(*op, &left, &right)
                };
                result.map_err(|kind| self.fail(expr, kind))
            }
            Expr::Ternary {
                condition,
                truthy,
                falsy,
            } => {
                let chosen = match self.eval(condition)? {
                    Value::Bool(true) => truthy,
                    Value::Bool(false) | Value::Null => falsy,
                    other => {
                        return Err(self.fail(
                            expr,
                            TypeError::NonBooleanCondition {
                                found: other.type_name(),
                            },
                        ));
                    }
                };
                self.eval(chosen)
            }
            Expr::Ident(name) => {
                let variable = self
                    .scope
                    .try_get_variable(name)
                    .ok_or_else(|| self.fail(expr, ScopeError::Unbound { name: name.clone() }))?;
                Ok(variable.value().cloned().unwrap_or(Value::Null))
            }
            Expr::Member { parent, name } => self.eval_member(expr, parent, name),
            Expr::Call {
                parent: None,
                name,
                args,
            } => self.eval_function_call(expr, name, args),
            Expr::Call {
                parent: Some(parent),
                name,
                args,
            } => self.eval_method_call(expr, parent, name, args),
        }
    }

    /// `parent.name`. The member must exist on the parent's type even when
    /// the parent has no value, in which case the result is `Null`.
    fn eval_member(&mut self, expr: &Expr, parent: &str, name: &str) -> Result<Value, EvaluationError> {
        let variable = self.scope.try_get_variable(parent).ok_or_else(|| {
            self.fail(
                expr,
                ScopeError::Unbound {
                    name: parent.into(),
                },
            )
        })?;
        let members = variable.member_map();
        if !members.has_member(name) {
            return Err(self.fail(
                expr,
                MemberError::NotFound {
                    parent: variable.ty().name(),
                    member: name.into(),
                },
            ));
        }
        let Some(receiver) = variable.value().and_then(Value::receiver) else {
            return Ok(Value::Null);
        };
        Ok(members
            .try_get_member_value(receiver, name)
            .unwrap_or(Value::Null))
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, EvaluationError> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Declared type of an argument that names a variable without a value.
    /// Only consulted while validating.
    fn declared_type(&self, arg: &Expr) -> Option<ValueType> {
        if !self.options.validating {
            return None;
        }
        let Expr::Ident(name) = arg else {
            return None;
        };
        self.scope
            .try_get_variable(name)
            .filter(|variable| variable.value().is_none())
            .map(|variable| variable.ty())
    }

    /// Runtime type of each argument, or its declared type when it has no
    /// value. Also reports whether any argument stood in by declaration.
    fn arg_types(&self, args: &[Expr], values: &[Value]) -> (Vec<Option<ValueType>>, bool) {
        let mut declared_only = false;
        let types = args
            .iter()
            .zip(values)
            .map(|(arg, value)| {
                value.value_type().or_else(|| {
                    let declared = self.declared_type(arg);
                    declared_only |= declared.is_some();
                    declared
                })
            })
            .collect();
        (types, declared_only)
    }

    fn eval_function_call(&mut self, expr: &Expr, name: &str, arg_exprs: &[Expr]) -> Result<Value, EvaluationError> {
        let args = self.eval_args(arg_exprs)?;
        let Some(function) = self.functions.get(name) else {
            if name == "if" {
                return Err(self.fail(expr, EvaluationErrorKind::MalformedTernary));
            }
            return Err(self.fail(
                expr,
                EvaluationErrorKind::UnknownFunction { name: name.into() },
            ));
        };
        if let Some(expected) = function.arity() {
            if expected != args.len() {
                return Err(self.fail(
                    expr,
                    ArityError {
                        function: name.into(),
                        expected,
                        found: args.len(),
                    },
                ));
            }
        }
        if self.arg_types(arg_exprs, &args).1 {
            return Ok(Value::Null);
        }
        function.call(&args).map_err(|err| {
            self.fail(
                expr,
                InvocationError {
                    target: name.into(),
                    message: err.to_string(),
                },
            )
        })
    }

    /// `parent.name(args)`. Overload resolution runs before the parent's
    /// value is looked at, so a valueless parent still reports unknown
    /// methods.
    fn eval_method_call(
        &mut self,
        expr: &Expr,
        parent: &str,
        name: &str,
        arg_exprs: &[Expr],
    ) -> Result<Value, EvaluationError> {
        let args = self.eval_args(arg_exprs)?;
        let variable = self.scope.try_get_variable(parent).ok_or_else(|| {
            self.fail(
                expr,
                ScopeError::Unbound {
                    name: parent.into(),
                },
            )
        })?;
        let (arg_types, declared_only) = self.arg_types(arg_exprs, &args);
        let Some(method) = variable.member_map().resolve_method_for_types(name, &arg_types) else {
            let names: Vec<String> = arg_types
                .iter()
                .map(|ty| ty.map_or_else(|| "Null".into(), |ty| ty.name()))
                .collect();
            return Err(self.fail(
                expr,
                MemberError::MethodNotFound {
                    parent: variable.ty().name(),
                    method: name.into(),
                    args: names.join(", "),
                },
            ));
        };
        let Some(receiver) = variable.value().and_then(Value::receiver) else {
            return Ok(Value::Null);
        };
        if declared_only {
            return Ok(Value::Null);
        }
        method.invoke(receiver, &args).map_err(|err| {
            self.fail(
                expr,
                InvocationError {
                    target: format!("{parent}.{name}"),
                    message: err.to_string(),
                },
            )
        })
    }
}
