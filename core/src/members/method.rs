use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::members::Param;
use crate::values::{FromValue, Value, ValueType};

/// Failure reported by a host method or native function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("argument {index} is not a valid {expected}")]
    Argument { index: usize, expected: String },

    #[error("argument {index} was not supplied")]
    Missing { index: usize },

    #[error("expected {expected} arguments, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("receiver is not a {expected}")]
    Receiver { expected: &'static str },

    #[error("{0}")]
    Failed(String),
}

impl HostError {
    pub fn msg(message: impl Into<String>) -> Self {
        HostError::Failed(message.into())
    }
}

/// Arguments handed to a method body.
///
/// Trailing optional parameters that were not supplied read as `None` from
/// [`get`](CallArgs::get).
#[derive(Debug, Clone, Copy)]
pub struct CallArgs<'a> {
    supplied: &'a [Value],
}

impl<'a> CallArgs<'a> {
    pub fn new(supplied: &'a [Value]) -> Self {
        Self { supplied }
    }

    pub fn len(&self) -> usize {
        self.supplied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supplied.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.supplied.get(index)
    }

    pub fn supplied(&self) -> &'a [Value] {
        self.supplied
    }

    /// Extracts argument `index` as `T`.
    pub fn value<T: FromValue>(&self, index: usize) -> Result<T, HostError> {
        match self.get(index) {
            Some(value) => T::from_value(value).ok_or_else(|| HostError::Argument {
                index,
                expected: T::expected(),
            }),
            None => T::missing().ok_or(HostError::Missing { index }),
        }
    }
}

pub type MethodFn = Arc<dyn Fn(&dyn Any, CallArgs<'_>) -> Result<Value, HostError> + Send + Sync>;

/// A concrete method: its parameter list and body.
#[derive(Clone)]
pub struct Method {
    name: String,
    params: Vec<Param>,
    body: MethodFn,
}

impl Method {
    /// Creates a method whose receiver is a `T`.
    pub fn new<T, F>(name: impl Into<String>, params: impl IntoIterator<Item = Param>, body: F) -> Self
    where
        T: Any,
        F: Fn(&T, CallArgs<'_>) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        let body: MethodFn = Arc::new(move |receiver: &dyn Any, args: CallArgs<'_>| {
            let this = receiver
                .downcast_ref::<T>()
                .ok_or(HostError::Receiver {
                    expected: core::any::type_name::<T>(),
                })?;
            body(this, args)
        });
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn required_arity(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }

    /// Same number of arguments as parameters, each accepted. `arg_types`
    /// holds one entry per argument, `None` for `Null`.
    pub fn matches_exactly(&self, arg_types: &[Option<ValueType>]) -> bool {
        arg_types.len() == self.params.len() && self.accepts_prefix(arg_types)
    }

    /// Trailing optional parameters may be left out.
    pub fn matches_with_optional(&self, arg_types: &[Option<ValueType>]) -> bool {
        (self.required_arity()..=self.arity()).contains(&arg_types.len())
            && self.accepts_prefix(arg_types)
    }

    fn accepts_prefix(&self, arg_types: &[Option<ValueType>]) -> bool {
        self.params
            .iter()
            .zip(arg_types)
            .all(|(param, ty)| param.accepts_type(*ty))
    }

    pub fn invoke(&self, receiver: &dyn Any, args: &[Value]) -> Result<Value, HostError> {
        if args.len() > self.arity() || args.len() < self.required_arity() {
            return Err(HostError::Arity {
                expected: self.arity(),
                got: args.len(),
            });
        }
        (self.body)(receiver, CallArgs::new(args))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
            if param.is_optional() {
                write!(f, " = default")?;
            }
        }
        write!(f, ")")
    }
}

pub type InstantiateFn = Arc<dyn Fn(&[ValueType]) -> Option<Method> + Send + Sync>;

/// A generic method definition.
///
/// Rust has no runtime generics, so instantiation is a closure from the
/// concrete argument types to a concrete [`Method`]. Returning `None` means
/// the types violate a constraint.
#[derive(Clone)]
pub struct GenericMethod {
    name: String,
    type_params: usize,
    instantiate: InstantiateFn,
}

impl GenericMethod {
    pub fn new<F>(name: impl Into<String>, type_params: usize, instantiate: F) -> Self
    where
        F: Fn(&[ValueType]) -> Option<Method> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            type_params,
            instantiate: Arc::new(instantiate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_params(&self) -> usize {
        self.type_params
    }

    pub fn instantiate(&self, type_args: &[ValueType]) -> Option<Method> {
        if type_args.len() != self.type_params {
            return None;
        }
        (self.instantiate)(type_args)
    }
}

impl fmt::Debug for GenericMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.name, self.type_params)
    }
}

/// One entry of a method group.
#[derive(Debug, Clone)]
pub enum Overload {
    Concrete(Arc<Method>),
    Generic(Arc<GenericMethod>),
}
