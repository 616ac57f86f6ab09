//! Conversions from runtime values into Rust types for typed function and
//! method registration.

use std::sync::Arc;

use crate::members::Param;
use crate::values::{TypedList, Value, ValueType};

/// A Rust type that can be extracted from a [`Value`].
///
/// `param` describes the matching parameter so typed registrations take part
/// in overload resolution.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;

    fn param() -> Param;

    /// Value to use when an optional argument was not supplied.
    fn missing() -> Option<Self> {
        None
    }

    fn expected() -> String {
        Self::param().to_string()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn param() -> Param {
        Param::any()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn param() -> Param {
        Param::of(ValueType::Bool)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }

    fn param() -> Param {
        Param::of(ValueType::Int)
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int().and_then(|i| i32::try_from(i).ok())
    }

    fn param() -> Param {
        Param::of(ValueType::Int)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_double()
    }

    fn param() -> Param {
        Param::of(ValueType::Double)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }

    fn param() -> Param {
        Param::of(ValueType::Str)
    }
}

impl FromValue for Arc<TypedList> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(list) => Some(list.clone()),
            _ => None,
        }
    }

    fn param() -> Param {
        Param::list()
    }
}

/// `None` for `Null` or an unsupplied argument.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn param() -> Param {
        T::param().nullable().optional()
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}
