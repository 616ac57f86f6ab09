use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::values::{HostObject, HostRef, TypedList, ValueType};

/// A runtime value produced by evaluation or bound to a variable.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    List(Arc<TypedList>),
    Object(HostRef),
}

impl Value {
    /// Wraps a host object so its members can be reached from expressions.
    pub fn object<T: HostObject>(value: T) -> Self {
        Value::Object(HostRef::new(value))
    }

    pub fn list(list: impl Into<TypedList>) -> Self {
        Value::List(Arc::new(list.into()))
    }

    /// Runtime type of the value, `None` for `Null`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Int(_) => Some(ValueType::Int),
            Value::Double(_) => Some(ValueType::Double),
            Value::Str(_) => Some(ValueType::Str),
            Value::List(list) => Some(ValueType::List(list.item_kind())),
            Value::Object(host) => Some(ValueType::Object(host.descriptor())),
        }
    }

    /// Type name for diagnostics, `Null` included.
    pub fn type_name(&self) -> String {
        self.value_type()
            .map(|ty| ty.name())
            .unwrap_or_else(|| "Null".into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Int or Double widened to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TypedList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(host) => host.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// The value as a member-map receiver. `Null` has no receiver.
    pub fn receiver(&self) -> Option<&dyn Any> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b as &dyn Any),
            Value::Int(i) => Some(i as &dyn Any),
            Value::Double(d) => Some(d as &dyn Any),
            Value::Str(s) => Some(s as &dyn Any),
            Value::List(list) => Some(&**list as &dyn Any),
            Value::Object(host) => Some(host.as_any()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Double(d) => write!(f, "Double({d:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(list) => write!(f, "List({list})"),
            Value::Object(host) => write!(f, "{host:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(list) => write!(f, "{list}"),
            Value::Object(host) => write!(f, "{}", host.descriptor().name()),
        }
    }
}

/// Decimal text for a double that always reads back as a double: keeps a
/// fractional part and never uses exponent notation.
pub fn format_double(d: f64) -> String {
    if d.is_finite() && d.fract() == 0.0 {
        format!("{d:.1}")
    } else {
        format!("{d}")
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<TypedList> for Value {
    fn from(value: TypedList) -> Self {
        Value::List(Arc::new(value))
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::list(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::list(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::list(value)
    }
}

impl From<HostRef> for Value {
    fn from(value: HostRef) -> Self {
        Value::Object(value)
    }
}

impl<T: HostObject> From<Arc<T>> for Value {
    fn from(value: Arc<T>) -> Self {
        Value::Object(HostRef::from_arc(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
