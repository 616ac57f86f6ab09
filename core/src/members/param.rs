use core::fmt;

use crate::values::{HostObject, Value, ValueType};

/// What a parameter accepts, before nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any value, `Null` included.
    Any,
    /// A list of any element kind.
    AnyList,
    Exact(ValueType),
}

/// A method parameter as seen by overload resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    kind: ParamKind,
    nullable: bool,
    optional: bool,
}

impl Param {
    pub fn of(ty: ValueType) -> Self {
        Self {
            kind: ParamKind::Exact(ty),
            nullable: false,
            optional: false,
        }
    }

    pub fn any() -> Self {
        Self {
            kind: ParamKind::Any,
            nullable: true,
            optional: false,
        }
    }

    pub fn list() -> Self {
        Self {
            kind: ParamKind::AnyList,
            nullable: false,
            optional: false,
        }
    }

    pub fn bool() -> Self {
        Self::of(ValueType::Bool)
    }

    pub fn int() -> Self {
        Self::of(ValueType::Int)
    }

    pub fn double() -> Self {
        Self::of(ValueType::Double)
    }

    pub fn str() -> Self {
        Self::of(ValueType::Str)
    }

    pub fn object<T: HostObject>() -> Self {
        Self::of(ValueType::of::<T>())
    }

    /// Accept `Null` even for value kinds such as `Int`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// May be left out when trailing.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether `arg` can be passed for this parameter.
    pub fn accepts(&self, arg: &Value) -> bool {
        self.accepts_type(arg.value_type())
    }

    /// Whether an argument of type `ty` can be passed, `None` standing for
    /// `Null`.
    ///
    /// `Null` is accepted by reference kinds (strings, lists, objects, any)
    /// and by parameters marked nullable; other values must match exactly.
    pub fn accepts_type(&self, ty: Option<ValueType>) -> bool {
        match (ty, self.kind) {
            (None, ParamKind::Any | ParamKind::AnyList) => true,
            (None, ParamKind::Exact(ty)) => self.nullable || ty.is_reference(),
            (Some(_), ParamKind::Any) => true,
            (Some(ty), ParamKind::AnyList) => matches!(ty, ValueType::List(_)),
            (Some(ty), ParamKind::Exact(expected)) => ty == expected,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParamKind::Any => write!(f, "Any")?,
            ParamKind::AnyList => write!(f, "List")?,
            ParamKind::Exact(ty) => write!(f, "{ty}")?,
        }
        if self.nullable && !matches!(self.kind, ParamKind::Any) {
            write!(f, "?")?;
        }
        Ok(())
    }
}
